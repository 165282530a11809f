pub mod lead_service;
pub mod notification;
pub mod property_service;

pub use lead_service::LeadService;
pub use property_service::PropertyService;
