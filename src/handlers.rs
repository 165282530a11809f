pub mod leads;
pub mod properties;
