pub mod lead;
pub mod property;
