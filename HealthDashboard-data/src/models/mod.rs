// Storage and wire models
pub mod reading;
