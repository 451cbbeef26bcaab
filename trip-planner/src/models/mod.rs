pub mod catalog;
pub mod preferences;
