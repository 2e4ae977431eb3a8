pub mod collector;
pub mod options;
