pub mod classifier;
pub mod details;
pub mod scorer;
pub mod screen_model;
