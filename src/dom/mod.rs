pub mod document;
pub mod fixture;
pub mod geometry;
pub mod page;
