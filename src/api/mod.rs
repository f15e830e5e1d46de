pub mod demo;
pub mod extractors;
