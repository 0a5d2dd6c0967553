pub mod app;
pub mod minimize;
pub mod model;
pub mod output;
pub mod remeasure;
