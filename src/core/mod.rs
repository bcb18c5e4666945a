pub mod actions;
pub mod data;
pub mod fractals;
pub mod math;
pub mod view;
