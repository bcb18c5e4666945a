pub mod coordinate_input;
pub mod explorer;
pub mod interactive;
pub mod ports;
pub mod render;
