pub mod colour;
pub mod complex;
pub mod escape_time;
pub mod iteration_buffer;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod point;
