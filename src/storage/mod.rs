pub mod zoom_point;
