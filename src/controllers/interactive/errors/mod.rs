pub mod frame_error;
