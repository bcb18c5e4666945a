pub mod errors;
pub mod view_state;
