pub mod gradient;
pub mod kinds;
pub mod palette;
