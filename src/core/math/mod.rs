pub mod matrix4;
pub mod vector3h;
