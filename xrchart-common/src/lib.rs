pub mod color;
pub mod error;
pub mod format;
pub mod value;
pub mod vec3;
