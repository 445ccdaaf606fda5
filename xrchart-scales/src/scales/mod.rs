pub mod band;
pub mod linear;
pub mod ordinal;
pub mod point;
