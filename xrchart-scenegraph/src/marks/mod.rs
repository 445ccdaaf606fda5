pub mod arc;
pub mod box_mark;
pub mod element;
pub mod group;
pub mod image;
pub mod line;
pub mod mark;
pub mod model;
pub mod sphere;
pub mod text;
