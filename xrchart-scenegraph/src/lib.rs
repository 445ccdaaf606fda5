pub mod error;
pub mod marks;
pub mod primitive;
pub mod scene_graph;
