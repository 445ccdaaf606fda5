pub mod api;
pub mod config;
pub mod constants;
pub mod data;
pub mod encoding;
pub mod error;
pub mod marks;
pub mod render;
pub mod spec;
pub mod transforms;
pub mod writer;

pub use crate::render::{CompiledScene, SceneCompiler};
pub use crate::spec::ChartSpecification;
