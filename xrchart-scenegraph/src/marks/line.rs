use serde::{Deserialize, Serialize};
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{Primitive, ToPrimitives};

use super::mark::SceneMark;

/// A single straight segment, used for axis lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneLineMark {
    pub name: String,
    pub start: Vec3,
    pub end: Vec3,
    pub color: String,
}

impl Default for SceneLineMark {
    fn default() -> Self {
        Self {
            name: "line_mark".to_string(),
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            color: "black".to_string(),
        }
    }
}

impl ToPrimitives for SceneLineMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let line = format!(
            "start: {}; end: {}; color: {}",
            self.start, self.end, self.color
        );
        Ok(vec![Primitive::new("entity").attr("line", line)])
    }
}

impl From<SceneLineMark> for SceneMark {
    fn from(mark: SceneLineMark) -> Self {
        SceneMark::Line(mark)
    }
}
