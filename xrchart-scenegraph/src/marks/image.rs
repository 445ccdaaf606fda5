use serde::{Deserialize, Serialize};
use xrchart_common::format::format_number;
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{Primitive, ToPrimitives};

use super::mark::SceneMark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneImageMark {
    pub name: String,
    pub src: String,
    pub position: Vec3,
    pub width: f64,
    pub height: f64,
}

impl Default for SceneImageMark {
    fn default() -> Self {
        Self {
            name: "image_mark".to_string(),
            src: "".to_string(),
            position: Vec3::ZERO,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl ToPrimitives for SceneImageMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        Ok(vec![Primitive::new("image")
            .attr("src", &self.src)
            .attr("position", self.position)
            .attr("width", format_number(self.width))
            .attr("height", format_number(self.height))])
    }
}

impl From<SceneImageMark> for SceneMark {
    fn from(mark: SceneImageMark) -> Self {
        SceneMark::Image(mark)
    }
}
