use serde::{Deserialize, Serialize};
use xrchart_common::format::format_number;
use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{check_ids, check_len, Primitive, ToPrimitives};

use super::mark::SceneMark;

/// Axis-aligned boxes centered on `position`, used for bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneBoxMark {
    pub name: String,
    pub len: u32,
    pub ids: Option<Vec<String>>,
    pub position: ScalarOrArray<Vec3>,
    pub width: ScalarOrArray<f64>,
    pub height: ScalarOrArray<f64>,
    pub depth: ScalarOrArray<f64>,
    pub color: ScalarOrArray<String>,
}

impl SceneBoxMark {
    pub fn position_iter(&self) -> Box<dyn Iterator<Item = &Vec3> + '_> {
        self.position.as_iter(self.len as usize)
    }
    pub fn width_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.width.as_iter(self.len as usize)
    }
    pub fn height_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.height.as_iter(self.len as usize)
    }
    pub fn depth_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.depth.as_iter(self.len as usize)
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.color.as_iter(self.len as usize)
    }
}

impl Default for SceneBoxMark {
    fn default() -> Self {
        Self {
            name: "box_mark".to_string(),
            len: 1,
            ids: None,
            position: ScalarOrArray::Scalar(Vec3::ZERO),
            width: ScalarOrArray::Scalar(1.0),
            height: ScalarOrArray::Scalar(1.0),
            depth: ScalarOrArray::Scalar(1.0),
            color: ScalarOrArray::Scalar("blue".to_string()),
        }
    }
}

impl ToPrimitives for SceneBoxMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let len = self.len as usize;
        check_ids(&self.name, &self.ids, len)?;
        check_len(&self.name, "position", &self.position, len)?;
        check_len(&self.name, "width", &self.width, len)?;
        check_len(&self.name, "height", &self.height, len)?;
        check_len(&self.name, "depth", &self.depth, len)?;
        check_len(&self.name, "color", &self.color, len)?;

        let primitives = self
            .position_iter()
            .zip(self.width_iter())
            .zip(self.height_iter())
            .zip(self.depth_iter())
            .zip(self.color_iter())
            .enumerate()
            .map(|(i, ((((position, width), height), depth), color))| {
                Primitive::new("box")
                    .maybe_attr("id", self.ids.as_ref().map(|ids| &ids[i]))
                    .attr("position", position)
                    .attr("width", format_number(*width))
                    .attr("height", format_number(*height))
                    .attr("depth", format_number(*depth))
                    .attr("color", color)
            })
            .collect();
        Ok(primitives)
    }
}

impl From<SceneBoxMark> for SceneMark {
    fn from(mark: SceneBoxMark) -> Self {
        SceneMark::Box(mark)
    }
}
