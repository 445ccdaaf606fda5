use serde::{Deserialize, Serialize};
use xrchart_common::format::format_number;
use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{check_ids, check_len, Primitive, ToPrimitives};

use super::mark::SceneMark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneSphereMark {
    pub name: String,
    pub len: u32,
    pub ids: Option<Vec<String>>,
    pub position: ScalarOrArray<Vec3>,
    pub radius: ScalarOrArray<f64>,
    pub color: ScalarOrArray<String>,
}

impl SceneSphereMark {
    pub fn position_iter(&self) -> Box<dyn Iterator<Item = &Vec3> + '_> {
        self.position.as_iter(self.len as usize)
    }
    pub fn radius_iter(&self) -> Box<dyn Iterator<Item = &f64> + '_> {
        self.radius.as_iter(self.len as usize)
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.color.as_iter(self.len as usize)
    }
}

impl Default for SceneSphereMark {
    fn default() -> Self {
        Self {
            name: "sphere_mark".to_string(),
            len: 1,
            ids: None,
            position: ScalarOrArray::Scalar(Vec3::ZERO),
            radius: ScalarOrArray::Scalar(0.5),
            color: ScalarOrArray::Scalar("blue".to_string()),
        }
    }
}

impl ToPrimitives for SceneSphereMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let len = self.len as usize;
        check_ids(&self.name, &self.ids, len)?;
        check_len(&self.name, "position", &self.position, len)?;
        check_len(&self.name, "radius", &self.radius, len)?;
        check_len(&self.name, "color", &self.color, len)?;

        let primitives = self
            .position_iter()
            .zip(self.radius_iter())
            .zip(self.color_iter())
            .enumerate()
            .map(|(i, ((position, radius), color))| {
                Primitive::new("sphere")
                    .maybe_attr("id", self.ids.as_ref().map(|ids| &ids[i]))
                    .attr("position", position)
                    .attr("radius", format_number(*radius))
                    .attr("color", color)
            })
            .collect();
        Ok(primitives)
    }
}

impl From<SceneSphereMark> for SceneMark {
    fn from(mark: SceneSphereMark) -> Self {
        SceneMark::Sphere(mark)
    }
}
