use serde::{Deserialize, Serialize};
use xrchart_common::value::ScalarOrArray;
use xrchart_common::vec3::Vec3;

use crate::error::XrSceneGraphError;
use crate::primitive::{check_len, Primitive, ToPrimitives};

use super::mark::SceneMark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub position: ScalarOrArray<Vec3>,
    pub rotation: ScalarOrArray<Vec3>,
    pub align: ScalarOrArray<TextAlign>,
    pub color: ScalarOrArray<String>,
}

impl SceneTextMark {
    pub fn text_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.text.as_iter(self.len as usize)
    }
    pub fn position_iter(&self) -> Box<dyn Iterator<Item = &Vec3> + '_> {
        self.position.as_iter(self.len as usize)
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            len: 1,
            text: ScalarOrArray::Scalar("".to_string()),
            position: ScalarOrArray::Scalar(Vec3::ZERO),
            rotation: ScalarOrArray::Scalar(Vec3::ZERO),
            align: ScalarOrArray::Scalar(TextAlign::Center),
            color: ScalarOrArray::Scalar("black".to_string()),
        }
    }
}

impl ToPrimitives for SceneTextMark {
    fn to_primitives(&self) -> Result<Vec<Primitive>, XrSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "text", &self.text, len)?;
        check_len(&self.name, "position", &self.position, len)?;
        check_len(&self.name, "rotation", &self.rotation, len)?;
        check_len(&self.name, "align", &self.align, len)?;
        check_len(&self.name, "color", &self.color, len)?;

        let mut primitives = Vec::with_capacity(len);
        for i in 0..len {
            let primitive = Primitive::new("text")
                .maybe_attr("value", self.text.get(i))
                .maybe_attr("position", self.position.get(i))
                .maybe_attr("rotation", self.rotation.get(i))
                .maybe_attr("align", self.align.get(i).map(|a| a.as_str()))
                .maybe_attr("color", self.color.get(i));
            primitives.push(primitive);
        }
        Ok(primitives)
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(mark)
    }
}
