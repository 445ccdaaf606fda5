use std::fmt::Write;

use xrchart_scenegraph::primitive::Primitive;
use xrchart_scenegraph::scene_graph::SceneGraph;

use crate::error::XrChartError;

const INDENT: &str = "    ";

pub const HTML_SCENE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <script src="https://aframe.io/releases/1.7.1/aframe.min.js"></script>
    <script src="https://unpkg.com/aframe-environment-component@1.5.0/dist/aframe-environment-component.min.js"></script>
</head>
<body>
    <a-scene webxr="requiredFeatures: local-floor">
        <a-entity id="user">
            <a-camera id="camera" position="0 2 0" active="true" wasd-controls="acceleration: 35"></a-camera>
            <a-entity id="right-hand" laser-controls="hand: right"></a-entity>
            <a-entity id="left-hand" laser-controls="hand: left"></a-entity>
        </a-entity>
        <a-entity environment="preset: default"></a-entity>

{elements}
    </a-scene>
</body>
</html>
"#;

/// Render a scene graph into a standalone A-Frame page
pub fn scene_to_html(scene: &SceneGraph) -> Result<String, XrChartError> {
    let mut elements = String::new();
    for primitive in scene.to_primitives()? {
        write_primitive(&mut elements, &primitive, 2)?;
    }
    Ok(HTML_SCENE_TEMPLATE.replace("{elements}", &elements))
}

fn write_primitive(out: &mut String, primitive: &Primitive, depth: usize) -> Result<(), XrChartError> {
    let indent = INDENT.repeat(depth);
    let tag = format!("a-{}", primitive.tag);
    let write_err = |err: std::fmt::Error| XrChartError::InternalError(err.to_string());

    write!(out, "{indent}<{tag}").map_err(write_err)?;
    for (name, value) in &primitive.attributes {
        write!(out, " {name}=\"{}\"", escape_attribute(value)).map_err(write_err)?;
    }
    if primitive.children.is_empty() {
        writeln!(out, "></{tag}>").map_err(write_err)?;
    } else {
        writeln!(out, ">").map_err(write_err)?;
        for child in &primitive.children {
            write_primitive(out, child, depth + 1)?;
        }
        writeln!(out, "{indent}</{tag}>").map_err(write_err)?;
    }
    Ok(())
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrchart_common::vec3::Vec3;
    use xrchart_scenegraph::marks::group::SceneGroup;
    use xrchart_scenegraph::marks::line::SceneLineMark;

    #[test]
    fn test_nested_entities() -> Result<(), XrChartError> {
        let scene = SceneGraph {
            marks: vec![SceneGroup {
                name: "chart_0".to_string(),
                position: Vec3::new(0.0, 1.0, -2.0),
                marks: vec![SceneLineMark {
                    end: Vec3::new(4.0, 0.0, 0.0),
                    ..Default::default()
                }
                .into()],
                ..Default::default()
            }
            .into()],
        };
        let html = scene_to_html(&scene)?;
        assert!(html.contains("aframe.io/releases/1.7.1"));
        assert!(html.contains(
            "        <a-entity id=\"chart_0\" position=\"0 1 -2\" rotation=\"0 0 0\">\n"
        ));
        assert!(html.contains(
            "            <a-entity line=\"start: 0 0 0; end: 4 0 0; color: black\"></a-entity>\n"
        ));
        assert!(!html.contains("{elements}"));
        Ok(())
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a \"b\" <c> & d"), "a &quot;b&quot; &lt;c&gt; &amp; d");
    }
}
