use xrchart_common::vec3::Vec3;
use xrchart_scenegraph::marks::image::SceneImageMark;
use xrchart_scenegraph::marks::mark::SceneMark;
use xrchart_scenegraph::marks::model::SceneModelMark;

use crate::config::ChartDefaults;
use crate::error::XrChartError;
use crate::marks::CompiledChart;
use crate::spec::data::DataSpec;
use crate::spec::mark::MarkSpec;

/// Compile an image or glTF mark. The data url is passed through as the
/// asset source.
pub fn compile_media(
    mark: &MarkSpec,
    data: &DataSpec,
    defaults: &ChartDefaults,
) -> Result<CompiledChart, XrChartError> {
    let src = data.url().ok_or_else(|| {
        XrChartError::ValidationError(format!(
            "The {} mark requires `data.url`",
            mark.mark_type()
        ))
    })?;

    let mark: SceneMark = match mark {
        MarkSpec::Image(options) => SceneImageMark {
            name: "image".to_string(),
            src: src.to_string(),
            position: Vec3::ZERO,
            width: options.width.unwrap_or(defaults.image_width),
            height: options.height.unwrap_or(defaults.image_height),
        }
        .into(),
        MarkSpec::Gltf(options) => SceneModelMark {
            name: "model".to_string(),
            src: src.to_string(),
            position: Vec3::ZERO,
            scale: options.scale.unwrap_or(defaults.gltf_scale),
        }
        .into(),
        _ => {
            return Err(XrChartError::InternalError(format!(
                "{} is not a media mark",
                mark.mark_type()
            )));
        }
    };

    Ok(CompiledChart {
        marks: vec![mark],
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::mark::{GltfMarkOptions, ImageMarkOptions};

    fn url(url: &str) -> DataSpec {
        DataSpec::Url {
            url: url.to_string(),
            format: None,
        }
    }

    #[test]
    fn test_image() -> Result<(), XrChartError> {
        let mark = MarkSpec::Image(ImageMarkOptions {
            width: Some(2.0),
            height: None,
        });
        let chart = compile_media(&mark, &url("logo.png"), &ChartDefaults::default())?;
        let SceneMark::Image(image) = &chart.marks[0] else {
            panic!("expected image mark");
        };
        assert_eq!(image.src, "logo.png");
        assert_eq!((image.width, image.height), (2.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_gltf() -> Result<(), XrChartError> {
        let mark = MarkSpec::Gltf(GltfMarkOptions {
            scale: Some(Vec3::new(2.0, 2.0, 2.0)),
        });
        let chart = compile_media(&mark, &url("car.glb"), &ChartDefaults::default())?;
        let SceneMark::Model(model) = &chart.marks[0] else {
            panic!("expected model mark");
        };
        assert_eq!(model.scale, Vec3::new(2.0, 2.0, 2.0));
        Ok(())
    }
}
