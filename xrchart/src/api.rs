use std::path::Path;

use serde_json::{Map, Value};
use xrchart_common::vec3::Vec3;

use crate::error::XrChartError;
use crate::render::{CompiledScene, SceneCompiler};
use crate::spec::chart::ChartSpec;
use crate::spec::data::DataSpec;
use crate::spec::encoding::{Channel, ChannelEncoding, EncodingSpec};
use crate::spec::mark::{
    ArcMarkOptions, BarMarkOptions, GltfMarkOptions, ImageMarkOptions, MarkSpec, PointMarkOptions,
};
use crate::spec::params::ParamSpec;
use crate::spec::transform::{AggregateSpec, FilterSpec, TransformSpec};
use crate::spec::ChartSpecification;
use crate::writer::html::scene_to_html;
use crate::writer::OutputFormat;

/// Placement and bounds set through [`ChartSpec::properties`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartProperties {
    pub position: Option<String>,
    pub rotation: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl ChartSpec {
    pub fn new(data: DataSpec) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn from_values(values: Vec<Map<String, Value>>) -> Self {
        Self::new(DataSpec::Values { values })
    }

    pub fn from_url(url: &str) -> Self {
        Self::new(DataSpec::Url {
            url: url.to_string(),
            format: None,
        })
    }

    fn with_mark(mut self, mark: MarkSpec) -> Result<Self, XrChartError> {
        mark.validate()?;
        self.mark = Some(mark);
        Ok(self)
    }

    pub fn mark_bar(self, size: Option<f64>) -> Result<Self, XrChartError> {
        self.with_mark(MarkSpec::Bar(BarMarkOptions { size }))
    }

    pub fn mark_arc(self, radius: Option<f64>) -> Result<Self, XrChartError> {
        self.with_mark(MarkSpec::Arc(ArcMarkOptions {
            radius,
            inner_radius: None,
        }))
    }

    pub fn mark_arc_with_inner(self, radius: f64, inner_radius: f64) -> Result<Self, XrChartError> {
        self.with_mark(MarkSpec::Arc(ArcMarkOptions {
            radius: Some(radius),
            inner_radius: Some(inner_radius),
        }))
    }

    pub fn mark_point(self, max_radius: Option<f64>) -> Result<Self, XrChartError> {
        self.with_mark(MarkSpec::Point(PointMarkOptions { max_radius }))
    }

    pub fn mark_image(self, width: Option<f64>, height: Option<f64>) -> Result<Self, XrChartError> {
        self.with_mark(MarkSpec::Image(ImageMarkOptions { width, height }))
    }

    pub fn mark_gltf(self, scale: Option<&str>) -> Result<Self, XrChartError> {
        let scale = scale
            .map(|scale| Vec3::parse_named(scale, "scale"))
            .transpose()?;
        self.with_mark(MarkSpec::Gltf(GltfMarkOptions { scale }))
    }

    /// Bind a channel using shorthand such as `model`, `sales:Q` or `mean(sales)`
    pub fn encode(self, channel: Channel, shorthand: &str) -> Result<Self, XrChartError> {
        Ok(self.encode_channel(channel, ChannelEncoding::parse_shorthand(shorthand)?))
    }

    pub fn encode_channel(mut self, channel: Channel, encoding: ChannelEncoding) -> Self {
        self.encoding
            .get_or_insert_with(EncodingSpec::new)
            .insert(channel, encoding);
        self
    }

    pub fn transform_filter(mut self, expr: &str) -> Result<Self, XrChartError> {
        let filter = FilterSpec::Predicate(expr.parse()?);
        self.transform.push(TransformSpec::Filter { filter });
        Ok(self)
    }

    pub fn transform_filter_param(mut self, param: &str) -> Self {
        self.transform.push(TransformSpec::Filter {
            filter: FilterSpec::Param {
                param: param.to_string(),
            },
        });
        self
    }

    /// Add an aggregate step from `(as, "op(field)")` pairs
    pub fn transform_aggregate(
        mut self,
        groupby: Option<&[&str]>,
        aggregates: &[(&str, &str)],
    ) -> Result<Self, XrChartError> {
        let aggregate = aggregates
            .iter()
            .map(|(as_field, expr)| AggregateSpec::parse(as_field, expr))
            .collect::<Result<Vec<_>, _>>()?;
        if aggregate.is_empty() {
            return Err(XrChartError::ValidationError(
                "Aggregate transform requires at least one operation".to_string(),
            ));
        }
        let groupby = groupby.map(|fields| fields.iter().map(|f| f.to_string()).collect());
        self.transform
            .push(TransformSpec::Aggregate { aggregate, groupby });
        Ok(self)
    }

    pub fn properties(mut self, properties: ChartProperties) -> Result<Self, XrChartError> {
        if let Some(position) = &properties.position {
            Vec3::parse_named(position, "position")?;
        }
        if let Some(rotation) = &properties.rotation {
            Vec3::parse_named(rotation, "rotation")?;
        }
        for (name, value) in [
            ("width", properties.width),
            ("height", properties.height),
            ("depth", properties.depth),
        ] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(XrChartError::ValidationError(format!(
                        "Invalid `{name}`: expected a positive number, got {value}"
                    )));
                }
            }
        }
        self.position = properties.position.or(self.position);
        self.rotation = properties.rotation.or(self.rotation);
        self.width = properties.width.or(self.width);
        self.height = properties.height.or(self.height);
        self.depth = properties.depth.or(self.depth);
        Ok(self)
    }

    pub fn add_params(mut self, param: ParamSpec) -> Result<Self, XrChartError> {
        param.validate()?;
        self.params.push(param);
        Ok(self)
    }
}

impl ChartSpecification {
    /// Compile with default settings
    pub fn compile(&self) -> Result<CompiledScene, XrChartError> {
        SceneCompiler::default().compile(self)
    }

    pub fn to_html(&self) -> Result<String, XrChartError> {
        self.to_html_with(&SceneCompiler::default())
    }

    pub fn to_html_with(&self, compiler: &SceneCompiler) -> Result<String, XrChartError> {
        let compiled = compiler.compile(self)?;
        scene_to_html(&compiled.scene)
    }

    /// Write the specification to `path`, as a page or as JSON. Without an
    /// explicit format it is taken from the file extension.
    pub fn save(&self, path: &Path, format: Option<OutputFormat>) -> Result<(), XrChartError> {
        let format = match format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        let contents = match format {
            OutputFormat::Html => self.to_html()?,
            OutputFormat::Json => self.to_json()?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values() -> Vec<Map<String, Value>> {
        serde_json::from_value(json!([{"model": "leon", "sales": 10}])).unwrap()
    }

    #[test]
    fn test_builder() -> Result<(), XrChartError> {
        let chart = ChartSpec::from_values(values())
            .mark_bar(Some(0.5))?
            .encode(Channel::X, "model")?
            .encode(Channel::Y, "sum(sales)")?
            .transform_filter("datum.sales > 1")?
            .properties(ChartProperties {
                position: Some("0 1 -3".to_string()),
                ..Default::default()
            })?;
        let spec = ChartSpecification::from(chart);
        spec.validate()?;

        let value = spec.to_dict()?;
        assert_eq!(value["mark"], json!({"type": "bar", "size": 0.5}));
        assert_eq!(value["encoding"]["y"], json!({"field": "sales", "aggregate": "sum"}));
        assert_eq!(value["transform"], json!([{"filter": "datum.sales > 1"}]));
        assert_eq!(value["position"], json!("0 1 -3"));
        Ok(())
    }

    #[test]
    fn test_builder_errors() {
        let chart = ChartSpec::from_values(values());
        assert!(chart.clone().mark_bar(Some(0.0)).is_err());
        assert!(chart.clone().encode(Channel::Y, "mode(sales)").is_err());
        assert!(chart.clone().transform_filter("sales >> 3").is_err());
        assert!(chart
            .clone()
            .properties(ChartProperties {
                rotation: Some("1 2 x".to_string()),
                ..Default::default()
            })
            .is_err());
        let err = chart
            .transform_aggregate(None, &[("m", "mode(sales)")])
            .unwrap_err();
        assert!(matches!(err, XrChartError::InvalidAggregateOp { .. }));
    }

    #[test]
    fn test_save_rejects_unknown_extension() -> Result<(), XrChartError> {
        let spec = ChartSpecification::from(
            ChartSpec::from_values(values())
                .mark_bar(None)?
                .encode(Channel::X, "model")?
                .encode(Channel::Y, "sales")?,
        );
        let err = spec.save(Path::new("chart.png"), None).unwrap_err();
        assert!(err.to_string().contains("Invalid file format"));
        Ok(())
    }
}
