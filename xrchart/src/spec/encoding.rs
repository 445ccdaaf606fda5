use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, VariantNames};

use crate::data::kind::ColumnKind;
use crate::error::XrChartError;
use crate::spec::mark::MarkType;
use crate::spec::transform::{parse_call_args, AggregateOp};

/// A visual role that can be bound to a data field
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Z,
    Color,
    Size,
    Theta,
}

/// Binding of one channel to a field.
///
/// Deserializes from a structured object or from the shorthand forms
/// `field`, `field:Q`, `field:N`, `op(field)`, `op(field, groupby)` and
/// `count()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelEncoding {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateOp>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ColumnKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groupby: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<bool>,
}

impl ChannelEncoding {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            aggregate: None,
            kind: None,
            groupby: None,
            axis: None,
        }
    }

    pub fn parse_shorthand(shorthand: &str) -> Result<Self, XrChartError> {
        let shorthand = shorthand.trim();
        if shorthand.contains('(') {
            let (op, args) = parse_call_args(shorthand)?;
            let (field, groupby) = match args.as_slice() {
                [] => ("", None),
                [field] => (*field, None),
                [field, groupby] => (*field, Some(vec![groupby.to_string()])),
                _ => {
                    return Err(XrChartError::ValidationError(format!(
                        "Invalid encoding `{shorthand}`: expected `op(field)` or `op(field, groupby)`"
                    )));
                }
            };
            let encoding = Self {
                aggregate: Some(op),
                groupby,
                ..Self::new(field)
            };
            encoding.validate()?;
            return Ok(encoding);
        }

        let (field, kind) = match shorthand.rsplit_once(':') {
            Some((field, kind)) => (field.trim(), Some(kind.trim().parse::<ColumnKind>()?)),
            None => (shorthand, None),
        };
        let encoding = Self {
            kind,
            ..Self::new(field)
        };
        encoding.validate()?;
        Ok(encoding)
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, XrChartError> {
        let mut encoding = Self::new("");
        for (key, value) in map {
            let invalid = || {
                XrChartError::ValidationError(format!(
                    "Invalid encoding parameter `{key}`: got `{value}`"
                ))
            };
            match key.as_str() {
                "field" => encoding.field = value.as_str().ok_or_else(invalid)?.to_string(),
                "aggregate" => {
                    encoding.aggregate =
                        Some(AggregateOp::parse(value.as_str().ok_or_else(invalid)?)?)
                }
                "type" => encoding.kind = Some(value.as_str().ok_or_else(invalid)?.parse()?),
                "groupby" | "group_by" => {
                    encoding.groupby =
                        Some(serde_json::from_value(value.clone()).map_err(|_| invalid())?)
                }
                "axis" => encoding.axis = Some(value.as_bool().ok_or_else(invalid)?),
                _ => {
                    return Err(XrChartError::ValidationError(format!(
                        "Unknown encoding parameter `{key}`"
                    )));
                }
            }
        }
        encoding.validate()?;
        Ok(encoding)
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        if self.field.is_empty() && self.aggregate != Some(AggregateOp::Count) {
            return Err(XrChartError::ValidationError(
                "Encoding requires a non-empty `field`".to_string(),
            ));
        }
        Ok(())
    }

    /// Column read from the table before any inline aggregate is applied
    pub fn source_field(&self) -> Option<&str> {
        (!self.field.is_empty()).then_some(self.field.as_str())
    }

    /// Column holding this channel's values once transforms have run
    pub fn output_field(&self) -> String {
        match (self.aggregate, self.source_field()) {
            (Some(op), Some(field)) => format!("{op}_{field}"),
            (Some(op), None) => op.to_string(),
            (None, _) => self.field.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for ChannelEncoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(shorthand) => {
                ChannelEncoding::parse_shorthand(&shorthand).map_err(D::Error::custom)
            }
            Value::Object(map) => ChannelEncoding::from_object(map).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "encoding must be a field name or an object, got `{other}`"
            ))),
        }
    }
}

/// Mapping of channels to encodings, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingSpec(IndexMap<Channel, ChannelEncoding>);

impl EncodingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: Channel) -> Option<&ChannelEncoding> {
        self.0.get(&channel)
    }

    pub fn insert(&mut self, channel: Channel, encoding: ChannelEncoding) {
        self.0.insert(channel, encoding);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Channel, &ChannelEncoding)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct source fields, in channel order
    pub fn source_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = vec![];
        for encoding in self.0.values() {
            if let Some(field) = encoding.source_field() {
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
        }
        fields
    }

    /// Channel combinations each mark type accepts
    pub fn validate_for(&self, mark_type: MarkType) -> Result<(), XrChartError> {
        match mark_type {
            MarkType::Bar | MarkType::Point => {
                let spatial = [Channel::X, Channel::Y, Channel::Z];
                let missing: Vec<String> = spatial
                    .iter()
                    .filter(|c| !self.0.contains_key(*c))
                    .map(|c| c.to_string())
                    .collect();
                if missing.len() > 1 {
                    return Err(XrChartError::ValidationError(format!(
                        "{mark_type} chart requires at least two of the x, y, z channels, missing: {}",
                        missing.join(", ")
                    )));
                }
                if self.0.contains_key(&Channel::Theta) {
                    return Err(XrChartError::ValidationError(format!(
                        "Channel `theta` is not supported by the {mark_type} mark"
                    )));
                }
                if mark_type == MarkType::Bar && self.0.contains_key(&Channel::Size) {
                    return Err(XrChartError::ValidationError(
                        "Channel `size` is not supported by the bar mark".to_string(),
                    ));
                }
                Ok(())
            }
            MarkType::Arc => {
                for required in [Channel::Color, Channel::Theta] {
                    if !self.0.contains_key(&required) {
                        return Err(XrChartError::ValidationError(format!(
                            "arc chart requires the `{required}` channel"
                        )));
                    }
                }
                if let Some(channel) = self
                    .0
                    .keys()
                    .find(|c| !matches!(c, Channel::Color | Channel::Theta))
                {
                    return Err(XrChartError::ValidationError(format!(
                        "Channel `{channel}` is not supported by the arc mark"
                    )));
                }
                Ok(())
            }
            MarkType::Image | MarkType::Gltf => {
                if self.0.is_empty() {
                    Ok(())
                } else {
                    Err(XrChartError::ValidationError(format!(
                        "The {mark_type} mark does not accept an `encoding`"
                    )))
                }
            }
        }
    }
}

impl FromIterator<(Channel, ChannelEncoding)> for EncodingSpec {
    fn from_iter<T: IntoIterator<Item = (Channel, ChannelEncoding)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
