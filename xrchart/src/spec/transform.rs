use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{Display as StrumDisplay, EnumString, VariantNames};

use crate::error::XrChartError;

lazy_static! {
    static ref AGGREGATE_OPS: String = AggregateOp::VARIANTS.join(", ");
}

/// Closed set of aggregate operators. `std` and `var` are sample statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Sum,
    Mean,
    Median,
    Min,
    Max,
    Std,
    Var,
}

impl AggregateOp {
    pub fn parse(op: &str) -> Result<Self, XrChartError> {
        op.trim()
            .parse()
            .map_err(|_| XrChartError::InvalidAggregateOp {
                op: op.to_string(),
                expected: AGGREGATE_OPS.clone(),
            })
    }
}

impl Serialize for AggregateOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AggregateOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let op = String::deserialize(deserializer)?;
        AggregateOp::parse(&op).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl FilterOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::NotEq => "!=",
            FilterOp::Gt => ">",
            FilterOp::GtEq => ">=",
            FilterOp::Lt => "<",
            FilterOp::LtEq => "<=",
        }
    }

    pub fn is_ordering(&self) -> bool {
        !matches!(self, FilterOp::Eq | FilterOp::NotEq)
    }
}

// Longest symbols first so that `>=` is not read as `>`
const FILTER_OPS: [(&str, FilterOp); 7] = [
    (">=", FilterOp::GtEq),
    ("<=", FilterOp::LtEq),
    ("!=", FilterOp::NotEq),
    ("==", FilterOp::Eq),
    ("=", FilterOp::Eq),
    (">", FilterOp::Gt),
    ("<", FilterOp::Lt),
];

/// A single comparison `[datum.]field op value`.
///
/// String values may be quoted with `'` or `"`. Ordering operators require a
/// numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl FilterPredicate {
    pub fn new(field: &str, op: FilterOp, value: &str) -> Self {
        Self {
            field: field.to_string(),
            op,
            value: value.to_string(),
        }
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.value.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl FromStr for FilterPredicate {
    type Err = XrChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            XrChartError::ValidationError(format!("Invalid filter `{s}`: {reason}"))
        };
        let expr = s.trim();
        let expr = expr.strip_prefix("datum.").unwrap_or(expr);

        let (index, symbol, op) = expr
            .char_indices()
            .find_map(|(index, _)| {
                FILTER_OPS
                    .iter()
                    .find(|(symbol, _)| expr[index..].starts_with(symbol))
                    .map(|(symbol, op)| (index, *symbol, *op))
            })
            .ok_or_else(|| invalid("expected `field op value` with op one of =, ==, !=, >, >=, <, <="))?;

        let field = expr[..index].trim();
        if field.is_empty() {
            return Err(invalid("missing field name"));
        }
        let raw_value = expr[index + symbol.len()..].trim();
        let value = unquote(raw_value);
        if value.is_empty() {
            return Err(invalid("missing comparison value"));
        }

        let predicate = FilterPredicate::new(field, op, value);
        if op.is_ordering() && predicate.numeric_value().is_none() {
            return Err(invalid(&format!(
                "operator `{symbol}` requires a numeric value, got `{value}`"
            )));
        }
        Ok(predicate)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl Display for FilterPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = self.op.symbol();
        if self.numeric_value().is_some() {
            write!(f, "datum.{} {symbol} {}", self.field, self.value)
        } else if self.value.contains('\'') {
            write!(f, "datum.{} {symbol} \"{}\"", self.field, self.value)
        } else {
            write!(f, "datum.{} {symbol} '{}'", self.field, self.value)
        }
    }
}

impl Serialize for FilterPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FilterPredicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = String::deserialize(deserializer)?;
        expr.parse().map_err(D::Error::custom)
    }
}

/// A filter is either an inline predicate or a reference to a chart parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterSpec {
    Predicate(FilterPredicate),
    Param { param: String },
}

impl<'de> Deserialize<'de> for FilterSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(expr) => Ok(FilterSpec::Predicate(
                expr.parse().map_err(D::Error::custom)?,
            )),
            Value::Object(map) => match map.get("param") {
                Some(Value::String(param)) if map.len() == 1 => Ok(FilterSpec::Param {
                    param: param.clone(),
                }),
                _ => Err(D::Error::custom(
                    "filter object must have exactly one string key `param`",
                )),
            },
            other => Err(D::Error::custom(format!(
                "filter must be a predicate string or a `param` reference, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateSpec {
    pub op: AggregateOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_field: Option<String>,
}

impl AggregateSpec {
    /// Parse `op(field)` (or `count()`) into an aggregate written to `as_field`
    pub fn parse(as_field: &str, expr: &str) -> Result<Self, XrChartError> {
        let (op, field) = parse_call(expr)?;
        let spec = Self {
            op,
            field: field.map(|f| f.to_string()),
            as_field: Some(as_field.to_string()),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Name of the aggregated output column
    pub fn output_name(&self) -> String {
        match (&self.as_field, &self.field) {
            (Some(as_field), _) => as_field.clone(),
            (None, Some(field)) => field.clone(),
            (None, None) => self.op.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), XrChartError> {
        if self.op != AggregateOp::Count && self.field.as_deref().unwrap_or("").is_empty() {
            return Err(XrChartError::ValidationError(format!(
                "Aggregate operation `{}` requires a `field`",
                self.op
            )));
        }
        Ok(())
    }
}

/// Split `op(arg1, arg2, ...)` into the operator and its trimmed arguments
pub(crate) fn parse_call_args(expr: &str) -> Result<(AggregateOp, Vec<&str>), XrChartError> {
    let expr = expr.trim();
    let invalid = |reason: &str| {
        XrChartError::ValidationError(format!("Invalid aggregate expression `{expr}`: {reason}"))
    };
    let open = expr.find('(').ok_or_else(|| invalid("expected `op(field)`"))?;
    let inner = expr[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| invalid("missing closing parenthesis"))?;
    let op = AggregateOp::parse(&expr[..open])?;
    let args = if inner.trim().is_empty() {
        vec![]
    } else {
        inner.split(',').map(|arg| arg.trim()).collect()
    };
    Ok((op, args))
}

fn parse_call(expr: &str) -> Result<(AggregateOp, Option<&str>), XrChartError> {
    let (op, args) = parse_call_args(expr)?;
    match args.as_slice() {
        [] => Ok((op, None)),
        [field] => Ok((op, Some(*field))),
        _ => Err(XrChartError::ValidationError(format!(
            "Invalid aggregate expression `{expr}`: expected a single field"
        ))),
    }
}

/// One step of the transform list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransformSpec {
    Filter {
        filter: FilterSpec,
    },
    Aggregate {
        aggregate: Vec<AggregateSpec>,
        #[serde(skip_serializing_if = "Option::is_none")]
        groupby: Option<Vec<String>>,
    },
}

impl<'de> Deserialize<'de> for TransformSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(mut map) = Value::deserialize(deserializer)? else {
            return Err(D::Error::custom("transform must be an object"));
        };
        if let Some(filter) = map.remove("filter") {
            if !map.is_empty() {
                return Err(D::Error::custom("filter transform accepts only the `filter` key"));
            }
            let filter = serde_json::from_value(filter).map_err(D::Error::custom)?;
            return Ok(TransformSpec::Filter { filter });
        }
        if let Some(aggregate) = map.remove("aggregate") {
            let aggregate: Vec<AggregateSpec> =
                serde_json::from_value(aggregate).map_err(D::Error::custom)?;
            let groupby = map
                .remove("groupby")
                .map(serde_json::from_value)
                .transpose()
                .map_err(D::Error::custom)?;
            if let Some(key) = map.keys().next() {
                return Err(D::Error::custom(format!(
                    "unknown aggregate transform key `{key}`"
                )));
            }
            return Ok(TransformSpec::Aggregate { aggregate, groupby });
        }
        Err(D::Error::custom(
            "transform requires a `filter` or an `aggregate` key",
        ))
    }
}

impl TransformSpec {
    pub fn validate(&self) -> Result<(), XrChartError> {
        match self {
            TransformSpec::Filter { .. } => Ok(()),
            TransformSpec::Aggregate { aggregate, .. } => {
                if aggregate.is_empty() {
                    return Err(XrChartError::ValidationError(
                        "Aggregate transform requires at least one operation".to_string(),
                    ));
                }
                aggregate.iter().try_for_each(|a| a.validate())
            }
        }
    }
}
