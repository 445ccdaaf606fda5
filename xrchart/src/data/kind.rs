use std::fmt::{Display, Formatter};
use std::str::FromStr;

use arrow::datatypes::{DataType, Field};
use serde::{Deserialize, Serialize};

use crate::error::XrChartError;
use crate::spec::encoding::Channel;

/// Measurement type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[serde(alias = "Q")]
    Quantitative,
    #[serde(alias = "N")]
    Nominal,
}

impl FromStr for ColumnKind {
    type Err = XrChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quantitative" | "Q" => Ok(ColumnKind::Quantitative),
            "nominal" | "N" => Ok(ColumnKind::Nominal),
            _ => Err(XrChartError::ValidationError(format!(
                "Invalid encoding type: `{s}`, expected one of: quantitative, nominal, Q, N"
            ))),
        }
    }
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Quantitative => write!(f, "quantitative"),
            ColumnKind::Nominal => write!(f, "nominal"),
        }
    }
}

/// Infer the measurement type of a column from its Arrow type.
///
/// Numbers are quantitative. Strings, booleans and temporal values are
/// nominal, as is a column of nulls.
pub fn infer_column_kind(field: &Field) -> Result<ColumnKind, XrChartError> {
    let data_type = field.data_type();
    if data_type.is_numeric() {
        return Ok(ColumnKind::Quantitative);
    }
    match data_type {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Utf8View
        | DataType::Boolean
        | DataType::Null
        | DataType::Date32
        | DataType::Date64
        | DataType::Timestamp(_, _)
        | DataType::Dictionary(_, _) => Ok(ColumnKind::Nominal),
        _ => Err(XrChartError::DataError(format!(
            "Unsupported data type `{data_type}` for field `{}`",
            field.name()
        ))),
    }
}

/// Combine a declared type with the inferred one. Declaring a nominal column
/// quantitative is an error; declaring a numeric column nominal is allowed.
pub fn resolve_column_kind(
    channel: Channel,
    field: &str,
    declared: Option<ColumnKind>,
    inferred: ColumnKind,
) -> Result<ColumnKind, XrChartError> {
    match (declared, inferred) {
        (Some(ColumnKind::Quantitative), ColumnKind::Nominal) => {
            Err(XrChartError::ValidationError(format!(
                "Channel `{channel}` declares field `{field}` as quantitative, but its values are not numeric"
            )))
        }
        (Some(kind), _) => Ok(kind),
        (None, kind) => Ok(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DataType::Int64, ColumnKind::Quantitative)]
    #[case(DataType::Float32, ColumnKind::Quantitative)]
    #[case(DataType::UInt8, ColumnKind::Quantitative)]
    #[case(DataType::Utf8, ColumnKind::Nominal)]
    #[case(DataType::Boolean, ColumnKind::Nominal)]
    #[case(DataType::Null, ColumnKind::Nominal)]
    fn test_infer_column_kind(#[case] data_type: DataType, #[case] expected: ColumnKind) {
        let field = Field::new("a", data_type, true);
        assert_eq!(infer_column_kind(&field).unwrap(), expected);
    }

    #[test]
    fn test_declared_kind() {
        let kind =
            resolve_column_kind(Channel::X, "doors", Some(ColumnKind::Nominal), ColumnKind::Quantitative);
        assert_eq!(kind.unwrap(), ColumnKind::Nominal);

        let err = resolve_column_kind(Channel::Y, "model", Some(ColumnKind::Quantitative), ColumnKind::Nominal)
            .unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Q".parse::<ColumnKind>().unwrap(), ColumnKind::Quantitative);
        assert_eq!("nominal".parse::<ColumnKind>().unwrap(), ColumnKind::Nominal);
        assert!("ordinal".parse::<ColumnKind>().is_err());
    }
}
