use arrow::array::{ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use xrchart_scales::category::CategoryValue;

use crate::error::XrChartError;

/// Numeric view of a column, nulls preserved
pub fn numeric_values(array: &ArrayRef) -> Result<Vec<Option<f64>>, XrChartError> {
    let casted = cast(array, &DataType::Float64)?;
    Ok(casted.as_primitive::<Float64Type>().iter().collect())
}

/// Numeric view of a column with nulls read as zero
pub fn numeric_values_or_zero(array: &ArrayRef) -> Result<Vec<f64>, XrChartError> {
    Ok(numeric_values(array)?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect())
}

/// Discrete view of a column, used for nominal channels and labels
pub fn category_values(array: &ArrayRef) -> Result<Vec<CategoryValue>, XrChartError> {
    if array.data_type().is_numeric() {
        return Ok(numeric_values(array)?
            .into_iter()
            .map(|v| v.map(CategoryValue::number).unwrap_or(CategoryValue::Null))
            .collect());
    }
    let casted = cast(array, &DataType::Utf8)?;
    Ok(casted
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(CategoryValue::text).unwrap_or(CategoryValue::Null))
        .collect())
}

/// Display strings of a column, as used in mark ids
pub fn display_values(array: &ArrayRef) -> Result<Vec<String>, XrChartError> {
    Ok(category_values(array)?
        .iter()
        .map(|v| v.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
    use std::sync::Arc;

    #[test]
    fn test_numeric_values() -> Result<(), XrChartError> {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(-3)]));
        assert_eq!(numeric_values(&array)?, vec![Some(1.0), None, Some(-3.0)]);
        assert_eq!(numeric_values_or_zero(&array)?, vec![1.0, 0.0, -3.0]);
        Ok(())
    }

    #[test]
    fn test_category_values() -> Result<(), XrChartError> {
        let array: ArrayRef = Arc::new(StringArray::from(vec![Some("a"), None]));
        assert_eq!(
            category_values(&array)?,
            vec![CategoryValue::text("a"), CategoryValue::Null]
        );

        let array: ArrayRef = Arc::new(BooleanArray::from(vec![true, false]));
        assert_eq!(display_values(&array)?, vec!["true", "false"]);

        let array: ArrayRef = Arc::new(Float64Array::from(vec![2.5, 10.0]));
        assert_eq!(display_values(&array)?, vec!["2.5", "10"]);
        Ok(())
    }
}
