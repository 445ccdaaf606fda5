use crate::category::{unique_sorted, CategoryValue};
use crate::error::XrScaleError;

/// `count` evenly spaced values from `start` to `end` inclusive.
///
/// A single sample sits at `start`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Point scale that spreads sorted categories evenly between `start` and `end`
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<CategoryValue>,
    positions: Vec<f64>,
}

impl PointScale {
    pub fn try_new<'a>(
        values: impl IntoIterator<Item = &'a CategoryValue>,
        start: f64,
        end: f64,
    ) -> Result<Self, XrScaleError> {
        let domain = unique_sorted(values);
        if domain.is_empty() {
            return Err(XrScaleError::EmptyDomain);
        }
        let positions = linspace(start, end, domain.len());
        Ok(Self { domain, positions })
    }

    pub fn domain(&self) -> &[CategoryValue] {
        &self.domain
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn position(&self, value: &CategoryValue) -> Result<f64, XrScaleError> {
        let index = self
            .domain
            .binary_search(value)
            .map_err(|_| XrScaleError::DomainValueNotFound(value.to_string()))?;
        Ok(self.positions[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 0), Vec::<f64>::new());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(1.0, 5.0, 5), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_point_positions() -> Result<(), XrScaleError> {
        let values = vec![
            CategoryValue::text("b"),
            CategoryValue::text("a"),
            CategoryValue::text("c"),
        ];
        let scale = PointScale::try_new(&values, -0.5, -1.5)?;
        assert_approx_eq!(f64, scale.position(&CategoryValue::text("a"))?, -0.5);
        assert_approx_eq!(f64, scale.position(&CategoryValue::text("b"))?, -1.0);
        assert_approx_eq!(f64, scale.position(&CategoryValue::text("c"))?, -1.5);
        Ok(())
    }
}
