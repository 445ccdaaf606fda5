use crate::category::{unique_sorted, CategoryValue};
use crate::error::XrScaleError;

/// Band scale that assigns each distinct category a fixed-width slot.
///
/// The domain is the sorted set of distinct values (see [`CategoryValue`]
/// ordering), so the same data always produces the same layout. Slot `i`
/// spans `[i * step, (i + 1) * step]` and elements are centered in their slot.
///
/// # Config Options
///
/// - **step** (f64): Width of every slot. Must be positive and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<CategoryValue>,
    step: f64,
}

impl BandScale {
    pub fn try_new<'a>(
        values: impl IntoIterator<Item = &'a CategoryValue>,
        step: f64,
    ) -> Result<Self, XrScaleError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(XrScaleError::InvalidExtent(step));
        }
        let domain = unique_sorted(values);
        if domain.is_empty() {
            return Err(XrScaleError::EmptyDomain);
        }
        Ok(Self { domain, step })
    }

    /// Build a scale whose slots together fill `extent`
    pub fn try_new_fill<'a>(
        values: impl IntoIterator<Item = &'a CategoryValue>,
        extent: f64,
    ) -> Result<Self, XrScaleError> {
        let domain = unique_sorted(values);
        if domain.is_empty() {
            return Err(XrScaleError::EmptyDomain);
        }
        let step = extent / domain.len() as f64;
        if !(step.is_finite() && step > 0.0) {
            return Err(XrScaleError::InvalidExtent(extent));
        }
        Ok(Self { domain, step })
    }

    pub fn domain(&self) -> &[CategoryValue] {
        &self.domain
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Total length covered by all slots
    pub fn extent(&self) -> f64 {
        self.step * self.domain.len() as f64
    }

    pub fn index_of(&self, value: &CategoryValue) -> Result<usize, XrScaleError> {
        self.domain
            .binary_search(value)
            .map_err(|_| XrScaleError::DomainValueNotFound(value.to_string()))
    }

    /// Center of the slot holding `value`
    pub fn center(&self, value: &CategoryValue) -> Result<f64, XrScaleError> {
        let index = self.index_of(value)?;
        Ok(self.step / 2.0 + self.step * index as f64)
    }

    /// Slot centers in domain order
    pub fn centers(&self) -> Vec<f64> {
        (0..self.domain.len())
            .map(|i| self.step / 2.0 + self.step * i as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_centers_follow_sort_order() -> Result<(), XrScaleError> {
        let values = vec![
            CategoryValue::text("y"),
            CategoryValue::text("x"),
            CategoryValue::text("y"),
        ];
        let scale = BandScale::try_new(&values, 0.5)?;
        assert_eq!(scale.domain().len(), 2);
        assert_approx_eq!(f64, scale.center(&CategoryValue::text("x"))?, 0.25);
        assert_approx_eq!(f64, scale.center(&CategoryValue::text("y"))?, 0.75);
        assert_approx_eq!(f64, scale.extent(), 1.0);
        Ok(())
    }

    #[test]
    fn test_fill_extent() -> Result<(), XrScaleError> {
        let values = vec![
            CategoryValue::number(3.0),
            CategoryValue::number(1.0),
            CategoryValue::number(2.0),
            CategoryValue::number(4.0),
        ];
        let scale = BandScale::try_new_fill(&values, 4.0)?;
        assert_approx_eq!(f64, scale.step(), 1.0);
        assert_eq!(scale.centers(), vec![0.5, 1.5, 2.5, 3.5]);
        Ok(())
    }

    #[test]
    fn test_missing_value() -> Result<(), XrScaleError> {
        let values = vec![CategoryValue::text("a")];
        let scale = BandScale::try_new(&values, 1.0)?;
        assert_eq!(
            scale.center(&CategoryValue::text("b")),
            Err(XrScaleError::DomainValueNotFound("b".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_empty_domain() {
        let values: Vec<CategoryValue> = vec![];
        assert_eq!(
            BandScale::try_new(&values, 1.0),
            Err(XrScaleError::EmptyDomain)
        );
    }
}
