use crate::category::{unique_sorted, CategoryValue};
use crate::error::XrScaleError;

/// Ordinal scale mapping each distinct category to a range value.
///
/// The domain is sorted, and range values are assigned cyclically: with a
/// range of length `n`, the `i`-th category receives `range[i % n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<T: Clone> {
    domain: Vec<CategoryValue>,
    range: Vec<T>,
}

impl<T: Clone> OrdinalScale<T> {
    pub fn try_new<'a>(
        values: impl IntoIterator<Item = &'a CategoryValue>,
        range: Vec<T>,
    ) -> Result<Self, XrScaleError> {
        if range.is_empty() {
            return Err(XrScaleError::EmptyRange);
        }
        let domain = unique_sorted(values);
        if domain.is_empty() {
            return Err(XrScaleError::EmptyDomain);
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> &[CategoryValue] {
        &self.domain
    }

    pub fn scale(&self, value: &CategoryValue) -> Result<&T, XrScaleError> {
        let index = self
            .domain
            .binary_search(value)
            .map_err(|_| XrScaleError::DomainValueNotFound(value.to_string()))?;
        Ok(&self.range[index % self.range.len()])
    }
}
