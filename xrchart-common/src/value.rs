use serde::{Deserialize, Serialize};

/// A mark attribute that is either shared by every instance or given per instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarOrArray<T: Sync + Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Sync + Clone> ScalarOrArray<T> {
    pub fn as_iter<'a>(&'a self, scalar_len: usize) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(scalar_len)),
            ScalarOrArray::Array(values) => Box::new(values.iter()),
        }
    }

    pub fn as_vec(&self, scalar_len: usize) -> Vec<T> {
        self.as_iter(scalar_len).cloned().collect::<Vec<_>>()
    }

    /// Whether the attribute is consistent with a mark of `len` instances
    pub fn fits_len(&self, len: usize) -> bool {
        match self {
            ScalarOrArray::Scalar(_) => true,
            ScalarOrArray::Array(values) => values.len() == len,
        }
    }
}

impl<T: Sync + Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Sync + Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_repeats() {
        let v = ScalarOrArray::Scalar(1.5);
        assert_eq!(v.as_vec(3), vec![1.5, 1.5, 1.5]);
        assert!(v.fits_len(42));
    }

    #[test]
    fn test_array_ignores_scalar_len() {
        let v: ScalarOrArray<i32> = vec![1, 2].into();
        assert_eq!(v.as_vec(10), vec![1, 2]);
        assert!(!v.fits_len(3));
    }
}
