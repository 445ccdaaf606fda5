use crate::error::XrScaleError;
use crate::scales::point::linspace;

/// Linear scale mapping signed values to signed offsets from a zero baseline.
///
/// Values are scaled so that the bars drawn from the baseline to each value
/// fit inside `max_extent`. The scale factor depends on the sign of the data:
///
/// - all values negative: `max_extent / |min|`
/// - all values positive: `max_extent / max`
/// - mixed signs (or a zero bound): `max_extent / (max - min)`
/// - every value equal and non-zero: `max_extent / |value|`
///
/// [`ExtentScale::offset`] returns the *center* of the bar (half of the scaled
/// value), and [`ExtentScale::extent`] returns its full length. When every
/// value is zero there is no factor and every element has zero length.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtentScale {
    min: f64,
    max: f64,
    max_extent: f64,
    factor: Option<f64>,
}

impl ExtentScale {
    pub fn try_new(values: &[f64], max_extent: f64) -> Result<Self, XrScaleError> {
        if !(max_extent.is_finite() && max_extent > 0.0) {
            return Err(XrScaleError::InvalidExtent(max_extent));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(XrScaleError::NonFiniteValue(*bad));
        }
        let min = values
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or(XrScaleError::EmptyDomain)?;
        let max = values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(XrScaleError::EmptyDomain)?;

        let range = max - min;
        let factor = if range == 0.0 {
            (max != 0.0).then(|| max_extent / max.abs())
        } else if max < 0.0 {
            Some(max_extent / -min)
        } else if min > 0.0 {
            Some(max_extent / max)
        } else {
            Some(max_extent / range)
        };

        Ok(Self {
            min,
            max,
            max_extent,
            factor,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn max_extent(&self) -> f64 {
        self.max_extent
    }

    pub fn scale_factor(&self) -> Option<f64> {
        self.factor
    }

    /// Signed center offset of the element for `value`
    pub fn offset(&self, value: f64) -> f64 {
        match self.factor {
            Some(factor) => value * factor / 2.0,
            None => 0.0,
        }
    }

    /// Full (unsigned) length of the element for `value`
    pub fn extent(&self, value: f64) -> f64 {
        2.0 * self.offset(value).abs()
    }

    /// Translation that moves every element to the non-negative side.
    ///
    /// Zero when no offset is negative, otherwise twice the magnitude of the
    /// smallest offset, which places the zero baseline at `|min| * factor`.
    pub fn baseline_shift(&self) -> f64 {
        let min_offset = self.offset(self.min);
        if min_offset < 0.0 {
            2.0 * min_offset.abs()
        } else {
            0.0
        }
    }

    /// Data value corresponding to a distance `position` from the baseline
    pub fn value_at(&self, position: f64) -> f64 {
        match self.factor {
            Some(factor) => position / factor,
            None => 0.0,
        }
    }

    /// `count` evenly spaced ticks from `max_extent / count` to `max_extent`,
    /// as `(position, value)` pairs. `baseline` is where the value zero sits
    /// along the axis (see [`ExtentScale::baseline_shift`]).
    pub fn ticks(&self, count: usize, baseline: f64) -> Vec<(f64, f64)> {
        if count == 0 {
            return vec![];
        }
        linspace(self.max_extent / count as f64, self.max_extent, count)
            .into_iter()
            .map(|position| (position, self.value_at(position - baseline)))
            .collect()
    }
}
