//! Running value range over volume samples.

use crate::palette::is_sentinel;

/// Running min/max tracker feeding the palette's normalization range.
///
/// Starts "unset" at the sentinel extremes (`min = f64::MAX`,
/// `max = -f64::MAX`), so buckets computed against untouched stats fall
/// back to 0. Sentinel values and the optional no-data marker are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeStats {
    min: f64,
    max: f64,
    no_data: Option<f64>,
    observed: usize,
    ignored: usize,
}

impl Default for VolumeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeStats {
    pub fn new() -> Self {
        Self {
            min: f64::MAX,
            max: -f64::MAX,
            no_data: None,
            observed: 0,
            ignored: 0,
        }
    }

    /// Stats that also skip an explicit no-data marker.
    pub fn with_no_data(marker: f64) -> Self {
        let mut stats = Self::new();
        stats.no_data = Some(marker);
        stats
    }

    /// Fold a sample sequence into fresh stats.
    pub fn from_samples<I>(samples: I, no_data: Option<f64>) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut stats = match no_data {
            Some(marker) => Self::with_no_data(marker),
            None => Self::new(),
        };
        for value in samples {
            stats.observe(value);
        }
        stats
    }

    /// Whether `value` carries no data for these stats.
    #[inline]
    pub fn is_no_data(&self, value: f64) -> bool {
        is_sentinel(value) || self.no_data == Some(value)
    }

    /// Widen the range to include `value`.
    pub fn observe(&mut self, value: f64) {
        if self.is_no_data(value) {
            self.ignored += 1;
            return;
        }
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
        self.observed += 1;
    }

    /// Current `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether at least one valid value has been observed.
    pub fn is_set(&self) -> bool {
        self.observed > 0
    }

    /// Number of valid values observed.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Number of values skipped as no-data.
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}
