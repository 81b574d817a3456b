//! False-colour palette engine.
//!
//! Scalars are quantized into an ordered set of colour buckets, and each
//! bucket is coloured from a fixed low-saturation rainbow ramp:
//!
//! ```text
//! hue:    0.0 ─────── 0.25 ─────── 0.5 ─────── 0.75 ─────── 1.0
//! held:       R = SAT      G = SAT      G = SAT      B = SAT
//! moving:     G ↑          R ↓          B ↑          G ↓
//! ```
//!
//! Hue runs from the top of the range (0.0) to the bottom (1.0), so high values
//! come out red and low values blue. Colours must stay bit-stable; downstream
//! snapshot comparisons depend on them.

use crate::core::{BucketId, Rgba, MAX_BUCKETS};
use crate::error::{MeshError, MeshResult};

/// Ramp saturation.
pub const SAT: f64 = 0.8;

/// Floor of the moving channels (`SAT * (1 - SAT)`).
pub const VMIN: f64 = SAT * (1.0 - SAT);

/// Value ranges narrower than this collapse to bucket 0.
pub const RANGE_EPSILON: f64 = 1e-7;

/// Whether a value is the "no valid data" extreme.
///
/// Non-finite values are treated the same way.
#[inline]
pub fn is_sentinel(value: f64) -> bool {
    !value.is_finite() || value.abs() == f64::MAX
}

/// Quantize `value` into `0..bucket_count`.
///
/// `value` is expected to lie within `[min, max]`; values outside it clamp to
/// the nearest end bucket. Sentinels, or a range narrower than
/// [`RANGE_EPSILON`], map to bucket 0.
///
/// # Example
/// ```
/// use voxet_mesher::palette::bucket_of;
///
/// assert_eq!(bucket_of(0.0, 0.0, 10.0, 256), 0);
/// assert_eq!(bucket_of(10.0, 0.0, 10.0, 256), 255);
/// assert_eq!(bucket_of(5.0, 3.0, 3.0, 256), 0);
/// ```
pub fn bucket_of(value: f64, min: f64, max: f64, bucket_count: usize) -> BucketId {
    if is_sentinel(value) || is_sentinel(min) || is_sentinel(max) {
        return 0;
    }
    let range = max - min;
    if !(range > RANGE_EPSILON) {
        return 0;
    }
    let top = bucket_count.saturating_sub(1) as f64;
    let raw = (top * (value - min) / range).floor();
    raw.clamp(0.0, top) as BucketId
}

/// Bucket for index data (rock types, classes) looked up in a provided table.
///
/// The bucket is the integer offset of `value` from `min`. Sentinels and
/// offsets outside the table fall back to bucket 0.
pub fn indexed_bucket(value: f64, min: f64, table_len: usize) -> BucketId {
    if is_sentinel(value) || is_sentinel(min) {
        return 0;
    }
    let offset = value.trunc() as i64 - min.trunc() as i64;
    match usize::try_from(offset) {
        Ok(idx) if idx < table_len => idx as BucketId,
        _ => 0,
    }
}

/// Linear interpolation of `x` from `[xmin, xmax]` onto `[ymin, ymax]`.
#[inline]
fn lerp(x: f64, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> f64 {
    (x - xmin) / (xmax - xmin) * (ymax - ymin) + ymin
}

/// Map `position` within `[range_min, range_max]` onto the false-colour ramp.
///
/// Positions outside the range (and NaN) return [`Rgba::TRANSPARENT`].
/// A zero-width range is treated as hue 0.
pub fn colour_of(position: f64, range_min: f64, range_max: f64) -> Rgba {
    if position.is_nan() || position < range_min || position > range_max {
        return Rgba::TRANSPARENT;
    }
    let width = range_max - range_min;
    let hue = if width > 0.0 { (range_max - position) / width } else { 0.0 };

    let (r, g, b) = if hue < 0.25 {
        (SAT, lerp(hue, 0.0, 0.25, VMIN, SAT), VMIN)
    } else if hue < 0.5 {
        (lerp(hue, 0.25, 0.5, SAT, VMIN), SAT, VMIN)
    } else if hue < 0.75 {
        (VMIN, SAT, lerp(hue, 0.5, 0.75, VMIN, SAT))
    } else {
        (VMIN, lerp(hue, 0.75, 1.0, SAT, VMIN), SAT)
    };

    Rgba::new(r as f32, g as f32, b as f32, 1.0)
}

/// One entry of a provided colour table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub colour: Rgba,
    /// Class name (rock type etc.), if the source supplies one.
    pub label: Option<String>,
}

impl PaletteEntry {
    pub fn new(colour: Rgba) -> Self {
        Self { colour, label: None }
    }

    pub fn labelled(colour: Rgba, label: impl Into<String>) -> Self {
        Self {
            colour,
            label: Some(label.into()),
        }
    }
}

/// Bucket-to-colour mapping.
///
/// `Computed` comes from the ramp and depends only on the bucket count.
/// `Provided` is an external table for index data and bypasses the ramp.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    Computed(Vec<Rgba>),
    Provided(Vec<PaletteEntry>),
}

impl Palette {
    /// Generate the ramp palette: entry `i` is `colour_of(i, 0, bucket_count)`.
    ///
    /// # Example
    /// ```
    /// use voxet_mesher::palette::Palette;
    ///
    /// let palette = Palette::computed(256).unwrap();
    /// assert_eq!(palette.len(), 256);
    /// assert_eq!(palette.colour(0).unwrap().a, 1.0);
    /// ```
    pub fn computed(bucket_count: usize) -> MeshResult<Self> {
        if bucket_count == 0 || bucket_count > MAX_BUCKETS {
            return Err(MeshError::InvalidBucketCount(bucket_count));
        }
        let top = bucket_count as f64;
        let colours = (0..bucket_count)
            .map(|idx| colour_of(idx as f64, 0.0, top))
            .collect();
        Ok(Self::Computed(colours))
    }

    /// Wrap an external colour table.
    pub fn provided(entries: Vec<PaletteEntry>) -> MeshResult<Self> {
        if entries.is_empty() {
            return Err(MeshError::EmptyPalette);
        }
        if entries.len() > MAX_BUCKETS {
            return Err(MeshError::InvalidBucketCount(entries.len()));
        }
        Ok(Self::Provided(entries))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Computed(colours) => colours.len(),
            Self::Provided(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_provided(&self) -> bool {
        matches!(self, Self::Provided(_))
    }

    /// Colour of a bucket, `None` past the end of the palette.
    pub fn colour(&self, bucket: BucketId) -> Option<Rgba> {
        let idx = bucket as usize;
        match self {
            Self::Computed(colours) => colours.get(idx).copied(),
            Self::Provided(entries) => entries.get(idx).map(|e| e.colour),
        }
    }

    /// Label of a bucket (provided tables only).
    pub fn label(&self, bucket: BucketId) -> Option<&str> {
        match self {
            Self::Computed(_) => None,
            Self::Provided(entries) => entries.get(bucket as usize)?.label.as_deref(),
        }
    }

    /// All colours in bucket order.
    pub fn colours(&self) -> Vec<Rgba> {
        match self {
            Self::Computed(colours) => colours.clone(),
            Self::Provided(entries) => entries.iter().map(|e| e.colour).collect(),
        }
    }

    /// Colours flattened to RGBA `f32` quadruples.
    pub fn rgba_f32(&self) -> Vec<f32> {
        bytemuck::cast_slice(&self.colours()).to_vec()
    }

    /// Bucket for `value` given the volume's `[min, max]` range.
    pub fn bucket_for(&self, value: f64, min: f64, max: f64) -> BucketId {
        match self {
            Self::Computed(colours) => bucket_of(value, min, max, colours.len()),
            Self::Provided(entries) => indexed_bucket(value, min, entries.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOL: f32 = 1e-6;

    fn assert_rgba(c: Rgba, expected: [f32; 4]) {
        for (got, want) in c.to_array().iter().zip(expected) {
            assert!((got - want).abs() < TOL, "got {c:?}, expected {expected:?}");
        }
    }

    #[test]
    fn bucket_endpoints() {
        assert_eq!(bucket_of(0.0, 0.0, 10.0, 256), 0);
        assert_eq!(bucket_of(10.0, 0.0, 10.0, 256), 255);
        assert_eq!(bucket_of(5.0, 0.0, 10.0, 256), 127);
        assert_eq!(bucket_of(7.0, 0.0, 10.0, 1), 0);
    }

    #[test]
    fn bucket_degenerate_range() {
        for value in [-3.0, 0.0, 2.5, 1e9] {
            assert_eq!(bucket_of(value, 2.5, 2.5, 256), 0);
        }
        assert_eq!(bucket_of(1.0, 1.0, 1.0 + 1e-8, 256), 0);
    }

    #[test]
    fn bucket_sentinels() {
        assert_eq!(bucket_of(f64::MAX, 0.0, 10.0, 256), 0);
        assert_eq!(bucket_of(5.0, f64::MAX, -f64::MAX, 256), 0);
        assert_eq!(bucket_of(5.0, 0.0, f64::MAX, 256), 0);
        assert_eq!(bucket_of(f64::NAN, 0.0, 10.0, 256), 0);
    }

    #[test]
    fn bucket_monotonic_and_bounded() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let min: f64 = rng.gen_range(-1e4..1e4);
            let max = min + rng.gen_range(1e-3..1e4);
            let count = rng.gen_range(1..=MAX_BUCKETS);
            let mut values: Vec<f64> = (0..50).map(|_| rng.gen_range(min..=max)).collect();
            values.push(min);
            values.push(max);
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let buckets: Vec<_> = values.iter().map(|&v| bucket_of(v, min, max, count)).collect();
            assert!(buckets.windows(2).all(|w| w[0] <= w[1]));
            assert!(buckets.iter().all(|&b| (b as usize) < count));
        }
    }

    #[test]
    fn indexed_buckets() {
        assert_eq!(indexed_bucket(3.0, 1.0, 5), 2);
        assert_eq!(indexed_bucket(1.0, 1.0, 5), 0);
        assert_eq!(indexed_bucket(6.0, 1.0, 5), 0, "past the table");
        assert_eq!(indexed_bucket(-2.0, 1.0, 5), 0, "below min");
        assert_eq!(indexed_bucket(f64::MAX, 1.0, 5), 0);
    }

    #[test]
    fn colour_out_of_range_is_transparent() {
        assert_eq!(colour_of(-0.1, 0.0, 1.0), Rgba::TRANSPARENT);
        assert_eq!(colour_of(1.1, 0.0, 1.0), Rgba::TRANSPARENT);
        assert_eq!(colour_of(f64::NAN, 0.0, 1.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn colour_range_ends() {
        // Top of range: hue 0, first band at its start.
        assert_rgba(colour_of(10.0, 0.0, 10.0), [0.8, 0.16, 0.16, 1.0]);
        // Bottom of range: hue 1, last band at its end.
        assert_rgba(colour_of(0.0, 0.0, 10.0), [0.16, 0.16, 0.8, 1.0]);
    }

    #[test]
    fn colour_band_boundaries() {
        // hue 0.25: second band, R still at SAT
        assert_rgba(colour_of(0.75, 0.0, 1.0), [0.8, 0.8, 0.16, 1.0]);
        // hue 0.5: third band start
        assert_rgba(colour_of(0.5, 0.0, 1.0), [0.16, 0.8, 0.16, 1.0]);
        // hue 0.75: fourth band start
        assert_rgba(colour_of(0.25, 0.0, 1.0), [0.16, 0.8, 0.8, 1.0]);
        // hue 0.125: halfway up G in band one
        assert_rgba(colour_of(0.875, 0.0, 1.0), [0.8, 0.48, 0.16, 1.0]);
    }

    #[test]
    fn colour_zero_width_range() {
        assert_rgba(colour_of(4.0, 4.0, 4.0), [0.8, 0.16, 0.16, 1.0]);
    }

    #[test]
    fn computed_palette() {
        let palette = Palette::computed(256).unwrap();
        assert_eq!(palette.len(), 256);
        assert!(!palette.is_provided());
        assert_eq!(palette.colour(0), Some(colour_of(0.0, 0.0, 256.0)));
        assert_eq!(palette.colour(255), Some(colour_of(255.0, 0.0, 256.0)));
        assert_eq!(palette.colour(256), None);
        assert!(palette.colours().iter().all(|c| c.a == 1.0));
        assert_eq!(palette.rgba_f32().len(), 256 * 4);
        assert_eq!(palette.label(3), None);
    }

    #[test]
    fn computed_palette_rejects_bad_counts() {
        assert_eq!(Palette::computed(0), Err(MeshError::InvalidBucketCount(0)));
        assert_eq!(Palette::computed(257), Err(MeshError::InvalidBucketCount(257)));
    }

    #[test]
    fn provided_palette() {
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let grey = Rgba::new(0.5, 0.5, 0.5, 1.0);
        let palette = Palette::provided(vec![
            PaletteEntry::labelled(red, "granite"),
            PaletteEntry::new(grey),
        ])
        .unwrap();

        assert!(palette.is_provided());
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.colour(1), Some(grey));
        assert_eq!(palette.label(0), Some("granite"));
        assert_eq!(palette.label(1), None);
        assert_eq!(palette.bucket_for(11.0, 10.0, 12.0), 1);
        assert_eq!(palette.bucket_for(12.0, 10.0, 12.0), 0);
    }

    #[test]
    fn provided_palette_rejects_empty() {
        assert_eq!(Palette::provided(Vec::new()), Err(MeshError::EmptyPalette));
    }
}
