//! Error types for voxet meshing.

use thiserror::Error;

use crate::core::BucketId;

/// Result type alias for voxet meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors surfaced by grid construction and extraction.
///
/// Degenerate values and vertex-cap truncation are not errors; they are
/// handled locally with fallback buckets or reported on the mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A grid dimension is zero.
    #[error("grid dimensions must all be >= 1 (got {dims:?})")]
    InvalidDimensions { dims: [usize; 3] },

    /// Sample array length disagrees with the declared dimensions.
    #[error("expected {expected} samples for the declared dimensions, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Bucket count outside `1..=MAX_BUCKETS`.
    #[error("bucket count must be between 1 and 256 (got {0})")]
    InvalidBucketCount(usize),

    /// Stride of zero.
    #[error("stride must be >= 1 (got {0})")]
    InvalidStride(usize),

    /// Sample lookup outside the grid.
    #[error("sample ({i}, {j}, {k}) is outside grid dimensions {dims:?}")]
    SampleOutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        dims: [usize; 3],
    },

    /// A provided colour table has no entries.
    #[error("provided colour table is empty")]
    EmptyPalette,

    /// A face refers to a vertex the mesh does not hold.
    #[error("face index {index} is outside the mesh's {vertices} vertices")]
    InvalidFaceIndex { index: u64, vertices: u64 },

    /// A bucket group has more vertices than 32-bit local indices can address.
    #[error("bucket {bucket} group has {vertices} vertices, more than u32 indices allow")]
    GroupTooLarge { bucket: BucketId, vertices: u64 },
}

impl MeshError {
    #[must_use]
    pub const fn invalid_dimensions(dims: [usize; 3]) -> Self {
        Self::InvalidDimensions { dims }
    }

    #[must_use]
    pub const fn out_of_bounds(i: usize, j: usize, k: usize, dims: [usize; 3]) -> Self {
        Self::SampleOutOfBounds { i, j, k, dims }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeshError::invalid_dimensions([0, 2, 2]);
        assert!(format!("{err}").contains("[0, 2, 2]"));

        let err = MeshError::SampleCountMismatch { expected: 8, actual: 7 };
        assert!(format!("{err}").contains("expected 8"));

        let err = MeshError::out_of_bounds(3, 0, 0, [2, 1, 1]);
        assert!(format!("{err}").contains("(3, 0, 0)"));

        let err = MeshError::InvalidFaceIndex { index: 9, vertices: 8 };
        assert!(format!("{err}").contains("index 9"));

        let err = MeshError::InvalidBucketCount(0);
        assert!(format!("{err}").contains("got 0"));
    }
}
