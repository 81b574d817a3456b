//! Extraction configuration.

use crate::core::{MAX_BUCKETS, MAX_VERTICES};
use crate::cull::CubePolicy;
use crate::error::{MeshError, MeshResult};

/// Cell budget the COLLADA exporter used when downsampling scalar voxets.
pub const COLLADA_CELL_LIMIT: usize = 100_000;

/// Cell budget the COLLADA exporter used for index (rock type) voxets.
pub const INDEXED_CELL_LIMIT: usize = 50_000;

/// Log output for one extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Logging {
    /// Emit nothing.
    Off,
    /// Emit `tracing` events.
    #[default]
    Tracing,
}

impl Logging {
    #[inline]
    pub fn enabled(self) -> bool {
        matches!(self, Logging::Tracing)
    }
}

/// Configuration for a single extraction pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractOptions {
    /// Grid step; 1 visits every cell.
    pub stride: usize,

    pub policy: CubePolicy,

    /// Number of ramp buckets (ignored when a provided palette is used).
    pub bucket_count: usize,

    /// Stop once the mesh holds more vertices than this.
    pub vertex_cap: u64,

    /// Skip cells whose sample is a sentinel or the grid's no-data marker
    /// instead of colouring them with bucket 0.
    pub skip_no_data: bool,

    pub logging: Logging,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            stride: 1,
            policy: CubePolicy::BoundaryOnly,
            bucket_count: MAX_BUCKETS,
            vertex_cap: MAX_VERTICES,
            skip_no_data: false,
            logging: Logging::Tracing,
        }
    }
}

impl ExtractOptions {
    /// Options emitting every face of every cell.
    pub fn full_cubes() -> Self {
        Self {
            policy: CubePolicy::FullCube,
            ..Self::default()
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_policy(mut self, policy: CubePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_vertex_cap(mut self, vertex_cap: u64) -> Self {
        self.vertex_cap = vertex_cap;
        self
    }

    pub fn with_skip_no_data(mut self, skip: bool) -> Self {
        self.skip_no_data = skip;
        self
    }

    pub fn with_logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Fail-fast configuration checks, run before any iteration.
    pub fn validate(&self) -> MeshResult<()> {
        self.validate_walk()?;
        if self.bucket_count == 0 || self.bucket_count > MAX_BUCKETS {
            return Err(MeshError::InvalidBucketCount(self.bucket_count));
        }
        Ok(())
    }

    /// Checks for the grid walk alone, leaving `bucket_count` to the caller's palette.
    pub fn validate_walk(&self) -> MeshResult<()> {
        if self.stride == 0 {
            return Err(MeshError::InvalidStride(self.stride));
        }
        Ok(())
    }
}

/// Smallest stride `s >= 1` with `nx * ny * nz / s³ <= cell_limit`.
///
/// Large voxets are downsampled this way so output stays manageable.
/// A `cell_limit` of 0 is treated as 1.
pub fn auto_stride(dims: [usize; 3], cell_limit: usize) -> usize {
    let cells = dims.iter().map(|&d| d as f64).product::<f64>();
    let limit = cell_limit.max(1) as f64;
    let mut stride = 1usize;
    while cells / (stride as f64).powi(3) > limit {
        stride += 1;
    }
    stride
}
