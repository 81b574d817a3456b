//! Voxet volume description: shape, placement and samples.

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::stats::VolumeStats;

/// A regularly sampled 3D scalar volume.
///
/// Samples are stored in X-major order:
/// `samples[i + j * nx + k * nx * ny]`.
///
/// The axis vectors are full length (they span the whole volume), not unit
/// vectors. They need not be orthogonal, but meshing only uses the diagonal
/// component of each (u→x, v→y, w→z).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dims: [usize; 3],
    origin: DVec3,
    axes: [DVec3; 3],
    samples: Vec<f64>,
    no_data: Option<f64>,
}

impl Grid {
    /// Build a grid, checking dimensions against the sample count.
    ///
    /// # Example
    /// ```
    /// use glam::DVec3;
    /// use voxet_mesher::Grid;
    ///
    /// let grid = Grid::new(
    ///     [2, 1, 1],
    ///     DVec3::ZERO,
    ///     [DVec3::new(2.0, 0.0, 0.0), DVec3::Y, DVec3::Z],
    ///     vec![0.0, 10.0],
    /// ).unwrap();
    /// assert_eq!(grid.sample(1, 0, 0).unwrap(), 10.0);
    /// ```
    pub fn new(
        dims: [usize; 3],
        origin: DVec3,
        axes: [DVec3; 3],
        samples: Vec<f64>,
    ) -> MeshResult<Self> {
        if dims.iter().any(|&d| d == 0) {
            return Err(MeshError::invalid_dimensions(dims));
        }
        let expected = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .ok_or(MeshError::invalid_dimensions(dims))?;
        if expected != samples.len() {
            return Err(MeshError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            dims,
            origin,
            axes,
            samples,
            no_data: None,
        })
    }

    /// Attach the source's no-data marker.
    pub fn with_no_data(mut self, marker: f64) -> Self {
        self.no_data = Some(marker);
        self
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    pub fn axis_u(&self) -> DVec3 {
        self.axes[0]
    }

    pub fn axis_v(&self) -> DVec3 {
        self.axes[1]
    }

    pub fn axis_w(&self) -> DVec3 {
        self.axes[2]
    }

    pub fn no_data(&self) -> Option<f64> {
        self.no_data
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Total number of cells (`nx * ny * nz`).
    pub fn cell_count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    fn linear_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        (i < nx && j < ny && k < nz).then(|| i + nx * (j + ny * k))
    }

    /// Sample at cell `(i, j, k)`.
    pub fn sample(&self, i: usize, j: usize, k: usize) -> MeshResult<f64> {
        self.linear_index(i, j, k)
            .and_then(|idx| self.samples.get(idx).copied())
            .ok_or(MeshError::out_of_bounds(i, j, k, self.dims))
    }

    /// Value range over every sample, skipping sentinels and the no-data marker.
    pub fn stats(&self) -> VolumeStats {
        VolumeStats::from_samples(self.samples.iter().copied(), self.no_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> [DVec3; 3] {
        [DVec3::X, DVec3::Y, DVec3::Z]
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = Grid::new([2, 0, 1], DVec3::ZERO, axes(), Vec::new()).unwrap_err();
        assert_eq!(err, MeshError::InvalidDimensions { dims: [2, 0, 1] });
    }

    #[test]
    fn rejects_sample_count_mismatch() {
        let err = Grid::new([2, 2, 2], DVec3::ZERO, axes(), vec![0.0; 7]).unwrap_err();
        assert_eq!(err, MeshError::SampleCountMismatch { expected: 8, actual: 7 });
    }

    #[test]
    fn x_major_layout() {
        let samples: Vec<f64> = (0..24).map(f64::from).collect();
        let grid = Grid::new([2, 3, 4], DVec3::ZERO, axes(), samples).unwrap();
        assert_eq!(grid.sample(0, 0, 0).unwrap(), 0.0);
        assert_eq!(grid.sample(1, 0, 0).unwrap(), 1.0);
        assert_eq!(grid.sample(0, 1, 0).unwrap(), 2.0);
        assert_eq!(grid.sample(0, 0, 1).unwrap(), 6.0);
        assert_eq!(grid.sample(1, 2, 3).unwrap(), 23.0);
    }

    #[test]
    fn out_of_bounds_sample() {
        let grid = Grid::new([2, 1, 1], DVec3::ZERO, axes(), vec![0.0, 1.0]).unwrap();
        assert_eq!(
            grid.sample(2, 0, 0),
            Err(MeshError::out_of_bounds(2, 0, 0, [2, 1, 1]))
        );
    }

    #[test]
    fn stats_skip_no_data() {
        let grid = Grid::new([4, 1, 1], DVec3::ZERO, axes(), vec![-99.0, 2.0, 5.0, f64::MAX])
            .unwrap()
            .with_no_data(-99.0);
        let stats = grid.stats();
        assert_eq!(stats.range(), (2.0, 5.0));
        assert_eq!(stats.ignored(), 2);
    }
}
