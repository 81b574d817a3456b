//! Per-cell cube geometry in model space.
//!
//! Each axis vector contributes only its diagonal component (`|u.x|`,
//! `|v.y|`, `|w.z|`). Skewed volumes are therefore meshed as if they were
//! axis aligned.

use glam::DVec3;

use crate::grid::Grid;

/// Corner sign pattern, in the order faces refer to them (corner `n` of a
/// face pattern is `CORNER_SIGNS[n - 1]`).
///
/// ```text
///        4 ───── 8          z
///       /│      /│          │  y
///      1 ───── 5 │          │ /
///      │ 3 ────│─ 7         │/
///      │/      │/           └──── x
///      2 ───── 6
/// ```
pub const CORNER_SIGNS: [[f64; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

/// Center and half-extent of one sampled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub center: DVec3,
    pub half: DVec3,
}

impl CellGeometry {
    /// Geometry of cell `(i, j, k)` when walking the grid with `stride`.
    ///
    /// The cube is centred on the sample position itself
    /// (`origin + i/nx * |u.x|`, ...) and spans `stride` cells per axis.
    pub fn new(grid: &Grid, i: usize, j: usize, k: usize, stride: usize) -> Self {
        let [nx, ny, nz] = grid.dims();
        let dims = DVec3::new(nx as f64, ny as f64, nz as f64);
        let extent = DVec3::new(
            grid.axis_u().x.abs(),
            grid.axis_v().y.abs(),
            grid.axis_w().z.abs(),
        );
        let index = DVec3::new(i as f64, j as f64, k as f64);

        let center = grid.origin() + index / dims * extent;
        let half = stride as f64 * extent / dims / 2.0;
        Self { center, half }
    }

    /// The 8 corners in [`CORNER_SIGNS`] order.
    pub fn corners(&self) -> [DVec3; 8] {
        CORNER_SIGNS.map(|sign| self.center + DVec3::from_array(sign) * self.half)
    }
}

/// Corners of cell `(i, j, k)`; see [`CellGeometry`].
pub fn cell_corners(grid: &Grid, i: usize, j: usize, k: usize, stride: usize) -> [DVec3; 8] {
    CellGeometry::new(grid, i, j, k, stride).corners()
}
