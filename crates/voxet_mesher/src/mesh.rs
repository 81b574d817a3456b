//! Main extraction pipeline.
//!
//! Walks the grid cell by cell and orchestrates:
//! 1. Binning (sample → colour bucket)
//! 2. Cell geometry (sample → 8 cube corners)
//! 3. Face selection (policy → visible faces, enclosed cells dropped)
//! 4. Accumulation into a [`Mesh`]
//!
//! Walk order is `k`, then `j`, then `i`, each stepping by the stride. Vertex
//! emission order follows it exactly and is relied on by golden-file output.

use glam::DVec3;

use crate::core::{BucketId, CellGroup, Face, Mesh, CORNERS_PER_CELL};
use crate::cull::{is_enclosed, visible_faces, CubePolicy, FaceDir, FaceList};
use crate::error::MeshResult;
use crate::geometry::cell_corners;
use crate::grid::Grid;
use crate::options::ExtractOptions;
use crate::palette::{bucket_of, is_sentinel, Palette};
use crate::stats::VolumeStats;

/// Append-only mesh builder with a vertex cap.
///
/// Each emitting cell contributes its 8 corners and then its faces, whose
/// indices are the running vertex offset plus the face's corner pattern.
#[derive(Debug, Clone)]
pub struct MeshAccumulator {
    mesh: Mesh,
    vertex_cap: u64,
}

impl MeshAccumulator {
    pub fn new(vertex_cap: u64) -> Self {
        Self {
            mesh: Mesh::new(),
            vertex_cap,
        }
    }

    /// Append one cell. Cells with no visible faces add nothing.
    ///
    /// Returns whether the cell was emitted.
    pub fn push_cell(&mut self, corners: &[DVec3; 8], faces: &FaceList, bucket: BucketId) -> bool {
        if faces.is_empty() {
            return false;
        }

        let offset = self.mesh.next_vertex_offset;
        let first_face = self.mesh.faces.len();

        self.mesh.vertices.extend_from_slice(corners);
        for face in faces.iter() {
            self.mesh.faces.push(Face {
                indices: face.corners().map(|corner| offset + corner),
                bucket,
            });
        }
        self.mesh.cell_groups.push(CellGroup {
            vertex_offset: offset,
            first_face,
            face_count: faces.len(),
            bucket,
        });
        self.mesh.next_vertex_offset += CORNERS_PER_CELL;
        true
    }

    /// Whether the running vertex count has passed the cap.
    #[inline]
    pub fn over_cap(&self) -> bool {
        self.mesh.next_vertex_offset > self.vertex_cap
    }

    pub fn vertex_count(&self) -> u64 {
        self.mesh.next_vertex_offset
    }

    /// Mark the mesh as cut short at the cap.
    pub fn truncate(&mut self) {
        self.mesh.truncated = true;
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Mesh plus the palette its buckets index into.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxetMesh {
    pub mesh: Mesh,
    pub palette: Palette,
}

/// Extract a false-colour mesh, binning against `stats` into
/// `options.bucket_count` ramp buckets.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use voxet_mesher::{extract, ExtractOptions, Grid};
///
/// let grid = Grid::new(
///     [2, 1, 1],
///     DVec3::ZERO,
///     [DVec3::new(2.0, 0.0, 0.0), DVec3::Y, DVec3::Z],
///     vec![0.0, 10.0],
/// ).unwrap();
///
/// let mesh = extract(&grid, &grid.stats(), &ExtractOptions::full_cubes()).unwrap();
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.used_buckets(), vec![0, 255]);
/// ```
pub fn extract(grid: &Grid, stats: &VolumeStats, options: &ExtractOptions) -> MeshResult<Mesh> {
    options.validate()?;
    let (min, max) = stats.range();
    let count = options.bucket_count;
    walk(grid, stats, options, |value| bucket_of(value, min, max, count))
}

/// Extract using `palette`'s binning.
///
/// A provided palette bins index data by integer offset from `stats.min()`;
/// a computed one uses the ramp with the palette's own length as the bucket
/// count. `options.bucket_count` is neither consulted nor validated.
///
/// Pair with [`CubePolicy::HideEnclosed`] for index volumes so that only the
/// outside of each class region is meshed.
pub fn extract_with_palette(
    grid: &Grid,
    stats: &VolumeStats,
    palette: &Palette,
    options: &ExtractOptions,
) -> MeshResult<Mesh> {
    options.validate_walk()?;
    let (min, max) = stats.range();
    walk(grid, stats, options, |value| palette.bucket_for(value, min, max))
}

/// One-shot extraction: stats from the grid, computed ramp palette.
pub fn extract_voxet(grid: &Grid, options: &ExtractOptions) -> MeshResult<VoxetMesh> {
    options.validate()?;
    let palette = Palette::computed(options.bucket_count)?;
    let mesh = extract(grid, &grid.stats(), options)?;
    Ok(VoxetMesh { mesh, palette })
}

fn walk<F>(grid: &Grid, stats: &VolumeStats, options: &ExtractOptions, bucket: F) -> MeshResult<Mesh>
where
    F: Fn(f64) -> BucketId,
{
    let dims = grid.dims();
    let [nx, ny, nz] = dims;
    let stride = options.stride;
    let log = options.logging.enabled();

    if log {
        tracing::debug!(
            ?dims,
            stride,
            policy = ?options.policy,
            bucket_count = options.bucket_count,
            "extracting voxet mesh"
        );
    }

    let is_no_data = |value: f64| is_sentinel(value) || grid.no_data() == Some(value);
    let mut acc = MeshAccumulator::new(options.vertex_cap);
    let mut skipped = 0usize;
    let mut enclosed = 0usize;
    let mut per_dir = [0usize; 6];

    'cells: for k in (0..nz).step_by(stride) {
        for j in (0..ny).step_by(stride) {
            for i in (0..nx).step_by(stride) {
                let value = grid.sample(i, j, k)?;

                if options.skip_no_data && is_no_data(value) {
                    skipped += 1;
                } else {
                    let faces = visible_faces(options.policy, dims, i, j, k);
                    let cell_bucket = bucket(value);
                    let hidden = options.policy == CubePolicy::HideEnclosed
                        && is_enclosed(dims, i, j, k, stride, |ni, nj, nk| {
                            grid.sample(ni, nj, nk)
                                .map_or(false, |v| !is_no_data(v) && bucket(v) == cell_bucket)
                        });

                    if hidden {
                        enclosed += 1;
                    } else if !faces.is_empty() {
                        let corners = cell_corners(grid, i, j, k, stride);
                        acc.push_cell(&corners, &faces, cell_bucket);
                        for face in faces.iter() {
                            per_dir[face as usize] += 1;
                        }
                    }
                }

                if acc.over_cap() {
                    acc.truncate();
                    break 'cells;
                }
            }
        }
    }

    let mesh = acc.finish();

    if log {
        if mesh.is_truncated() {
            tracing::warn!(
                vertices = mesh.vertex_count(),
                cap = options.vertex_cap,
                "vertex cap reached, mesh truncated"
            );
        }
        let by_direction = FaceDir::ALL
            .iter()
            .map(|&dir| format!("{}={}", dir.name(), per_dir[dir as usize]))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            groups = mesh.used_buckets().len(),
            skipped,
            enclosed,
            observed = stats.observed(),
            %by_direction,
            "voxet mesh extracted"
        );
    }

    Ok(mesh)
}
