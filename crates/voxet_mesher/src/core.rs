//! Core type definitions for the voxet mesher.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use std::collections::BTreeMap;

/// Colour bucket identifier (index into a [`Palette`](crate::palette::Palette)).
pub type BucketId = u16;

/// Maximum number of palette entries.
pub const MAX_BUCKETS: usize = 256;

/// Hard cap on the number of vertices a single extraction may emit.
pub const MAX_VERTICES: u64 = 99_999_999_999;

/// Vertices emitted per visited cell (one per cube corner).
pub const CORNERS_PER_CELL: u64 = 8;

/// RGBA colour with components in `[0, 1]`.
///
/// `#[repr(C)]` so palettes can be handed to GPU/JS buffers as flat `f32` slices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black, returned for out-of-range ramp positions.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A quad face: four 1-based vertex sequence numbers plus its colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [u64; 4],
    pub bucket: BucketId,
}

impl Face {
    /// Split the quad into two triangles `(a, b, c)` and `(a, c, d)`.
    ///
    /// Winding is preserved, indices stay 1-based.
    #[inline]
    pub fn triangles(&self) -> [[u64; 3]; 2] {
        let [a, b, c, d] = self.indices;
        [[a, b, c], [a, c, d]]
    }
}

/// The faces and vertices contributed by one emitting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGroup {
    /// Vertex count before this cell was appended (its index offset).
    pub vertex_offset: u64,
    /// Index of the cell's first face in [`Mesh::faces`].
    pub first_face: usize,
    /// Number of faces the cell emitted (1..=6).
    pub face_count: usize,
    pub bucket: BucketId,
}

/// Format-agnostic output mesh.
///
/// Vertices and faces are append-only. Faces reference vertices by 1-based
/// sequence number, the convention used by OBJ writers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<DVec3>,
    pub(crate) faces: Vec<Face>,
    pub(crate) cell_groups: Vec<CellGroup>,
    pub(crate) next_vertex_offset: u64,
    pub(crate) truncated: bool,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model-space vertex positions in emission order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Per-cell grouping, in emission order.
    pub fn cell_groups(&self) -> &[CellGroup] {
        &self.cell_groups
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> u64 {
        self.next_vertex_offset
    }

    /// Number of quad faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles once every quad is split.
    pub fn triangle_count(&self) -> usize {
        self.faces.len() * 2
    }

    /// Whether extraction stopped early at the vertex cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces grouped by colour bucket, in ascending bucket order.
    pub fn groups(&self) -> BTreeMap<BucketId, Vec<&Face>> {
        let mut groups: BTreeMap<BucketId, Vec<&Face>> = BTreeMap::new();
        for face in &self.faces {
            groups.entry(face.bucket).or_default().push(face);
        }
        groups
    }

    /// Distinct buckets referenced by at least one face, ascending.
    pub fn used_buckets(&self) -> Vec<BucketId> {
        self.groups().into_keys().collect()
    }

    /// Check that every face index refers to an existing vertex.
    pub fn validate(&self) -> bool {
        let count = self.vertices.len() as u64;
        count == self.next_vertex_offset
            && self
                .faces
                .iter()
                .all(|face| face.indices.iter().all(|&idx| idx >= 1 && idx <= count))
    }

    /// Vertex positions flattened to `f32` triples for GPU/web upload.
    pub fn positions_f32(&self) -> Vec<f32> {
        let points: Vec<[f32; 3]> = self
            .vertices
            .iter()
            .map(|v| v.as_vec3().to_array())
            .collect();
        bytemuck::cast_slice(&points).to_vec()
    }

    /// 0-based triangle indices (two triangles per quad).
    ///
    /// Meshes past `u32::MAX` vertices cannot be expressed this way and
    /// yield `None`.
    pub fn triangle_indices(&self) -> Option<Vec<u32>> {
        let mut out = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            for tri in face.triangles() {
                for idx in tri {
                    out.push(u32::try_from(idx - 1).ok()?);
                }
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> Mesh {
        Mesh {
            vertices: vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![
                Face { indices: [1, 2, 3, 4], bucket: 7 },
                Face { indices: [4, 3, 2, 1], bucket: 2 },
            ],
            cell_groups: Vec::new(),
            next_vertex_offset: 4,
            truncated: false,
        }
    }

    #[test]
    fn face_triangles_preserve_winding() {
        let face = Face { indices: [5, 6, 7, 8], bucket: 0 };
        assert_eq!(face.triangles(), [[5, 6, 7], [5, 7, 8]]);
    }

    #[test]
    fn mesh_counts() {
        let mesh = quad_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(!mesh.is_empty());
        assert!(mesh.validate());
    }

    #[test]
    fn groups_are_ordered_by_bucket() {
        let mesh = quad_mesh();
        let groups = mesh.groups();
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![2, 7]);
        assert_eq!(mesh.used_buckets(), vec![2, 7]);
        assert_eq!(groups[&7][0].indices, [1, 2, 3, 4]);
    }

    #[test]
    fn validate_rejects_dangling_index() {
        let mut mesh = quad_mesh();
        mesh.faces.push(Face { indices: [1, 2, 3, 5], bucket: 0 });
        assert!(!mesh.validate());

        let mut mesh = quad_mesh();
        mesh.faces.push(Face { indices: [0, 1, 2, 3], bucket: 0 });
        assert!(!mesh.validate());
    }

    #[test]
    fn flattened_buffers() {
        let mesh = quad_mesh();
        let positions = mesh.positions_f32();
        assert_eq!(positions.len(), 12);
        assert_eq!(&positions[3..6], &[1.0, 0.0, 0.0]);

        let indices = mesh.triangle_indices().expect("fits in u32");
        assert_eq!(&indices[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(indices.len(), 12);
    }

    #[test]
    fn rgba_casts_to_flat_floats() {
        let colours = [Rgba::new(0.1, 0.2, 0.3, 1.0), Rgba::TRANSPARENT];
        let flat: &[f32] = bytemuck::cast_slice(&colours);
        assert_eq!(flat, &[0.1, 0.2, 0.3, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
