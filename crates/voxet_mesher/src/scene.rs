//! Scene-graph construction for material-per-bucket exporters.
//!
//! Formats such as glTF or COLLADA want materials, meshes and nodes declared
//! separately. [`build_scene`] splits a [`Mesh`] by colour bucket and drives a
//! caller-supplied [`SceneBuilder`]; the concrete writer lives outside this
//! crate.

use std::collections::HashMap;

use glam::DVec3;

use crate::core::{BucketId, Mesh, Rgba};
use crate::error::{MeshError, MeshResult};
use crate::palette::Palette;

/// Sink for scene elements.
pub trait SceneBuilder {
    type MaterialId: Copy;
    type MeshId: Copy;

    /// Declare the material for one colour bucket.
    fn add_material(&mut self, bucket: BucketId, colour: Rgba, label: Option<&str>) -> Self::MaterialId;

    /// Declare a triangle mesh. Indices are 0-based into `positions`.
    fn add_mesh(
        &mut self,
        name: &str,
        positions: &[DVec3],
        triangles: &[[u32; 3]],
        material: Self::MaterialId,
    ) -> Self::MeshId;

    /// Declare a node instancing `meshes`.
    fn add_node(&mut self, name: &str, meshes: &[Self::MeshId]);
}

/// Emit one material and one mesh per used bucket plus a root node named
/// `root_name` referencing every mesh.
///
/// Meshes are named `{root_name}-{bucket:03}`. Buckets missing from the
/// palette get [`Rgba::TRANSPARENT`]. A face pointing past the vertex list
/// fails with [`MeshError::InvalidFaceIndex`].
pub fn build_scene<B: SceneBuilder>(
    mesh: &Mesh,
    palette: &Palette,
    builder: &mut B,
    root_name: &str,
) -> MeshResult<()> {
    let mut mesh_ids = Vec::new();

    for (bucket, faces) in mesh.groups() {
        let colour = palette.colour(bucket).unwrap_or(Rgba::TRANSPARENT);
        let material = builder.add_material(bucket, colour, palette.label(bucket));

        let mut remap: HashMap<u64, u32> = HashMap::new();
        let mut positions = Vec::new();
        let mut triangles = Vec::with_capacity(faces.len() * 2);

        for face in faces {
            for tri in face.triangles() {
                let mut local = [0u32; 3];
                for (slot, global) in local.iter_mut().zip(tri) {
                    *slot = match remap.get(&global) {
                        Some(&idx) => idx,
                        None => {
                            let idx = u32::try_from(positions.len()).map_err(|_| {
                                MeshError::GroupTooLarge {
                                    bucket,
                                    vertices: positions.len() as u64 + 1,
                                }
                            })?;
                            let vertex = global
                                .checked_sub(1)
                                .and_then(|v| usize::try_from(v).ok())
                                .and_then(|v| mesh.vertices().get(v).copied())
                                .ok_or(MeshError::InvalidFaceIndex {
                                    index: global,
                                    vertices: mesh.vertices().len() as u64,
                                })?;
                            positions.push(vertex);
                            remap.insert(global, idx);
                            idx
                        }
                    };
                }
                triangles.push(local);
            }
        }

        let name = format!("{root_name}-{bucket:03}");
        mesh_ids.push(builder.add_mesh(&name, &positions, &triangles, material));
    }

    builder.add_node(root_name, &mesh_ids);
    Ok(())
}
