//! False-colour cube meshing for regularly gridded scalar volumes (voxets).
//!
//! Every sampled cell becomes a small cube coloured by quantizing its value
//! into a 256-step rainbow palette. The resulting [`Mesh`] and [`Palette`] are
//! format agnostic; OBJ, COLLADA or glTF writers consume them.
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use voxet_mesher::{extract_voxet, ExtractOptions, Grid};
//!
//! let grid = Grid::new(
//!     [1, 1, 1],
//!     DVec3::ZERO,
//!     [DVec3::X, DVec3::Y, DVec3::Z],
//!     vec![7.0],
//! ).unwrap();
//!
//! let out = extract_voxet(&grid, &ExtractOptions::full_cubes()).unwrap();
//! assert_eq!(out.mesh.vertex_count(), 8);
//! assert_eq!(out.mesh.face_count(), 6); // one cube
//! assert_eq!(out.palette.len(), 256);
//! ```

pub mod core;
pub mod cull;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mesh;
pub mod options;
pub mod palette;
pub mod scene;
pub mod stats;

// Re-export primary types
pub use crate::core::{
    BucketId,
    CellGroup,
    Face,
    Mesh,
    Rgba,
    // Constants
    CORNERS_PER_CELL, MAX_BUCKETS, MAX_VERTICES,
};
pub use crate::cull::{is_enclosed, visible_faces, CubePolicy, FaceDir, FaceList};
pub use crate::error::{MeshError, MeshResult};
pub use crate::geometry::{cell_corners, CellGeometry};
pub use crate::grid::Grid;
pub use crate::options::{auto_stride, ExtractOptions, Logging, COLLADA_CELL_LIMIT, INDEXED_CELL_LIMIT};
pub use crate::palette::{bucket_of, colour_of, Palette, PaletteEntry};
pub use crate::scene::{build_scene, SceneBuilder};
pub use crate::stats::VolumeStats;

// Re-export main entry points
pub use crate::mesh::{extract, extract_voxet, extract_with_palette, MeshAccumulator, VoxetMesh};
