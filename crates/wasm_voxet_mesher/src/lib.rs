//! WASM bindings for the voxet mesher.
//!
//! Provides JavaScript-accessible functions producing flat buffers for
//! Three.js style `BufferGeometry`.

use glam::DVec3;
use js_sys::Float32Array;
use voxet_mesher::{
    extract_voxet, CubePolicy, ExtractOptions, Grid, Logging, MeshError, Palette, Rgba, VoxetMesh,
};
use wasm_bindgen::prelude::*;

/// Install the panic hook so Rust panics show up in the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
}

/// Voxet mesh returned to JavaScript.
#[wasm_bindgen]
pub struct VoxetMeshResult {
    positions: Vec<f32>,
    indices: Vec<u32>,
    colors: Vec<f32>,
    truncated: bool,
}

#[wasm_bindgen]
impl VoxetMeshResult {
    /// Get vertex positions (3 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Get triangle indices (0-based, two triangles per quad).
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    /// Get per-vertex colours (4 floats per vertex).
    #[wasm_bindgen(getter)]
    pub fn colors(&self) -> Vec<f32> {
        self.colors.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether extraction stopped at the vertex cap.
    #[wasm_bindgen(getter)]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl TryFrom<VoxetMesh> for VoxetMeshResult {
    type Error = String;

    fn try_from(output: VoxetMesh) -> Result<Self, Self::Error> {
        let VoxetMesh { mesh, palette } = output;
        let indices = mesh
            .triangle_indices()
            .ok_or_else(|| format!("mesh has {} vertices, too many for 32-bit indices", mesh.vertex_count()))?;

        // Every corner of a cell shares its cell's colour.
        let mut vertex_colours: Vec<Rgba> = Vec::with_capacity(mesh.vertices().len());
        for group in mesh.cell_groups() {
            let colour = palette.colour(group.bucket).unwrap_or(Rgba::TRANSPARENT);
            vertex_colours.extend(std::iter::repeat(colour).take(8));
        }

        Ok(Self {
            positions: mesh.positions_f32(),
            indices,
            colors: bytemuck::cast_slice(&vertex_colours).to_vec(),
            truncated: mesh.is_truncated(),
        })
    }
}

fn mesh_error(err: MeshError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn vec3(components: &[f64], name: &str) -> Result<DVec3, String> {
    match components {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("{name} must have 3 components, got {}", components.len())),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_result(
    samples: &[f64],
    nx: u32,
    ny: u32,
    nz: u32,
    origin: &[f64],
    axis_u: &[f64],
    axis_v: &[f64],
    axis_w: &[f64],
    stride: u32,
    full_cubes: bool,
) -> Result<VoxetMeshResult, String> {
    let dims = [nx as usize, ny as usize, nz as usize];
    let axes = [vec3(axis_u, "axis_u")?, vec3(axis_v, "axis_v")?, vec3(axis_w, "axis_w")?];
    let grid = Grid::new(dims, vec3(origin, "origin")?, axes, samples.to_vec())
        .map_err(|e| e.to_string())?;

    let policy = if full_cubes { CubePolicy::FullCube } else { CubePolicy::BoundaryOnly };
    let options = ExtractOptions::default()
        .with_stride(stride as usize)
        .with_policy(policy)
        .with_logging(Logging::Off);

    let output = extract_voxet(&grid, &options).map_err(|e| e.to_string())?;
    log(&format!(
        "voxet {nx}x{ny}x{nz}: {} vertices, {} faces{}",
        output.mesh.vertex_count(),
        output.mesh.face_count(),
        if output.mesh.is_truncated() { " (truncated)" } else { "" }
    ));
    VoxetMeshResult::try_from(output)
}

/// Mesh a voxet into false-colour cubes.
///
/// # Arguments
/// * `samples` - Flat sample array, X-major order
/// * `nx`, `ny`, `nz` - Grid dimensions
/// * `origin`, `axis_u`, `axis_v`, `axis_w` - 3-component vectors
/// * `stride` - Grid step (1 = every cell)
/// * `full_cubes` - Emit all 6 faces per cell instead of the outer shell only
///
/// # Example (JavaScript)
/// ```javascript
/// const samples = new Float64Array([0.0, 10.0]);
/// const result = mesh_voxet(samples, 2, 1, 1, [0, 0, 0], [2, 0, 0], [0, 1, 0], [0, 0, 1], 1, true);
/// ```
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn mesh_voxet(
    samples: &[f64],
    nx: u32,
    ny: u32,
    nz: u32,
    origin: &[f64],
    axis_u: &[f64],
    axis_v: &[f64],
    axis_w: &[f64],
    stride: u32,
    full_cubes: bool,
) -> Result<VoxetMeshResult, JsValue> {
    build_result(samples, nx, ny, nz, origin, axis_u, axis_v, axis_w, stride, full_cubes)
        .map_err(|msg| JsValue::from_str(&msg))
}

/// The computed false-colour palette as flat RGBA floats.
#[wasm_bindgen]
pub fn false_colour_palette(bucket_count: u32) -> Result<Float32Array, JsValue> {
    let palette = Palette::computed(bucket_count as usize).map_err(mesh_error)?;
    Ok(Float32Array::from(palette.rgba_f32().as_slice()))
}

// Logging support

thread_local! {
    static LOG_ENABLED: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Enable or disable console logging.
#[wasm_bindgen]
pub fn set_log_enabled(enabled: bool) {
    LOG_ENABLED.with(|flag| flag.set(enabled));
}

fn log(message: &str) {
    if LOG_ENABLED.with(|enabled| enabled.get()) {
        web_sys::console::log_1(&message.into());
    }
}

/// Get the version of the mesher library.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
