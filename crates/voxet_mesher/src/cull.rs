//! Face selection per cell.
//!
//! Three policies are supported:
//! - [`CubePolicy::FullCube`] keeps all 6 faces of every visited cell.
//! - [`CubePolicy::BoundaryOnly`] assumes the volume is a solid block and keeps
//!   only faces on its outer shell. Interior value variation is not surfaced.
//! - [`CubePolicy::HideEnclosed`] keeps whole cubes but drops cells whose 26
//!   stride neighbours all share their bucket (see [`is_enclosed`]). Class
//!   contacts inside index volumes stay visible.
//!
//! Boundary-only comparisons reproduce long-standing exporter output exactly:
//! the far-side NORTH and WEST tests compare against `ny` / `nx` rather than
//! `ny - 1` / `nx - 1`, so with a regular walk they never fire. EAST fires at
//! `i == 0` with the `+x` quad. Changing either alters visible output.

/// Face direction of a cell cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDir {
    West,
    South,
    Bottom,
    North,
    Top,
    East,
}

impl FaceDir {
    /// Full-cube emission order.
    pub const ALL: [FaceDir; 6] = [
        FaceDir::West,
        FaceDir::South,
        FaceDir::Bottom,
        FaceDir::North,
        FaceDir::Top,
        FaceDir::East,
    ];

    /// 1-based corner quadruple (see [`CORNER_SIGNS`](crate::geometry::CORNER_SIGNS)).
    pub const fn corners(self) -> [u64; 4] {
        match self {
            FaceDir::West => [4, 3, 2, 1],
            FaceDir::South => [2, 6, 5, 1],
            FaceDir::Bottom => [3, 7, 6, 2],
            FaceDir::North => [8, 7, 3, 4],
            FaceDir::Top => [5, 8, 4, 1],
            FaceDir::East => [6, 7, 8, 5],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FaceDir::West => "WEST",
            FaceDir::South => "SOUTH",
            FaceDir::Bottom => "BOTTOM",
            FaceDir::North => "NORTH",
            FaceDir::Top => "TOP",
            FaceDir::East => "EAST",
        }
    }
}

/// Which faces of a visited cell are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CubePolicy {
    /// Every face of every cell.
    FullCube,
    /// Only faces on the volume's outer shell.
    #[default]
    BoundaryOnly,
    /// Every face of cells not fully enclosed by same-bucket neighbours.
    HideEnclosed,
}

/// Up to six faces, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceList {
    faces: [FaceDir; 6],
    len: usize,
}

impl FaceList {
    pub const fn empty() -> Self {
        Self {
            faces: FaceDir::ALL,
            len: 0,
        }
    }

    pub const fn all() -> Self {
        Self {
            faces: FaceDir::ALL,
            len: 6,
        }
    }

    #[inline]
    fn push(&mut self, face: FaceDir) {
        self.faces[self.len] = face;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[FaceDir] {
        &self.faces[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = FaceDir> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Select the faces of cell `(i, j, k)` under `policy`.
///
/// Boundary-only order is BOTTOM, TOP, SOUTH, NORTH, EAST, WEST.
///
/// [`CubePolicy::HideEnclosed`] needs neighbour buckets, so here it yields all
/// six faces; the walk drops enclosed cells with [`is_enclosed`].
pub fn visible_faces(policy: CubePolicy, dims: [usize; 3], i: usize, j: usize, k: usize) -> FaceList {
    match policy {
        CubePolicy::FullCube | CubePolicy::HideEnclosed => FaceList::all(),
        CubePolicy::BoundaryOnly => {
            let [nx, ny, nz] = dims;
            let mut faces = FaceList::empty();
            if k == 0 {
                faces.push(FaceDir::Bottom);
            }
            if k + 1 == nz {
                faces.push(FaceDir::Top);
            }
            if j == 0 {
                faces.push(FaceDir::South);
            }
            if j == ny {
                faces.push(FaceDir::North);
            }
            if i == 0 {
                faces.push(FaceDir::East);
            }
            if i == nx {
                faces.push(FaceDir::West);
            }
            faces
        }
    }
}

/// Whether all 26 neighbours of `(i, j, k)` at `±stride` lie inside the grid
/// and satisfy `same_bucket`.
///
/// Cells on the grid edge have fewer than 26 neighbours and are never enclosed.
pub fn is_enclosed<F>(dims: [usize; 3], i: usize, j: usize, k: usize, stride: usize, mut same_bucket: F) -> bool
where
    F: FnMut(usize, usize, usize) -> bool,
{
    let step = |c: usize, n: usize, d: i8| -> Option<usize> {
        match d {
            -1 => c.checked_sub(stride),
            1 => c.checked_add(stride).filter(|&v| v < n),
            _ => Some(c),
        }
    };
    let [nx, ny, nz] = dims;

    for dk in -1i8..=1 {
        for dj in -1i8..=1 {
            for di in -1i8..=1 {
                if (di, dj, dk) == (0, 0, 0) {
                    continue;
                }
                let neighbour = (step(i, nx, di), step(j, ny, dj), step(k, nz, dk));
                match neighbour {
                    (Some(ni), Some(nj), Some(nk)) if same_bucket(ni, nj, nk) => {}
                    _ => return false,
                }
            }
        }
    }
    true
}
