//! CPU-side mesh generation: terrain blocks from height fields, plus a
//! procedural plane model.

use glam::Vec3;
use terraflight_terrain::HeightField;

/// Vertex format shared by all scene meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Model-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

/// CPU-side mesh ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle-list indices.
    pub indices: Vec<u32>,
}

/// Build a terrain block mesh over the logical quad [-0.5, 0.5]².
///
/// Heights come straight from the field; the block's world scale and
/// position are applied by the per-draw model matrix, matching how the
/// height query scales samples. Cells split along the same diagonal the
/// query uses, so the rendered surface is the surface the plane lands on.
/// `texture_repeat` tiles the ground texture across the block.
pub fn heightfield_mesh(field: &HeightField, texture_repeat: f32) -> MeshBuffers {
    let width = field.width();
    let height = field.height();
    let step_x = 1.0 / (width - 1) as f32;
    let step_z = 1.0 / (height - 1) as f32;

    let mut vertices = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            vertices.push(MeshVertex {
                position: [
                    -0.5 + col as f32 * step_x,
                    field.sample(row, col),
                    -0.5 + row as f32 * step_z,
                ],
                normal: [0.0; 3],
                uv: [
                    col as f32 * step_x * texture_repeat,
                    row as f32 * step_z * texture_repeat,
                ],
            });
        }
    }

    let at = |row: usize, col: usize| (row * width + col) as u32;
    let mut indices = Vec::with_capacity((width - 1) * (height - 1) * 6);
    for row in 0..height - 1 {
        for col in 0..width - 1 {
            indices.extend_from_slice(&[
                at(row, col),
                at(row + 1, col),
                at(row, col + 1),
                at(row + 1, col),
                at(row + 1, col + 1),
                at(row, col + 1),
            ]);
        }
    }

    let mut mesh = MeshBuffers { vertices, indices };
    accumulate_smooth_normals(&mut mesh);
    mesh
}

/// Accumulate area-weighted face normals into each vertex, then normalize.
fn accumulate_smooth_normals(mesh: &mut MeshBuffers) {
    let mut sums = vec![Vec3::ZERO; mesh.vertices.len()];
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from(mesh.vertices[a].position);
        let pb = Vec3::from(mesh.vertices[b].position);
        let pc = Vec3::from(mesh.vertices[c].position);
        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }
    for (vertex, sum) in mesh.vertices.iter_mut().zip(sums) {
        let normal = sum.normalize_or_zero();
        vertex.normal = if normal == Vec3::ZERO {
            [0.0, 1.0, 0.0]
        } else {
            normal.to_array()
        };
    }
}

/// Procedural plane model: a faceted dart, flat shaded.
///
/// Authored nose along +Y with the canopy toward +Z; the flight model's
/// baked -90° pitch puts the nose on world -Z in the level attitude.
pub fn plane_mesh() -> MeshBuffers {
    let nose = Vec3::new(0.0, 0.55, 0.0);
    let canopy = Vec3::new(0.0, 0.0, 0.14);
    let belly = Vec3::new(0.0, 0.05, -0.08);
    let tail_left = Vec3::new(-0.14, -0.4, 0.0);
    let tail_right = Vec3::new(0.14, -0.4, 0.0);
    let wing_left = Vec3::new(-0.55, -0.2, 0.0);
    let wing_right = Vec3::new(0.55, -0.2, 0.0);
    let fin_top = Vec3::new(0.0, -0.42, 0.24);

    let mut mesh = MeshBuffers::default();
    // Fuselage shell.
    push_triangle(&mut mesh, nose, tail_left, canopy);
    push_triangle(&mut mesh, nose, canopy, tail_right);
    push_triangle(&mut mesh, nose, belly, tail_left);
    push_triangle(&mut mesh, nose, tail_right, belly);
    push_triangle(&mut mesh, canopy, tail_left, tail_right);
    push_triangle(&mut mesh, belly, tail_right, tail_left);
    // Wings, double-sided.
    push_triangle(&mut mesh, nose, wing_left, tail_left);
    push_triangle(&mut mesh, nose, tail_left, wing_left);
    push_triangle(&mut mesh, nose, tail_right, wing_right);
    push_triangle(&mut mesh, nose, wing_right, tail_right);
    // Tail fin, double-sided.
    push_triangle(&mut mesh, tail_left, fin_top, tail_right);
    push_triangle(&mut mesh, tail_left, tail_right, fin_top);
    mesh
}

/// Emit one flat-shaded triangle with its own face normal.
fn push_triangle(mesh: &mut MeshBuffers, a: Vec3, b: Vec3, c: Vec3) {
    let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
    let base = mesh.vertices.len() as u32;
    for (point, uv) in [(a, [0.0, 0.0]), (b, [1.0, 0.0]), (c, [0.0, 1.0])] {
        mesh.vertices.push(MeshVertex {
            position: point.to_array(),
            normal,
            uv,
        });
    }
    mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
}
