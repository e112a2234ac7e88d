//! World-space tiling of terrain blocks and the interpolated height query.

use crate::block::{TerrainBlock, QUAD_X_LENGTH, QUAD_Z_LENGTH};
use crate::heightfield::HeightField;
use crate::TerrainError;
use glam::Vec3;
use std::sync::Arc;
use tracing::{debug, info};

/// Parameters for building a terrain index.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Blocks per side; the index tiles `blocks_per_side²` blocks.
    pub blocks_per_side: usize,
    /// Uniform scale applied to each block's logical quad and heights.
    pub block_scale: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            blocks_per_side: 5,
            block_scale: 75.0,
        }
    }
}

/// Ordered 2D grid of terrain blocks, built once and never mutated.
///
/// Resolves a world (x, z) to the owning block and answers interpolated
/// height queries against that block's height field.
#[derive(Debug, Clone)]
pub struct TerrainIndex {
    blocks: Vec<TerrainBlock>,
    blocks_per_side: usize,
}

impl TerrainIndex {
    /// Tile `blocks_per_side²` blocks centered on the world origin.
    ///
    /// Every block shares `base`; when `center` is given, the single
    /// middle block uses it instead (a special region, e.g. a city,
    /// blended into otherwise uniform terrain).
    pub fn build(
        config: &TerrainConfig,
        base: HeightField,
        center: Option<HeightField>,
    ) -> Result<Self, TerrainError> {
        if config.blocks_per_side == 0 {
            return Err(TerrainError::NoBlocks);
        }
        if !config.block_scale.is_finite() || config.block_scale <= 0.0 {
            return Err(TerrainError::InvalidScale(config.block_scale));
        }

        let base = Arc::new(base);
        let center = center.map(Arc::new);

        let n = config.blocks_per_side;
        let half = (n as f32 - 1.0) / 2.0;
        let mut blocks = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let x_displacement = (col as f32 - half) * config.block_scale * QUAD_X_LENGTH;
                let z_displacement = (row as f32 - half) * config.block_scale * QUAD_Z_LENGTH;

                let field = match &center {
                    Some(center) if col == n / 2 && row == n / 2 => Arc::clone(center),
                    _ => Arc::clone(&base),
                };
                let block = TerrainBlock::new(
                    field,
                    config.block_scale,
                    Vec3::new(x_displacement, 0.0, z_displacement),
                );
                debug!(row, col, bounds = ?block.bounds(), "placed terrain block");
                blocks.push(block);
            }
        }

        info!(
            blocks = blocks.len(),
            block_scale = config.block_scale,
            "terrain index built"
        );
        Ok(Self {
            blocks,
            blocks_per_side: n,
        })
    }

    /// All blocks in row-major order.
    pub fn blocks(&self) -> &[TerrainBlock] {
        &self.blocks
    }

    /// Blocks per side of the square tiling.
    pub fn blocks_per_side(&self) -> usize {
        self.blocks_per_side
    }

    /// Interpolated terrain height under a world (x, z) point.
    ///
    /// Returns `None` when the point lies outside every block; callers
    /// should skip their ground clamp for that tick rather than invent
    /// a height.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let block = self.blocks.iter().find(|b| b.bounds().contains(x, z))?;
        Some(block_height(block, x, z))
    }
}

/// Height within one block via triangle interpolation over the grid cell.
fn block_height(block: &TerrainBlock, x: f32, z: f32) -> f32 {
    let bounds = block.bounds();
    let field = block.field();
    let cells_x = field.width() - 1;
    let cells_z = field.height() - 1;
    let cell_width = bounds.width / cells_x as f32;
    let cell_depth = bounds.depth / cells_z as f32;
    let col = (((x - bounds.x) / cell_width) as usize).min(cells_x - 1);
    let row = (((z - bounds.z) / cell_depth) as usize).min(cells_z - 1);

    let vertex = |r: usize, c: usize| {
        Vec3::new(
            bounds.x + c as f32 * cell_width,
            block.world_sample(r, c),
            bounds.z + r as f32 * cell_depth,
        )
    };

    // The cell splits into two triangles along the diagonal between
    // (col, row+1) and (col+1, row); both triangles share that edge, so
    // the interpolated surface is continuous across it.
    let p1 = vertex(row + 1, col);
    let p2 = vertex(row, col + 1);
    let p0 = if z < diagonal_z(p1, p2, x) {
        vertex(row, col)
    } else {
        vertex(row + 1, col + 1)
    };

    interpolate_height(p0, p1, p2, x, z)
}

/// Z of the cell diagonal through `p1` and `p2` at the given x.
fn diagonal_z(p1: Vec3, p2: Vec3, x: f32) -> f32 {
    ((p1.z - p2.z) / (p1.x - p2.x)) * (x - p1.x) + p1.z
}

/// Height from the plane equation `ax + by + cz + d = 0` of the triangle.
fn interpolate_height(pa: Vec3, pb: Vec3, pc: Vec3, x: f32, z: f32) -> f32 {
    let a = (pb.y - pa.y) * (pc.z - pa.z) - (pc.y - pa.y) * (pb.z - pa.z);
    let b = (pb.z - pa.z) * (pc.x - pa.x) - (pc.z - pa.z) * (pb.x - pa.x);
    let c = (pb.x - pa.x) * (pc.y - pa.y) - (pc.x - pa.x) * (pb.y - pa.y);
    if b.abs() < 1e-6 {
        // Degenerate (collinear) triangle: the nearest sample's height is
        // the only stable answer.
        return nearest_height(pa, pb, pc, x, z);
    }
    let d = -(a * pa.x + b * pa.y + c * pa.z);
    (-d - a * x - c * z) / b
}

fn nearest_height(pa: Vec3, pb: Vec3, pc: Vec3, x: f32, z: f32) -> f32 {
    let dist = |p: Vec3| (p.x - x) * (p.x - x) + (p.z - z) * (p.z - z);
    let mut best = pa;
    for p in [pb, pc] {
        if dist(p) < dist(best) {
            best = p;
        }
    }
    best.y
}
