//! One rectangular terrain tile backed by a shared height field.

use crate::heightfield::HeightField;
use glam::Vec3;
use std::sync::Arc;

/// Side length of a block's logical quad along X, before scaling.
pub const QUAD_X_LENGTH: f32 = 1.0;
/// Side length of a block's logical quad along Z, before scaling.
pub const QUAD_Z_LENGTH: f32 = 1.0;
/// Logical quad start along X (quads are centered on their origin).
pub(crate) const START_X: f32 = -QUAD_X_LENGTH / 2.0;
/// Logical quad start along Z.
pub(crate) const START_Z: f32 = -QUAD_Z_LENGTH / 2.0;

/// Axis-aligned rectangle in the world (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    /// Minimum X corner.
    pub x: f32,
    /// Minimum Z corner.
    pub z: f32,
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub depth: f32,
}

impl Bounds2D {
    /// Half-open containment test; adjacent blocks share edges without
    /// both claiming the points on them.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.x && z >= self.z && x < self.x + self.width && z < self.z + self.depth
    }

    /// Whether two rectangles overlap in any interior point.
    pub fn overlaps(&self, other: &Bounds2D) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.z < other.z + other.depth
            && other.z < self.z + self.depth
    }
}

/// One terrain tile: a world-space bounding box plus the height field it
/// samples. Created by `TerrainIndex::build`, immutable thereafter.
#[derive(Debug, Clone)]
pub struct TerrainBlock {
    bounds: Bounds2D,
    field: Arc<HeightField>,
    scale: f32,
    origin: Vec3,
}

impl TerrainBlock {
    pub(crate) fn new(field: Arc<HeightField>, scale: f32, origin: Vec3) -> Self {
        let bounds = Bounds2D {
            x: START_X * scale + origin.x,
            z: START_Z * scale + origin.z,
            width: QUAD_X_LENGTH * scale,
            depth: QUAD_Z_LENGTH * scale,
        };
        Self {
            bounds,
            field,
            scale,
            origin,
        }
    }

    /// World-space bounding rectangle in the (x, z) plane.
    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }

    /// The height field this block samples.
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Uniform scale applied to the logical quad and its heights.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// World origin of the block (the quad center).
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// World-space height of grid sample (row, col).
    pub(crate) fn world_sample(&self, row: usize, col: usize) -> f32 {
        self.field.sample(row, col) * self.scale + self.origin.y
    }
}
