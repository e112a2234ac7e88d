//! Property-based tests for the terrain height query
//!
//! Validates, for arbitrary height grids and tilings:
//! - Height is C0-continuous across cell and diagonal boundaries
//! - Block bounding boxes tile the world without overlapping
//! - Every point inside the tiled area resolves to exactly one block

use proptest::prelude::*;
use terraflight_terrain::{HeightField, TerrainConfig, TerrainIndex};

/// Samples per side of the generated height grids.
const GRID: usize = 5;
/// Block scale used by the continuity cases.
const SCALE: f32 = 16.0;
/// Step used to probe continuity.
const STEP: f32 = 1e-3;
/// Generous Lipschitz bound: max height range (SCALE) over one cell
/// (SCALE / (GRID - 1)) gives slope 4; doubled for diagonal seams.
const MAX_DELTA: f32 = 8.0 * STEP * 4.0;

fn index_from(samples: Vec<u8>, blocks_per_side: usize, block_scale: f32) -> TerrainIndex {
    let field = HeightField::from_channel(GRID, GRID, &samples, 0.0, 1.0)
        .expect("generated grid is valid");
    let config = TerrainConfig {
        blocks_per_side,
        block_scale,
    };
    TerrainIndex::build(&config, field, None).expect("generated config is valid")
}

proptest! {
    /// Property: nearby points inside one block have nearby heights,
    /// including across sample-cell and triangle-diagonal boundaries.
    #[test]
    fn height_is_continuous(
        samples in prop::collection::vec(any::<u8>(), GRID * GRID),
        x in -7.0f32..7.0,
        z in -7.0f32..7.0,
    ) {
        let index = index_from(samples, 1, SCALE);
        let h = index.height_at(x, z).expect("inside the single block");
        for (dx, dz) in [(STEP, 0.0), (0.0, STEP), (STEP, STEP), (-STEP, STEP)] {
            let h2 = index.height_at(x + dx, z + dz).expect("still inside");
            prop_assert!(
                (h - h2).abs() <= MAX_DELTA,
                "discontinuity at ({}, {}) + ({}, {}): {} vs {}",
                x, z, dx, dz, h, h2
            );
        }
    }

    /// Property: the placement formula produces a tiling, never an
    /// overlapping grid, for any size and scale.
    #[test]
    fn blocks_never_overlap(
        samples in prop::collection::vec(any::<u8>(), GRID * GRID),
        blocks_per_side in 1usize..6,
        block_scale in 1.0f32..100.0,
    ) {
        let index = index_from(samples, blocks_per_side, block_scale);
        let blocks = index.blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                prop_assert!(
                    !a.bounds().overlaps(&b.bounds()),
                    "overlapping blocks {:?} / {:?}",
                    a.bounds(), b.bounds()
                );
            }
        }
    }

    /// Property: points inside the tiled area always resolve to exactly
    /// one owning block (no gaps between tiles, no double ownership).
    #[test]
    fn interior_points_have_one_owner(
        samples in prop::collection::vec(any::<u8>(), GRID * GRID),
        blocks_per_side in 1usize..6,
        block_scale in 1.0f32..100.0,
        u in -0.49f32..0.49,
        v in -0.49f32..0.49,
    ) {
        let index = index_from(samples, blocks_per_side, block_scale);
        let span = blocks_per_side as f32 * block_scale;
        let (x, z) = (u * span, v * span);
        let owners = index
            .blocks()
            .iter()
            .filter(|b| b.bounds().contains(x, z))
            .count();
        prop_assert_eq!(owners, 1, "point ({}, {}) owned by {} blocks", x, z, owners);
        prop_assert!(index.height_at(x, z).is_some());
    }
}
