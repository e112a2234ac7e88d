//! Scalar height grids rescaled from image channel data.

use crate::TerrainError;

/// Immutable grid of height samples with physical rescaling applied.
///
/// Samples are stored row-major (rows index Z, columns index X) and are
/// already mapped from the source's 0-255 channel range into
/// `[min_y, max_y]`. Many terrain blocks may share one field.
#[derive(Debug, Clone)]
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightField {
    /// Build a field from raw channel samples (one byte per sample, row-major).
    pub fn from_channel(
        width: usize,
        height: usize,
        channel: &[u8],
        min_y: f32,
        max_y: f32,
    ) -> Result<Self, TerrainError> {
        if width < 2 || height < 2 {
            return Err(TerrainError::GridTooSmall { width, height });
        }
        if !min_y.is_finite() || !max_y.is_finite() || min_y >= max_y {
            return Err(TerrainError::InvalidHeightBounds { min_y, max_y });
        }
        if channel.len() != width * height {
            return Err(TerrainError::SampleCountMismatch {
                expected: width * height,
                actual: channel.len(),
            });
        }

        let range = max_y - min_y;
        let samples = channel
            .iter()
            .map(|&v| min_y + range * f32::from(v) / 255.0)
            .collect();

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Sample count along X.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sample count along Z.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rescaled height at grid position (row, col).
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn sample(&self, row: usize, col: usize) -> f32 {
        assert!(col < self.width, "col out of bounds");
        assert!(row < self.height, "row out of bounds");
        self.samples[row * self.width + col]
    }

    /// Smallest sample in the field.
    pub fn min_sample(&self) -> f32 {
        self.samples.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest sample in the field.
    pub fn max_sample(&self) -> f32 {
        self.samples
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescales_channel_values() {
        let field = HeightField::from_channel(2, 2, &[0, 255, 128, 51], 0.0, 1.0).unwrap();
        assert_eq!(field.sample(0, 0), 0.0);
        assert_eq!(field.sample(0, 1), 1.0);
        assert!((field.sample(1, 0) - 128.0 / 255.0).abs() < 1e-6);
        assert!((field.sample(1, 1) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn rescales_into_custom_bounds() {
        let field = HeightField::from_channel(2, 2, &[0, 255, 0, 255], -10.0, 30.0).unwrap();
        assert_eq!(field.sample(0, 0), -10.0);
        assert_eq!(field.sample(0, 1), 30.0);
    }

    #[test]
    fn rejects_tiny_grids() {
        let err = HeightField::from_channel(1, 2, &[0, 0], 0.0, 1.0).unwrap_err();
        assert!(matches!(err, TerrainError::GridTooSmall { .. }));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = HeightField::from_channel(2, 2, &[0; 4], 1.0, 0.0).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidHeightBounds { .. }));
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = HeightField::from_channel(2, 2, &[0; 3], 0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::SampleCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn min_max_track_extremes() {
        let field = HeightField::from_channel(2, 2, &[0, 255, 64, 192], 0.0, 2.0).unwrap();
        assert_eq!(field.min_sample(), 0.0);
        assert_eq!(field.max_sample(), 2.0);
    }
}
