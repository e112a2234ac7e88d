#![warn(missing_docs)]
//! Heightmap asset decoding.
//!
//! Turns image files into the opaque scalar grid the terrain crate
//! consumes. The terrain core never sees a file format.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors emitted while decoding height sources.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading image files.
    #[error("failed to read heightmap: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap decoder errors for malformed images.
    #[error("failed to decode heightmap: {0}")]
    Decode(#[from] image::ImageError),
    /// Decoded image has no pixels.
    #[error("heightmap {width}x{height} is empty")]
    Empty {
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },
}

/// A decoded heightmap: one scalar channel per pixel, row-major.
///
/// This is the asset-side half of the terrain contract; the terrain
/// crate rescales these raw 0-255 samples into world heights.
#[derive(Debug, Clone)]
pub struct HeightmapImage {
    /// Samples along X.
    pub width: usize,
    /// Samples along Z.
    pub height: usize,
    /// Raw channel values, row-major, one byte per sample.
    pub samples: Vec<u8>,
}

impl HeightmapImage {
    /// Decode a heightmap from an image file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path.as_ref())?;
        let decoded = Self::from_bytes(&bytes)?;
        debug!(
            path = %path.as_ref().display(),
            width = decoded.width,
            height = decoded.height,
            "decoded heightmap"
        );
        Ok(decoded)
    }

    /// Decode a heightmap from in-memory image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.into_luma8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { width, height });
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
            samples: image.into_raw(),
        })
    }

    /// Deterministic procedural rolling-hills source.
    ///
    /// Used when no heightmap file is configured so the demo runs with
    /// zero binary assets. A sum of sine products, rescaled to use the
    /// full sample range, with a flattened floor so there is somewhere
    /// comfortable to land.
    pub fn synthetic(width: usize, height: usize) -> Self {
        assert!(width >= 2 && height >= 2, "synthetic grid too small");
        let mut samples = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let u = col as f32 / (width - 1) as f32;
                let v = row as f32 / (height - 1) as f32;
                let hills = (u * std::f32::consts::TAU * 1.5).sin()
                    * (v * std::f32::consts::TAU * 1.5).sin();
                let ridges = (u * std::f32::consts::TAU * 4.0).sin()
                    * (v * std::f32::consts::TAU * 3.0).cos()
                    * 0.25;
                // [-1.25, 1.25] -> [0, 1], then soften the valleys flat.
                let normalized = ((hills + ridges) / 1.25 + 1.0) / 2.0;
                let shaped = normalized.powf(1.6);
                samples.push((shaped * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smallest valid PNG: 2x2 grayscale, encoded with the image crate.
    fn tiny_png() -> Vec<u8> {
        let img = image::GrayImage::from_raw(2, 2, vec![0, 64, 128, 255]).unwrap();
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_channel_samples() {
        let heightmap = HeightmapImage::from_bytes(&tiny_png()).unwrap();
        assert_eq!(heightmap.width, 2);
        assert_eq!(heightmap.height, 2);
        assert_eq!(heightmap.samples, vec![0, 64, 128, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = HeightmapImage::from_bytes(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = HeightmapImage::from_path("/nonexistent/heightmap.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn synthetic_is_deterministic() {
        let a = HeightmapImage::synthetic(64, 64);
        let b = HeightmapImage::synthetic(64, 64);
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.samples.len(), 64 * 64);
    }

    #[test]
    fn synthetic_uses_a_wide_sample_range() {
        let heightmap = HeightmapImage::synthetic(64, 64);
        let min = *heightmap.samples.iter().min().unwrap();
        let max = *heightmap.samples.iter().max().unwrap();
        assert!(min < 32, "floor too high: {min}");
        assert!(max > 192, "peaks too low: {max}");
    }
}
