//! Image file output.
//!
//! Writers take packed `0xAARRGGBB` pixels in row-major order, top row first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::framebuffer::argb_to_rgba8;
use crate::OutputError;

/// Serializes raw framebuffer pixels to a file.
pub trait ImageWriter: Send + Sync {
    fn write(&self, path: &Path, pixels: &[u32], width: u32, height: u32) -> Result<(), OutputError>;
}

/// Uncompressed 32-bit true-color TGA.
#[derive(Debug, Default, Clone, Copy)]
pub struct TgaWriter;

/// 8-bit RGBA PNG through the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngWriter;

/// Pick a writer from the file extension (`tga` or `png`, case-insensitive).
pub fn writer_for_path(path: &Path) -> Result<Box<dyn ImageWriter>, OutputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "tga" => Ok(Box::new(TgaWriter)),
        "png" => Ok(Box::new(PngWriter)),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
}

fn check_size(pixels: &[u32], width: u32, height: u32) -> Result<(), OutputError> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Image type 2: uncompressed true-color.
const TGA_TRUE_COLOR: u8 = 2;
/// 8 alpha bits, top-left origin.
const TGA_DESCRIPTOR: u8 = 0x08 | 0x20;

impl TgaWriter {
    fn header(width: u16, height: u16) -> [u8; 18] {
        let mut header = [0u8; 18];
        header[2] = TGA_TRUE_COLOR;
        header[12..14].copy_from_slice(&width.to_le_bytes());
        header[14..16].copy_from_slice(&height.to_le_bytes());
        header[16] = 32;
        header[17] = TGA_DESCRIPTOR;
        header
    }
}

impl ImageWriter for TgaWriter {
    fn write(&self, path: &Path, pixels: &[u32], width: u32, height: u32) -> Result<(), OutputError> {
        check_size(pixels, width, height)?;
        let too_large = || OutputError::TooLarge { width, height };
        let tga_width = u16::try_from(width).map_err(|_| too_large())?;
        let tga_height = u16::try_from(height).map_err(|_| too_large())?;

        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(&Self::header(tga_width, tga_height))?;

        // TGA stores BGRA, which is ARGB in little-endian byte order
        if cfg!(target_endian = "little") {
            out.write_all(bytemuck::cast_slice(pixels))?;
        } else {
            for pixel in pixels {
                out.write_all(&pixel.to_le_bytes())?;
            }
        }
        out.flush()?;

        log::debug!("Wrote {}x{} TGA to {}", width, height, path.display());
        Ok(())
    }
}

impl ImageWriter for PngWriter {
    fn write(&self, path: &Path, pixels: &[u32], width: u32, height: u32) -> Result<(), OutputError> {
        check_size(pixels, width, height)?;
        image::save_buffer_with_format(
            path,
            &argb_to_rgba8(pixels),
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;

        log::debug!("Wrote {}x{} PNG to {}", width, height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tess_output_{}_{}", std::process::id(), name))
    }

    const PIXELS: [u32; 6] = [
        0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF,
        0xFF00_0000, 0xFFFF_FFFF, 0x8012_3456,
    ];

    #[test]
    fn test_writer_for_path() {
        assert!(writer_for_path(Path::new("out.tga")).is_ok());
        assert!(writer_for_path(Path::new("OUT.PNG")).is_ok());
        assert!(matches!(
            writer_for_path(Path::new("out.bmp")),
            Err(OutputError::UnsupportedFormat(_))
        ));
        assert!(writer_for_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_tga_layout() {
        let path = temp_path("layout.tga");
        TgaWriter.write(&path, &PIXELS, 3, 2).expect("write tga");

        let bytes = std::fs::read(&path).expect("read back");
        std::fs::remove_file(&path).ok();

        assert_eq!(bytes.len(), 18 + 6 * 4);
        assert_eq!(bytes[2], 2);
        assert_eq!(&bytes[12..16], &[3, 0, 2, 0]);
        assert_eq!(bytes[16], 32);
        assert_eq!(bytes[17], 0x28);

        // First pixel is red, stored as B, G, R, A
        assert_eq!(&bytes[18..22], &[0x00, 0x00, 0xFF, 0xFF]);
        // Last pixel keeps its alpha
        assert_eq!(&bytes[38..42], &[0x56, 0x34, 0x12, 0x80]);
    }

    #[test]
    fn test_png_round_trips_pixels() {
        let path = temp_path("pixels.png");
        PngWriter.write(&path, &PIXELS, 3, 2).expect("write png");

        let decoded = image::open(&path).expect("decode png").to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decoded.get_pixel(2, 1).0, [0x12, 0x34, 0x56, 0x80]);
    }

    #[test]
    fn test_size_mismatch() {
        let path = temp_path("mismatch.tga");
        let result = TgaWriter.write(&path, &PIXELS, 4, 2);
        assert!(matches!(
            result,
            Err(OutputError::SizeMismatch {
                expected: 8,
                actual: 6
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_tga_rejects_oversized_image() {
        let path = temp_path("huge.tga");
        let result = TgaWriter.write(&path, &[], 70_000, 0);
        assert!(matches!(result, Err(OutputError::TooLarge { .. })));
    }
}
