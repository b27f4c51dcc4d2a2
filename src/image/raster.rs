//! PNG rendering.

use std::io::Cursor;

use ::image::{GrayImage, ImageFormat, Luma};

use crate::qr::QrMatrix;

const DARK: Luma<u8> = Luma([0x00]);
const LIGHT: Luma<u8> = Luma([0xff]);

/// Rasterize `matrix` with a `margin`-module quiet zone into a square,
/// 8-bit grayscale PNG of `width` pixels (see [`super::pixel_size`]).
///
/// Pixel `p` maps to module `floor(p * dimension / size)`, so module edges
/// land on whole pixels and the image is exactly `width` wide whenever
/// `width` covers the symbol.
pub fn render_png(
    matrix: &QrMatrix,
    width: u32,
    margin: usize,
) -> Result<Vec<u8>, ::image::ImageError> {
    let dimension = matrix.dimension(margin);
    let size = super::pixel_size(width, dimension);
    let module_at = |p: u32| (u64::from(p) * dimension as u64 / u64::from(size)) as usize;

    let img = GrayImage::from_fn(size, size, |x, y| {
        if matrix.is_dark_with_margin(module_at(x), module_at(y), margin) {
            DARK
        } else {
            LIGHT
        }
    });

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{self, EcLevel};

    /// Sample each module at its center and decode.
    fn decode_png(bytes: &[u8], size: usize, margin: usize) -> (u32, String) {
        let img = ::image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .unwrap()
            .to_luma8();
        assert_eq!(img.width(), img.height());
        let side = img.width();
        let module = f64::from(side) / (size + 2 * margin) as f64;
        let text = qr::read::decode(size, |x, y| {
            let px = ((x + margin) as f64 + 0.5) * module;
            let py = ((y + margin) as f64 + 0.5) * module;
            img.get_pixel(px as u32, py as u32).0[0] < 128
        })
        .unwrap();
        (side, text)
    }

    #[test]
    fn test_png_exact_width_roundtrip() {
        let matrix = qr::encode("https://example.com/", EcLevel::M).unwrap();
        let png = render_png(&matrix, 300, 4).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let (side, text) = decode_png(&png, matrix.size(), 4);
        assert_eq!(side, 300);
        assert_eq!(text, "https://example.com/");
    }

    #[test]
    fn test_png_small_width_falls_back() {
        let matrix = qr::encode("hi", EcLevel::M).unwrap();
        let dimension = matrix.dimension(4) as u32;
        let png = render_png(&matrix, 5, 4).unwrap();
        let (side, text) = decode_png(&png, matrix.size(), 4);
        assert_eq!(side, dimension * 4);
        assert_eq!(text, "hi");
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let matrix = qr::encode("margin", EcLevel::M).unwrap();
        let png = render_png(&matrix, 290, 4).unwrap();
        let img = ::image::load_from_memory(&png).unwrap().to_luma8();
        // 290 / 29 = 10 px per module, so the first 40 px are quiet zone
        for p in 0..40 {
            assert_eq!(img.get_pixel(p, p).0[0], 0xff);
            assert_eq!(img.get_pixel(289 - p, 289 - p).0[0], 0xff);
        }
        assert_eq!(img.get_pixel(40, 40).0[0], 0x00);
    }
}
