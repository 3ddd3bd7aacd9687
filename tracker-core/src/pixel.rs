//! The 1x1 fully transparent PNG served by the pixel endpoint.

use std::io::Cursor;
use std::sync::OnceLock;

use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::error;

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// `Cache-Control` value sent with every pixel so each open reaches the server.
pub const NO_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// 1x1 gray+alpha PNG with alpha 0. Used when dynamic encoding fails.
const FALLBACK_PIXEL_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const FALLBACK_PIXEL: [u8; 68] = [
    137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8, 4, 0,
    0, 0, 181, 28, 12, 2, 0, 0, 0, 11, 73, 68, 65, 84, 120, 218, 99, 100, 96, 0, 0, 0, 6, 0, 2,
    48, 129, 208, 47, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
];

static PIXEL: OnceLock<Vec<u8>> = OnceLock::new();

/// Encodes a 1x1 RGBA(0, 0, 0, 0) image as PNG.
pub fn encode_transparent_png() -> Result<Vec<u8>, image::ImageError> {
    let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Hard-coded pixel bytes. Never fails.
pub fn fallback_pixel() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(FALLBACK_PIXEL_B64)
        .unwrap_or_else(|_| FALLBACK_PIXEL.to_vec())
}

/// Returns the pixel bytes, encoding them on first use.
///
/// Always a valid PNG: an encoder failure is logged and the fallback is used.
pub fn transparent_pixel() -> &'static [u8] {
    PIXEL.get_or_init(|| match encode_transparent_png() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to encode transparent pixel, using fallback bytes");
            fallback_pixel()
        }
    })
}
