// SPDX-License-Identifier: MIT
//
// Decoded pictures as a pixel source.
//
// Decoding itself belongs to the `image` crate (JPEG, PNG, GIF, ...). This
// wrapper only converts the result to RGBA once and answers `pixel()` from
// that buffer, so the resampler can read it like any other source.

use std::path::Path;

use image::RgbaImage;

use crate::color::Color;
use crate::error::Result;
use crate::image::PixelReader;

/// A fully decoded RGBA picture.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    rgba: RgbaImage,
}

impl DecodedImage {
    /// Open and decode a file. The format is guessed from its contents and
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if the file cannot be read or
    /// decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)?.to_rgba8();
        tracing::debug!(
            path = %path.display(),
            width = rgba.width(),
            height = rgba.height(),
            "decoded image"
        );
        Ok(Self { rgba })
    }

    /// Decode an in-memory encoded picture.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if the bytes are not a supported
    /// image.
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { rgba })
    }

    /// Wrap an already decoded RGBA buffer.
    #[must_use]
    pub const fn from_rgba(rgba: RgbaImage) -> Self {
        Self { rgba }
    }
}

impl PixelReader for DecodedImage {
    fn width(&self) -> u32 {
        self.rgba.width()
    }

    fn height(&self) -> u32 {
        self.rgba.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return Color::CLEAR;
        };
        match self.rgba.get_pixel_checked(x, y) {
            Some(&image::Rgba([r, g, b, a])) => Color::from_argb(a, r, g, b),
            None => Color::CLEAR,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::Error;

    fn sample() -> RgbaImage {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, image::Rgba([1, 2, 3, 0]));
        img
    }

    #[test]
    fn reads_pixels_with_alpha() {
        let src = DecodedImage::from_rgba(sample());
        assert_eq!((src.width(), src.height()), (3, 2));
        assert_eq!(src.pixel(0, 0), Color::rgb(255, 0, 0));
        assert_eq!(src.pixel(2, 1), Color::CLEAR);
    }

    #[test]
    fn out_of_range_is_clear() {
        let src = DecodedImage::from_rgba(sample());
        assert_eq!(src.pixel(-1, 0), Color::CLEAR);
        assert_eq!(src.pixel(3, 0), Color::CLEAR);
        assert_eq!(src.pixel(0, 2), Color::CLEAR);
    }

    #[test]
    fn decodes_png_from_memory() {
        let mut bytes = Vec::new();
        sample()
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let src = DecodedImage::from_memory(&bytes).unwrap();
        assert_eq!(src.pixel(0, 0), Color::rgb(255, 0, 0));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = DecodedImage::from_memory(b"definitely not a picture").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
