//! # Image Sources
//!
//! Background and border images are referenced by URL. The layout core only
//! needs an image's intrinsic size (and whether it can be fully opaque), so
//! loading is a collaborator behind the [`ImageLoader`] trait.
//!
//! [`SourceLoader`] is the default: it accepts data URIs, raw base64 strings
//! and file paths, and probes dimensions without decoding pixel data.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;

use log::warn;
use serde::Serialize;

use crate::error::RegionError;

/// A resolved image reference with its intrinsic size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub width: f64,
    pub height: f64,
    /// True when the format cannot carry transparency.
    pub opaque: bool,
}

impl Image {
    /// An image whose size is not known (yet).
    pub fn unresolved(url: &str) -> Self {
        Self {
            url: url.to_string(),
            width: 0.0,
            height: 0.0,
            opaque: false,
        }
    }

    pub fn with_size(url: &str, width: f64, height: f64) -> Self {
        Self {
            url: url.to_string(),
            width,
            height,
            opaque: false,
        }
    }
}

impl std::hash::Hash for Image {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.url.hash(state);
        crate::geometry::hash_f64(self.width, state);
        crate::geometry::hash_f64(self.height, state);
    }
}

/// Resolves an image URL to an [`Image`].
pub trait ImageLoader {
    fn load(&self, url: &str) -> Result<Image, RegionError>;

    /// Load, falling back to an unresolved image on failure.
    fn load_or_unresolved(&self, url: &str) -> Image {
        match self.load(url) {
            Ok(img) => img,
            Err(e) => {
                warn!("image '{}' could not be loaded: {}", abbreviate(url), e);
                Image::unresolved(url)
            }
        }
    }
}

/// Reads data URIs, raw base64 and file paths, caching probed dimensions.
#[derive(Debug, Default)]
pub struct SourceLoader {
    cache: RefCell<HashMap<String, Image>>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageLoader for SourceLoader {
    fn load(&self, url: &str) -> Result<Image, RegionError> {
        if let Some(img) = self.cache.borrow().get(url) {
            return Ok(img.clone());
        }
        let bytes = read_source_bytes(url)?;
        let (width, height, opaque) = probe_image_bytes(&bytes)?;
        let img = Image {
            url: url.to_string(),
            width: width as f64,
            height: height as f64,
            opaque,
        };
        self.cache
            .borrow_mut()
            .insert(url.to_string(), img.clone());
        Ok(img)
    }
}

/// A loader that never touches the file system: every image is unresolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLoader;

impl ImageLoader for NullLoader {
    fn load(&self, url: &str) -> Result<Image, RegionError> {
        Ok(Image::unresolved(url))
    }
}

fn abbreviate(url: &str) -> &str {
    match url.char_indices().nth(48) {
        Some((idx, _)) => &url[..idx],
        None => url,
    }
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str) -> Result<Vec<u8>, RegionError> {
    // Data URI: data:image/png;base64,iVBOR...
    if src.starts_with("data:image/") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| RegionError::ImageError("Invalid data URI: missing comma".into()))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only explicit path prefixes count as files; base64 text contains '/'.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return std::fs::read(src).map_err(|e| {
            RegionError::ImageError(format!("Failed to read image file '{}': {}", src, e))
        });
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, RegionError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| RegionError::ImageError(format!("Base64 decode error: {}", e)))
}

/// Read dimensions from the header without decoding pixels. JPEG has no
/// alpha channel, so it is the only format reported as opaque.
fn probe_image_bytes(data: &[u8]) -> Result<(u32, u32, bool), RegionError> {
    if data.len() < 4 {
        return Err(RegionError::ImageError("Image data too short".into()));
    }
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| RegionError::ImageError(format!("Format detection error: {}", e)))?;
    let opaque = matches!(reader.format(), Some(image::ImageFormat::Jpeg));
    if reader.format().is_none() {
        return Err(RegionError::ImageError(
            "Unsupported image format (expected JPEG, PNG or WebP)".into(),
        ));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| RegionError::ImageError(format!("Failed to read dimensions: {}", e)))?;
    Ok((width, height, opaque))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            width,
            height,
            image::ColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn test_invalid_data_uri() {
        let loader = SourceLoader::new();
        assert!(loader.load("data:image/png;base64").is_err());
    }

    #[test]
    fn test_too_short_data() {
        assert!(probe_image_bytes(&[0x00, 0x01]).is_err());
    }

    #[test]
    fn test_unsupported_format() {
        assert!(probe_image_bytes(&[0x00, 0x01, 0x02, 0x03, 0x04]).is_err());
    }

    #[test]
    fn test_png_data_uri_dimensions() {
        use base64::Engine;
        let b64 = base64::engine::general_purpose::STANDARD.encode(png_bytes(3, 2));
        let uri = format!("data:image/png;base64,{}", b64);

        let loader = SourceLoader::new();
        let img = loader.load(&uri).unwrap();
        assert_eq!(img.width, 3.0);
        assert_eq!(img.height, 2.0);
        assert!(!img.opaque);
        // second load is served from the cache
        assert_eq!(loader.load(&uri).unwrap(), img);
    }

    #[test]
    fn test_jpeg_is_opaque() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();

        let (w, h, opaque) = probe_image_bytes(&buf).unwrap();
        assert_eq!((w, h), (2, 2));
        assert!(opaque);
    }

    #[test]
    fn failed_load_falls_back_to_unresolved() {
        let loader = SourceLoader::new();
        let img = loader.load_or_unresolved("./definitely/missing.png");
        assert_eq!(img, Image::unresolved("./definitely/missing.png"));
    }
}
