//! Image loading using the image crate.
//!
//! Raster images have no text, so the content model is a single element
//! describing the image: `<image format="png" width="640" height="480" color="Rgba8"/>`.

use image::ImageFormat;
use std::path::Path;

use quarry_core::types::{Element, ImageContainer};
use quarry_core::VisitableKind;

use crate::error::{ExtractError, ExtractResult};
use crate::{LoadedContainer, Loader};

/// Image metadata loader.
#[derive(Debug, Clone, Default)]
pub struct ImageLoader;

impl ImageLoader {
    pub fn new() -> Self {
        Self
    }

    /// Detect the format from magic bytes and decode the image header and
    /// pixels.
    pub fn describe(content: &[u8]) -> ExtractResult<Element> {
        let format = image::guess_format(content).map_err(|e| ExtractError::Image(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(content, format)
            .map_err(|e| ExtractError::Image(e.to_string()))?;

        Ok(Element::new("image")
            .with_attribute("format", format_name(format))
            .with_attribute("width", decoded.width().to_string())
            .with_attribute("height", decoded.height().to_string())
            .with_attribute("color", format!("{:?}", decoded.color())))
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

impl Loader for ImageLoader {
    fn kind(&self) -> VisitableKind {
        VisitableKind::Image
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg", "gif", "webp"]
    }

    fn load(&self, content: &[u8], source: &Path) -> ExtractResult<LoadedContainer> {
        let root = Self::describe(content)?;
        tracing::debug!("Loaded image {}: {:?}", source.display(), root.attributes);
        Ok(LoadedContainer::Image(ImageContainer::new(Some(source.to_path_buf()), root)))
    }

    fn name(&self) -> &str {
        "image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_describe_png() {
        let element = ImageLoader::describe(&png(3, 2)).unwrap();
        assert_eq!(element.name, "image");
        assert_eq!(element.attribute("format"), Some("png"));
        assert_eq!(element.attribute("width"), Some("3"));
        assert_eq!(element.attribute("height"), Some("2"));
        assert_eq!(element.attribute("color"), Some("Rgb8"));
    }

    #[test]
    fn test_unknown_bytes_are_rejected() {
        assert!(matches!(
            ImageLoader::describe(b"definitely not an image"),
            Err(ExtractError::Image(_))
        ));
    }

    #[test]
    fn test_load_sets_source() {
        let loaded = ImageLoader::new().load(&png(1, 1), Path::new("fig.png")).unwrap();
        let LoadedContainer::Image(container) = loaded else {
            panic!("expected an image container");
        };
        assert_eq!(container.root().attribute("width"), Some("1"));
    }
}
