use crate::error::{Error, Result};
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// A decoded overlay image reduced to its RGB channels.
#[derive(Debug, Clone)]
pub struct FaceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbImage,
}

impl FaceImage {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            width,
            height,
            pixels,
        }
    }

    fn from_dynamic(img: DynamicImage) -> Self {
        // Alpha is dropped, not composited.
        Self::from_rgb(img.to_rgb8())
    }
}

/// Open an image file and convert it to an RGB pixel grid.
pub fn load_face_image(path: &Path) -> Result<FaceImage> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        source => Error::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(FaceImage::from_dynamic(img))
}

/// Decode an in-memory encoded image (png/jpg/webp/etc).
pub fn load_face_image_from_bytes(bytes: &[u8]) -> Result<FaceImage> {
    let img = image::load_from_memory(bytes).map_err(|source| Error::Decode {
        path: "<memory>".into(),
        source,
    })?;
    Ok(FaceImage::from_dynamic(img))
}
