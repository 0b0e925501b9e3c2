//! Image decode service and handles

use bytes::Bytes;
use image::{DynamicImage, GenericImageView};
use percept_core::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Default upload size cap
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

/// A fully decoded image: dimensions and pixels are available.
#[derive(Clone)]
pub struct DecodedImage {
    inner: Arc<DynamicImage>,
}

impl DecodedImage {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            inner: Arc::new(image),
        }
    }

    /// Build from raw RGB8 pixel data (width * height * 3 bytes).
    pub fn from_rgb8(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        let buffer = image::RgbImage::from_raw(width, height, raw)
            .ok_or_else(|| Error::decode("pixel buffer does not match dimensions"))?;
        Ok(Self::from_dynamic(DynamicImage::ImageRgb8(buffer)))
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Flat RGB8 pixel access for model input
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.inner.to_rgb8().into_raw()
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "DecodedImage({w}x{h})")
    }
}

/// Handle passed into an inference session.
///
/// Classification requires the `Decoded` state; invoking a classifier on a
/// pending handle is a precondition violation the session rejects.
#[derive(Debug, Clone)]
pub enum ImageHandle {
    /// Upload accepted but pixels not yet available
    Pending,
    Decoded(DecodedImage),
}

impl ImageHandle {
    pub fn pending() -> Self {
        Self::Pending
    }

    pub fn decoded(image: DecodedImage) -> Self {
        Self::Decoded(image)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn as_decoded(&self) -> Option<&DecodedImage> {
        match self {
            Self::Decoded(image) => Some(image),
            Self::Pending => None,
        }
    }
}

/// Decodes raw upload bytes into images, enforcing a size cap before
/// touching the decoder.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    max_bytes: usize,
}

impl ImageDecoder {
    pub fn new() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Decode an uploaded file. Unreadable or corrupt input surfaces a
    /// decode error; the user must resubmit.
    pub fn decode(&self, bytes: &Bytes) -> Result<DecodedImage> {
        if bytes.len() > self.max_bytes {
            return Err(Error::decode(format!(
                "image too large: {} bytes (limit {})",
                bytes.len(),
                self.max_bytes
            )));
        }

        let image = image::load_from_memory(bytes)
            .map_err(|e| Error::decode(format!("unreadable image: {e}")))?;

        let (width, height) = image.dimensions();
        debug!(width, height, "image decoded");

        Ok(DecodedImage::from_dynamic(image))
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}
