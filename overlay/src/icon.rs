//! Item icon images
//!
//! Icons arrive as straight (non-premultiplied) RGBA from the host's asset
//! service, or from PNG files for standalone hosts. They are converted to
//! `tiny_skia::Pixmap` and resampled to the overlay size before drawing.

use std::path::{Path, PathBuf};

use notemark_core::ItemId;
use thiserror::Error;
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

/// Errors while loading an icon
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to read icon {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode png: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported png color type {0:?}")]
    UnsupportedColor(png::ColorType),
    #[error("icon has zero size")]
    Empty,
    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// An RGBA icon bitmap (straight alpha, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl IconImage {
    /// Wrap raw RGBA bytes, checking the length against the dimensions
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, IconError> {
        if width == 0 || height == 0 {
            return Err(IconError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(IconError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Decode a PNG of any 8-bit-normalizable color type
    pub fn decode_png(bytes: &[u8]) -> Result<Self, IconError> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let rgba = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|c| [c[0], c[0], c[0], c[1]])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            other => return Err(IconError::UnsupportedColor(other)),
        };

        Self::from_rgba(info.width, info.height, rgba)
    }

    /// Read and decode a PNG file
    pub fn load_png(path: &Path) -> Result<Self, IconError> {
        let bytes = std::fs::read(path).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode_png(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Convert to a premultiplied pixmap at native size
    pub fn to_pixmap(&self) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(self.rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Some(pixmap)
    }

    /// Resample to a `size` x `size` pixmap with bilinear filtering
    pub fn scaled_square(&self, size: u32) -> Option<Pixmap> {
        let src = self.to_pixmap()?;
        if self.width == size && self.height == size {
            return Some(src);
        }

        let mut dest = Pixmap::new(size, size)?;
        let transform = Transform::from_scale(
            size as f32 / self.width as f32,
            size as f32 / self.height as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        dest.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
        Some(dest)
    }
}

/// Icon lookup by item id (the host's asset service)
pub trait IconSource {
    /// Icon for `item`, `None` if unavailable right now
    fn icon(&self, item: ItemId) -> Option<IconImage>;
}

/// Serves icons from a directory of `<item_id>.png` files
#[derive(Debug, Clone)]
pub struct IconDirectory {
    root: PathBuf,
}

impl IconDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, item: ItemId) -> PathBuf {
        self.root.join(format!("{}.png", item))
    }
}

impl IconSource for IconDirectory {
    fn icon(&self, item: ItemId) -> Option<IconImage> {
        let path = self.path_for(item);
        match IconImage::load_png(&path) {
            Ok(icon) => Some(icon),
            Err(e) => {
                tracing::debug!(item, error = %e, "Icon not available");
                None
            }
        }
    }
}
