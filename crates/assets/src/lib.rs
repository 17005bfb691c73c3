//! Texture assets: six bitmap slots bound to texture units 0..5.
//!
//! Even slots hold building walls and odd slots their roofs. Files are named
//! `tex0.bmp` .. `tex5.bmp` inside one asset directory. A missing file is
//! replaced by a generated texture so the town always renders; a file that
//! exists but cannot be decoded is an error.

use std::path::{Path, PathBuf};

/// Number of texture units the scene samples from.
pub const TEXTURE_SLOTS: usize = 6;

/// Edge length of generated fallback textures.
const GENERATED_SIZE: u32 = 64;

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("empty image: {0}")]
    Empty(PathBuf),
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Build an image by evaluating `shade` at every pixel.
    pub fn from_fn(width: u32, height: u32, shade: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&shade(x, y));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.rgba[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Bytes per row, for texture upload.
    pub fn row_bytes(&self) -> u32 {
        self.width * 4
    }

    /// Concrete wall with a regular grid of lit and dark windows.
    pub fn window_grid() -> Self {
        Self::from_fn(GENERATED_SIZE, GENERATED_SIZE, |x, y| {
            let (cx, cy) = (x % 8, y % 8);
            let window = (2..6).contains(&cx) && (1..6).contains(&cy);
            if !window {
                [150, 146, 138, 255]
            } else if (x / 8 + y / 8 * 3) % 5 == 0 {
                [232, 214, 140, 255]
            } else {
                [48, 64, 92, 255]
            }
        })
    }

    /// Flat roof: dark tar with speckled gravel.
    pub fn roof() -> Self {
        Self::from_fn(GENERATED_SIZE, GENERATED_SIZE, |x, y| {
            let speckle = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 7;
            let v = 60 + speckle as u8 * 6;
            [v, v, v + 4, 255]
        })
    }

    /// Fallback for a slot: walls on even slots, roofs on odd ones.
    pub fn generated_for(slot: usize) -> Self {
        if slot % 2 == 0 {
            Self::window_grid()
        } else {
            Self::roof()
        }
    }
}

/// Decode one bitmap file to RGBA8.
pub fn load_bitmap(path: impl AsRef<Path>) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    Ok(TextureImage {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}

/// Where a slot's pixels came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    File(PathBuf),
    Generated,
}

/// The six texture slots in unit order.
#[derive(Debug, Clone)]
pub struct TextureSet {
    slots: Vec<(TextureImage, TextureSource)>,
}

impl TextureSet {
    /// File name of a slot inside the asset directory.
    pub fn file_name(slot: usize) -> String {
        format!("tex{slot}.bmp")
    }

    /// Every slot generated; no files touched.
    pub fn generated() -> Self {
        let slots = (0..TEXTURE_SLOTS)
            .map(TextureImage::generated_for)
            .map(|image| (image, TextureSource::Generated))
            .collect();
        Self { slots }
    }

    /// Load `tex0.bmp` .. `tex5.bmp` from `dir`, generating any that are
    /// missing.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let mut slots = Vec::with_capacity(TEXTURE_SLOTS);
        for slot in 0..TEXTURE_SLOTS {
            let path = dir.join(Self::file_name(slot));
            match std::fs::metadata(&path) {
                Ok(_) => {
                    let image = load_bitmap(&path)?;
                    tracing::debug!(
                        slot,
                        path = %path.display(),
                        width = image.width,
                        height = image.height,
                        "texture loaded"
                    );
                    slots.push((image, TextureSource::File(path)));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(
                        slot,
                        path = %path.display(),
                        "texture missing, using generated fallback"
                    );
                    let fallback = TextureImage::generated_for(slot);
                    slots.push((fallback, TextureSource::Generated));
                }
                Err(e) => return Err(e.into()),
            }
        }
        let set = Self { slots };
        tracing::info!(
            dir = %dir.display(),
            from_files = set.loaded_from_files(),
            "textures ready"
        );
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn image(&self, slot: usize) -> Option<&TextureImage> {
        self.slots.get(slot).map(|(image, _)| image)
    }

    pub fn source(&self, slot: usize) -> Option<&TextureSource> {
        self.slots.get(slot).map(|(_, source)| source)
    }

    pub fn images(&self) -> impl Iterator<Item = &TextureImage> {
        self.slots.iter().map(|(image, _)| image)
    }

    /// Number of slots backed by a file.
    pub fn loaded_from_files(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, source)| matches!(source, TextureSource::File(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_bmp(dir: &Path, slot: usize, rgb: [u8; 3]) {
        let img = image::RgbImage::from_pixel(4, 2, image::Rgb(rgb));
        img.save(dir.join(TextureSet::file_name(slot))).unwrap();
    }

    #[test]
    fn load_bitmap_decodes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        write_bmp(dir.path(), 0, [10, 20, 30]);
        let tex = load_bitmap(dir.path().join("tex0.bmp")).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.rgba.len(), 4 * 2 * 4);
        assert_eq!(tex.pixel(3, 1), Some([10, 20, 30, 255]));
        assert_eq!(tex.pixel(4, 0), None);
    }

    #[test]
    fn missing_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_bmp(dir.path(), 2, [200, 0, 0]);
        let set = TextureSet::load_dir(dir.path()).unwrap();
        assert_eq!(set.len(), TEXTURE_SLOTS);
        assert_eq!(set.loaded_from_files(), 1);
        assert!(matches!(set.source(2), Some(TextureSource::File(_))));
        assert_eq!(set.source(0), Some(&TextureSource::Generated));
        assert_eq!(set.image(1), Some(&TextureImage::roof()));
        assert_eq!(set.image(4), Some(&TextureImage::window_grid()));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tex0.bmp"), b"not a bitmap").unwrap();
        let err = TextureSet::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Image(_)));
    }

    #[test]
    fn generated_set_has_all_slots() {
        let set = TextureSet::generated();
        assert_eq!(set.images().count(), TEXTURE_SLOTS);
        assert_eq!(set.loaded_from_files(), 0);
        for image in set.images() {
            assert_eq!(image.rgba.len() as u32, image.row_bytes() * image.height);
        }
    }
}
