//! Asset inputs: six base face images plus the ordered stamp list.
//!
//! List order defines the `face` and `stamp` index spaces for the rest of the
//! system. Loading is the Loading→Ready transition: every image must resolve
//! before an [`AssetSet`] exists, and any failure is fatal — there is no
//! partially loaded set.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::FACE_COUNT;
use crate::composite::premultiply_rgba8_in_place;
use crate::error::{CubestampError, CubestampResult};

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(
        width: u32,
        height: u32,
        mut rgba: Vec<u8>,
    ) -> CubestampResult<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(CubestampError::validation(
                "rgba byte length must be width * height * 4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CubestampResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Locations of every image the subsystem consumes, in index order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AssetSources {
    /// Base images for the six faces, in +X,−X,+Y,−Y,+Z,−Z order.
    pub base_faces: [String; FACE_COUNT],
    /// Stamp images; position in this list is the stamp index.
    pub stamps: Vec<String>,
}

/// One decorative stamp: its position in the fixed list plus image data.
#[derive(Clone, Debug)]
pub struct StampAsset {
    pub index: usize,
    pub image: PreparedImage,
}

/// Fully resolved asset inputs. Existence of a value of this type is the
/// Ready state: every base and stamp image has decoded.
#[derive(Clone, Debug)]
pub struct AssetSet {
    base_faces: [PreparedImage; FACE_COUNT],
    stamps: Vec<StampAsset>,
}

impl AssetSet {
    /// Join over all fetches: read and decode every base and stamp image
    /// relative to `root`. Any failure aborts the whole load.
    #[tracing::instrument(skip(sources, root), fields(stamps = sources.stamps.len()))]
    pub fn load(sources: &AssetSources, root: &Path) -> CubestampResult<AssetSet> {
        let mut bases = Vec::with_capacity(FACE_COUNT);
        for (i, source) in sources.base_faces.iter().enumerate() {
            bases.push(load_one(root, source).map_err(|e| {
                CubestampError::asset_load(format!("base face {i} ('{source}'): {e:#}"))
            })?);
        }
        let base_faces: [PreparedImage; FACE_COUNT] = bases
            .try_into()
            .map_err(|_| CubestampError::asset_load("expected exactly six base faces"))?;

        let mut stamps = Vec::with_capacity(sources.stamps.len());
        for (index, source) in sources.stamps.iter().enumerate() {
            let image = load_one(root, source).map_err(|e| {
                CubestampError::asset_load(format!("stamp {index} ('{source}'): {e:#}"))
            })?;
            stamps.push(StampAsset { index, image });
        }

        Ok(AssetSet::from_images(base_faces, stamps))
    }

    /// Assemble from already decoded images (tests, embedded assets).
    pub fn from_images(
        base_faces: [PreparedImage; FACE_COUNT],
        stamps: Vec<StampAsset>,
    ) -> AssetSet {
        AssetSet { base_faces, stamps }
    }

    pub fn base_face(&self, index: usize) -> &PreparedImage {
        &self.base_faces[index]
    }

    pub fn base_faces(&self) -> &[PreparedImage; FACE_COUNT] {
        &self.base_faces
    }

    pub fn stamp(&self, index: usize) -> Option<&StampAsset> {
        self.stamps.get(index)
    }

    pub fn stamp_count(&self) -> usize {
        self.stamps.len()
    }
}

fn load_one(root: &Path, source: &str) -> anyhow::Result<PreparedImage> {
    let path = root.join(source);
    let bytes = std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(decode_image(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(width, height, rgba.to_vec()).unwrap();
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_premultiplies_alpha() {
        let png = encode_png(1, 1, &[255, 100, 0, 128]);
        let img = decode_image(&png).unwrap();
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(&img.rgba8_premul[..], &[128, 50, 0, 128]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn aspect_is_width_over_height() {
        let img = PreparedImage::from_straight_rgba8(4, 2, vec![0; 4 * 2 * 4]).unwrap();
        assert_eq!(img.aspect(), 2.0);
    }

    #[test]
    fn from_straight_rgba8_rejects_short_buffers() {
        assert!(PreparedImage::from_straight_rgba8(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn load_fails_whole_set_on_missing_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let png = encode_png(4, 4, &[10u8; 4 * 4 * 4]);
        for i in 0..FACE_COUNT {
            std::fs::write(dir.path().join(format!("f{i}.png")), &png).unwrap();
        }
        let sources = AssetSources {
            base_faces: std::array::from_fn(|i| format!("f{i}.png")),
            stamps: vec!["missing.png".to_string()],
        };
        let err = AssetSet::load(&sources, dir.path()).unwrap_err();
        assert!(err.to_string().contains("stamp 0"));
    }

    #[test]
    fn load_resolves_everything_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..FACE_COUNT {
            let px = [(i as u8) * 40, 0, 0, 255];
            let rgba: Vec<u8> = px.iter().copied().cycle().take(2 * 2 * 4).collect();
            std::fs::write(dir.path().join(format!("f{i}.png")), encode_png(2, 2, &rgba)).unwrap();
        }
        std::fs::write(dir.path().join("s0.png"), encode_png(3, 1, &[7u8; 3 * 4])).unwrap();
        let sources = AssetSources {
            base_faces: std::array::from_fn(|i| format!("f{i}.png")),
            stamps: vec!["s0.png".to_string()],
        };
        let set = AssetSet::load(&sources, dir.path()).unwrap();
        assert_eq!(set.stamp_count(), 1);
        assert_eq!(set.stamp(0).unwrap().image.width, 3);
        assert!(set.stamp(1).is_none());
        assert_eq!(set.base_face(5).rgba8_premul[0], 200);
    }
}
