//! Six mutable face buffers and their dirty flags.

use std::sync::Arc;

use crate::FACE_COUNT;
use crate::adjacency::Face;
use crate::assets::AssetSet;
use crate::error::{CubestampError, CubestampResult};

/// The six S×S RGBA8 face buffers, each seeded from its base image.
///
/// Buffers are mutually independent and owned here; the display collaborator
/// only reads them (after a dirty signal) and never writes. The face
/// resolution S comes from the base images, which must all be square and
/// identically sized.
#[derive(Clone, Debug)]
pub struct TextureCanvasSet {
    size: u32,
    base: [Arc<Vec<u8>>; FACE_COUNT],
    buffers: [Vec<u8>; FACE_COUNT],
    dirty: [bool; FACE_COUNT],
}

impl TextureCanvasSet {
    pub fn new(assets: &AssetSet) -> CubestampResult<Self> {
        let first = assets.base_face(0);
        let size = first.width;
        for (i, img) in assets.base_faces().iter().enumerate() {
            if img.width != img.height {
                return Err(CubestampError::validation(format!(
                    "base face {i} must be square, got {}x{}",
                    img.width, img.height
                )));
            }
            if img.width != size {
                return Err(CubestampError::validation(format!(
                    "base face {i} is {}x{}, expected {size}x{size}",
                    img.width, img.height
                )));
            }
        }

        let base: [Arc<Vec<u8>>; FACE_COUNT] =
            std::array::from_fn(|i| Arc::clone(&assets.base_face(i).rgba8_premul));
        let buffers: [Vec<u8>; FACE_COUNT] = std::array::from_fn(|i| base[i].as_ref().clone());

        Ok(Self {
            size,
            base,
            buffers,
            dirty: [false; FACE_COUNT],
        })
    }

    /// Face resolution S in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Read access for the display collaborator. Premultiplied RGBA8,
    /// row-major, `size * size * 4` bytes.
    pub fn pixels(&self, face: Face) -> &[u8] {
        &self.buffers[face.index()]
    }

    /// Mutable buffer for drawing. Only the stamp renderer writes here.
    pub fn pixels_mut(&mut self, face: Face) -> &mut [u8] {
        &mut self.buffers[face.index()]
    }

    /// Recopy all six base images into their buffers, discarding any prior
    /// decoration, and clear all dirty flags.
    pub fn reset(&mut self) {
        for i in 0..FACE_COUNT {
            self.buffers[i].copy_from_slice(&self.base[i]);
        }
        self.dirty = [false; FACE_COUNT];
    }

    pub fn mark_dirty(&mut self, face: Face) {
        self.dirty[face.index()] = true;
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = [true; FACE_COUNT];
    }

    pub fn is_dirty(&self, face: Face) -> bool {
        self.dirty[face.index()]
    }

    /// Per-face needs-redisplay flags, cleared by the read.
    pub fn take_dirty(&mut self) -> [bool; FACE_COUNT] {
        std::mem::take(&mut self.dirty)
    }
}
