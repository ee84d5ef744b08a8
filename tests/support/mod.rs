#![allow(dead_code)]

use cubestamp::{AssetSet, CubeDecorator, Face, PreparedImage, StampAsset};

/// Opaque base color shared by all six faces in these fixtures.
pub const BASE: [u8; 4] = [16, 16, 16, 255];
/// Opaque stamp ink, distinct from the base.
pub const INK: [u8; 4] = [220, 40, 0, 255];

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PreparedImage {
    let px: Vec<u8> = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    PreparedImage::from_straight_rgba8(width, height, px).unwrap()
}

/// A 10x10 opaque stamp whose pixels all differ, for content comparisons.
pub fn gradient_stamp() -> PreparedImage {
    let mut px = Vec::with_capacity(10 * 10 * 4);
    for y in 0..10u32 {
        for x in 0..10u32 {
            px.extend_from_slice(&[(10 + x * 20) as u8, (10 + y * 20) as u8, 255, 255]);
        }
    }
    PreparedImage::from_straight_rgba8(10, 10, px).unwrap()
}

pub fn asset_set(size: u32, stamps: Vec<PreparedImage>) -> AssetSet {
    AssetSet::from_images(
        std::array::from_fn(|_| solid(size, size, BASE)),
        stamps
            .into_iter()
            .enumerate()
            .map(|(index, image)| StampAsset { index, image })
            .collect(),
    )
}

/// Decorator over solid bases with one solid 10x10 stamp.
pub fn decorator(size: u32) -> CubeDecorator {
    CubeDecorator::new(asset_set(size, vec![solid(10, 10, INK)])).unwrap()
}

/// Number of pixels on `face` that differ from the base color.
pub fn changed(deco: &CubeDecorator, face: Face) -> usize {
    deco.canvases()
        .pixels(face)
        .chunks_exact(4)
        .filter(|px| *px != BASE)
        .count()
}

pub fn all_faces_equal(a: &CubeDecorator, b: &CubeDecorator) -> bool {
    Face::ALL
        .into_iter()
        .all(|face| a.canvases().pixels(face) == b.canvases().pixels(face))
}

pub fn snapshot(deco: &CubeDecorator) -> Vec<Vec<u8>> {
    Face::ALL
        .into_iter()
        .map(|face| deco.canvases().pixels(face).to_vec())
        .collect()
}
