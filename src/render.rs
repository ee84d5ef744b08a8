//! Stamp compositing onto face buffers, with seam-continuous overflow.

use kurbo::{Affine, Point};

use crate::adjacency::{EdgeDir, Face, FaceAdjacencyModel};
use crate::assets::PreparedImage;
use crate::canvas::TextureCanvasSet;
use crate::composite::over;

/// Stamp footprint width as a fraction of the face resolution S.
pub const STAMP_SCALE: f64 = 0.3;

/// Draws one stamp onto a face buffer and carries any overflow across the
/// crossed edges onto the adjacent buffers.
#[derive(Clone, Copy, Debug)]
pub struct StampRenderer {
    adjacency: FaceAdjacencyModel,
    stamp_scale: f64,
}

impl Default for StampRenderer {
    fn default() -> Self {
        Self::new(FaceAdjacencyModel::new())
    }
}

impl StampRenderer {
    pub fn new(adjacency: FaceAdjacencyModel) -> Self {
        Self {
            adjacency,
            stamp_scale: STAMP_SCALE,
        }
    }

    /// Override the footprint fraction. Values above 1 make every placement
    /// overflow; the seam math is unaffected.
    pub fn with_stamp_scale(mut self, stamp_scale: f64) -> Self {
        self.stamp_scale = stamp_scale;
        self
    }

    pub fn stamp_scale(&self) -> f64 {
        self.stamp_scale
    }

    /// Composite `stamp` rotated by `angle` about its center at (u, v) on
    /// `face`, then re-draw it across every crossed edge.
    ///
    /// u and v are clamped to [0,1] before use. Mutates one to three buffers
    /// (the clicked face plus up to two edge neighbors) and marks each one
    /// dirty. A footprint crossing two edges near a corner reaches both edge
    /// neighbors but never the diagonal corner face.
    pub fn place(
        &self,
        canvases: &mut TextureCanvasSet,
        stamp: &PreparedImage,
        face: Face,
        u: f64,
        v: f64,
        angle: f64,
    ) {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let size = canvases.size();
        let s = f64::from(size);
        let w = s * self.stamp_scale;
        let h = w / stamp.aspect();

        // Pixel anchor: the stamp's center lands on the clicked point, with
        // v flipped because raster rows run opposite to UV's vertical axis.
        let to_face = Affine::translate((u * s, (1.0 - v) * s))
            * Affine::rotate(angle)
            * Affine::translate((-w / 2.0, -h / 2.0))
            * Affine::scale_non_uniform(w / f64::from(stamp.width), h / f64::from(stamp.height));

        draw_image(canvases.pixels_mut(face), size, stamp, to_face);
        canvases.mark_dirty(face);

        for dir in crossed_edges(u, v, w / (2.0 * s), h / (2.0 * s)) {
            let xfm = self.adjacency.lookup(face, dir);
            // Same stamp, same anchor, drawn under the neighbor's coordinate
            // frame; the neighbor buffer's finite extent clips the result to
            // the genuinely overflowing portion.
            let to_neighbor = xfm.pixel_affine(size) * to_face;
            draw_image(canvases.pixels_mut(xfm.neighbor), size, stamp, to_neighbor);
            canvases.mark_dirty(xfm.neighbor);
        }
    }
}

/// Edges crossed by the axis-aligned footprint box around (u, v).
///
/// Each axis is independent; zero, one, or two directions can fire.
fn crossed_edges(u: f64, v: f64, half_u: f64, half_v: f64) -> Vec<EdgeDir> {
    let mut crossed = Vec::with_capacity(4);
    if u - half_u < 0.0 {
        crossed.push(EdgeDir::Left);
    }
    if u + half_u > 1.0 {
        crossed.push(EdgeDir::Right);
    }
    if v + half_v > 1.0 {
        crossed.push(EdgeDir::Top);
    }
    if v - half_v < 0.0 {
        crossed.push(EdgeDir::Bottom);
    }
    crossed
}

/// Inverse-mapped draw of `src` into `dst` under `to_dst`, nearest-neighbor
/// sampled at destination pixel centers, source-over blended.
///
/// Pixels mapping outside the destination are simply not visited; pixels
/// whose center maps outside the source rectangle are not written. Sampling
/// at centers keeps seam partitions exact: a center is inside at most one
/// face's clip range.
fn draw_image(dst: &mut [u8], dst_size: u32, src: &PreparedImage, to_dst: Affine) {
    let sw = f64::from(src.width);
    let sh = f64::from(src.height);

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in [
        Point::new(0.0, 0.0),
        Point::new(sw, 0.0),
        Point::new(0.0, sh),
        Point::new(sw, sh),
    ] {
        let p = to_dst * corner;
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let x0 = min_x.floor().max(0.0) as usize;
    let y0 = min_y.floor().max(0.0) as usize;
    let x1 = max_x.ceil().min(f64::from(dst_size)).max(0.0) as usize;
    let y1 = max_y.ceil().min(f64::from(dst_size)).max(0.0) as usize;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let inv = to_dst.inverse();
    let src_px = &src.rgba8_premul[..];
    let src_w = src.width as usize;
    let stride = dst_size as usize * 4;

    for y in y0..y1 {
        for x in x0..x1 {
            let p = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if p.x < 0.0 || p.y < 0.0 || p.x >= sw || p.y >= sh {
                continue;
            }
            let si = ((p.y as usize) * src_w + (p.x as usize)) * 4;
            let spx = [src_px[si], src_px[si + 1], src_px[si + 2], src_px[si + 3]];
            if spx[3] == 0 {
                continue;
            }
            let di = y * stride + x * 4;
            let dpx = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            let out = over(dpx, spx);
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
}
