use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::store::PreparedImage,
    foundation::core::{Rect, Viewport},
    foundation::error::{BrewError, BrewResult},
    foundation::math::{add_sat_u8, mul_div255_u8},
};

pub type PremulRgba8 = [u8; 4];

/// CPU drawing surface sized to the viewport; premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CanvasSurface {
    /// Transparent surface of `viewport` size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            data: vec![0; byte_len(viewport.width, viewport.height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reset pixel dimensions. Like a canvas element, this always drops prior content.
    pub fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.data.clear();
        self.data.resize(byte_len(viewport.width, viewport.height), 0);
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Draw `image` stretched into `dest` (canvas pixel space) with bilinear sampling.
    ///
    /// Pixels whose centers fall inside `dest` are composited source-over; the rest are left
    /// untouched.
    pub fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> BrewResult<()> {
        let (iw, ih) = (image.width, image.height);
        if image.rgba8_premul.len() != byte_len(iw, ih) {
            return Err(BrewError::render(
                "draw_image expects image bytes matching width*height*4",
            ));
        }
        if iw == 0 || ih == 0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let x_start = dest.x0.floor().max(0.0) as u32;
        let x_end = dest.x1.ceil().clamp(0.0, f64::from(self.width)) as u32;
        let y_start = dest.y0.floor().max(0.0) as u32;
        let y_end = dest.y1.ceil().clamp(0.0, f64::from(self.height)) as u32;

        let sx = f64::from(iw) / dest.width();
        let sy = f64::from(ih) / dest.height();
        let src = image.rgba8_premul.as_slice();

        for y in y_start..y_end {
            let cy = f64::from(y) + 0.5;
            if cy < dest.y0 || cy >= dest.y1 {
                continue;
            }
            let v = (cy - dest.y0) * sy - 0.5;
            let row = (y as usize) * (self.width as usize);
            for x in x_start..x_end {
                let cx = f64::from(x) + 0.5;
                if cx < dest.x0 || cx >= dest.x1 {
                    continue;
                }
                let u = (cx - dest.x0) * sx - 0.5;
                let px = sample_bilinear(src, iw, ih, u, v);
                let idx = (row + x as usize) * 4;
                let d = &mut self.data[idx..idx + 4];
                let out = premul_over_px([d[0], d[1], d[2], d[3]], px);
                d.copy_from_slice(&out);
            }
        }
        Ok(())
    }

    /// Un-premultiplied copy of the pixels, for encoders that expect straight alpha.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Encode the surface as a straight-alpha PNG at `path`, creating parent directories.
    pub fn save_png(&self, path: &Path) -> BrewResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BrewError::render("cannot export an empty surface"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_rgba8_straight(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

fn texel(src: &[u8], width: u32, height: u32, x: i64, y: i64) -> [f32; 4] {
    let x = x.clamp(0, i64::from(width) - 1) as usize;
    let y = y.clamp(0, i64::from(height) - 1) as usize;
    let idx = (y * width as usize + x) * 4;
    [
        f32::from(src[idx]),
        f32::from(src[idx + 1]),
        f32::from(src[idx + 2]),
        f32::from(src[idx + 3]),
    ]
}

fn sample_bilinear(src: &[u8], width: u32, height: u32, u: f64, v: f64) -> PremulRgba8 {
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = (u - x0) as f32;
    let fy = (v - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = texel(src, width, height, x0, y0);
    let p10 = texel(src, width, height, x0 + 1, y0);
    let p01 = texel(src, width, height, x0, y0 + 1);
    let p11 = texel(src, width, height, x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    // Keep the premultiplied invariant under rounding.
    for c in 0..3 {
        out[c] = out[c].min(out[3]);
    }
    out
}

fn premul_over_px(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
