use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::{
    BrewResult,
    assets::store::PreparedImage,
    foundation::error::BrewError,
    foundation::math::mul_div255_u8,
};

/// Decode a fetched frame (JPEG, PNG, ...) into premultiplied RGBA8.
///
/// The container format is sniffed from the bytes, not taken from the served file name.
pub fn decode_image(bytes: &[u8]) -> BrewResult<PreparedImage> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("sniff frame format")?;
    let format = reader.format();
    let frame = reader
        .decode()
        .with_context(|| format!("decode {format:?} frame"))?
        .into_rgba8();

    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(BrewError::asset("decoded frame has no pixels"));
    }

    let mut pixels = frame.into_raw();
    for px in pixels.chunks_exact_mut(4) {
        premultiply(px);
    }
    tracing::trace!(width, height, ?format, "frame decoded");

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixels),
    })
}

fn premultiply(px: &mut [u8]) {
    let a = u16::from(px[3]);
    match a {
        255 => {}
        0 => px[..3].fill(0),
        _ => {
            for c in &mut px[..3] {
                *c = mul_div255_u8(u16::from(*c), a);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
