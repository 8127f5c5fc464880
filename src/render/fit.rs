use crate::foundation::core::{Point, Rect, Size};

/// Placement of an image scaled to fit entirely inside a box, centered, aspect preserved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContainFit {
    /// Uniform scale applied to the image.
    pub scale: f64,
    /// Top-left corner of the scaled image inside the box.
    pub offset: Point,
    /// Destination rectangle in box coordinates.
    pub dest: Rect,
}

/// `scale = min(box.w / image.w, box.h / image.h)`, offsets `(box - image * scale) / 2`.
///
/// Returns `None` when either size has a non-positive dimension.
pub fn contain_fit(bounds: Size, image: Size) -> Option<ContainFit> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 || image.width <= 0.0 || image.height <= 0.0 {
        return None;
    }

    let scale = (bounds.width / image.width).min(bounds.height / image.height);
    let scaled = Size::new(image.width * scale, image.height * scale);
    let offset = Point::new(
        (bounds.width - scaled.width) / 2.0,
        (bounds.height - scaled.height) / 2.0,
    );

    Some(ContainFit {
        scale,
        offset,
        dest: Rect::from_origin_size(offset, scaled),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
