//! Shape generation for 2D primitives
//!
//! Everything on the track is an axis-aligned rectangle in canvas pixels
//! (origin top-left, y down). Shapes append to a shared batch.

use super::vertex::Vertex;
use crate::color::Rgba;

/// Append a filled rectangle as two triangles
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
    if width <= 0.0 || height <= 0.0 || color.0[3] <= 0.0 {
        return;
    }
    let c = color.to_array();
    let (x2, y2) = (x + width, y + height);

    out.extend_from_slice(&[
        Vertex::new(x, y, c),
        Vertex::new(x, y2, c),
        Vertex::new(x2, y, c),
        Vertex::new(x2, y, c),
        Vertex::new(x, y2, c),
        Vertex::new(x2, y2, c),
    ]);
}

/// Filled rectangle shrunk by `inset` on every side
pub fn inset_rect(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32, height: f32, inset: f32, color: Rgba) {
    rect(
        out,
        x + inset,
        y + inset,
        width - 2.0 * inset,
        height - 2.0 * inset,
        color,
    );
}

/// Four wheels sticking out of a 40 px wide car body
pub fn wheels(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
    for (wx, wy) in [
        (x - 5.0, y + 10.0),
        (x + width - 3.0, y + 10.0),
        (x - 5.0, y + height - 25.0),
        (x + width - 3.0, y + height - 25.0),
    ] {
        rect(out, wx, wy, 8.0, 15.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, 10.0, 20.0, 30.0, 40.0, Rgba::WHITE);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_degenerate_and_invisible_skipped() {
        let mut out = Vec::new();
        rect(&mut out, 0.0, 0.0, 0.0, 10.0, Rgba::WHITE);
        rect(&mut out, 0.0, 0.0, 10.0, 10.0, Rgba::WHITE.faded(0.0));
        inset_rect(&mut out, 0.0, 0.0, 10.0, 10.0, 5.0, Rgba::WHITE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_wheels() {
        let mut out = Vec::new();
        wheels(&mut out, 0.0, 0.0, 40.0, 60.0, Rgba::BLACK);
        assert_eq!(out.len(), 24);
    }
}
