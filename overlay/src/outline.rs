//! 1px outline around the opaque region of an icon.
//!
//! A pixel is an outline pixel when it is not fully transparent and at least
//! one of its 8 neighbours is fully transparent or outside the image. This is
//! a hard-edged filter with no anti-aliasing.

use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Alpha at (x, y), treating anything off the image as transparent
fn alpha_at(image: &Pixmap, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return 0;
    }
    image.pixel(x as u32, y as u32).map_or(0, |p| p.alpha())
}

fn is_edge_pixel(image: &Pixmap, x: i32, y: i32) -> bool {
    NEIGHBORS
        .iter()
        .any(|(dx, dy)| alpha_at(image, x + dx, y + dy) == 0)
}

/// Coordinates of every outline pixel, in row-major order
pub fn outline_pixels(image: &Pixmap) -> Vec<(u32, u32)> {
    let mut pixels = Vec::new();
    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            if alpha_at(image, x, y) != 0 && is_edge_pixel(image, x, y) {
                pixels.push((x as u32, y as u32));
            }
        }
    }
    pixels
}

/// Paint the outline of `image` onto `canvas` with its top-left at (x, y).
///
/// Returns the number of outline pixels painted.
pub fn draw_outline(canvas: &mut Pixmap, image: &Pixmap, x: i32, y: i32, color: Color) -> usize {
    let pixels = outline_pixels(image);

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = false;

    for &(px, py) in &pixels {
        let Some(rect) = Rect::from_xywh((x + px as i32) as f32, (y + py as i32) as f32, 1.0, 1.0)
        else {
            continue;
        };
        canvas.fill_rect(rect, &paint, Transform::identity(), None);
    }

    pixels.len()
}
