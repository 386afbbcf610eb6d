#![forbid(unsafe_code)]

//! 1bpp glyph blitter.
//!
//! Glyph bits are walked row-major, MSB first, continuing across row
//! boundaries without padding. Set bits become a pixel (1x1) or a filled
//! `scale.x x scale.y` block; clear bits are left untouched, so glyphs are
//! always drawn transparently.

use crate::font::FontDescriptor;
use crate::surface::{Batch, Color, Scale, Surface};
use crate::utf8::CodePoint;

/// Draw `code` from `font` with its origin (baseline cursor) at `(x, y)`.
///
/// Codes outside `font.first()..=font.last()` draw nothing and leave the
/// surface untouched. Otherwise one write batch is opened and closed around
/// the glyph, even when the glyph has no pixels. `_bg` is accepted for
/// parity with the fallback renderer and is not painted.
///
/// Returns the number of set bits written.
#[allow(clippy::too_many_arguments)]
pub fn draw_glyph<S: Surface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    code: CodePoint,
    fg: Color,
    _bg: Color,
    scale: Scale,
    font: &FontDescriptor<'_>,
) -> usize {
    let Some(glyph) = font.glyph(code) else {
        return 0;
    };
    let bits = font.glyph_bitmap(&glyph);
    let w = usize::from(glyph.width);
    let h = usize::from(glyph.height);
    let xo = i32::from(glyph.x_offset);
    let yo = i32::from(glyph.y_offset);
    let (sx, sy) = (i32::from(scale.x), i32::from(scale.y));

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("glyph_draw", code, x, y, w, h).entered();

    let mut batch = Batch::begin(surface);
    let mut written = 0;
    for row in 0..h {
        for col in 0..w {
            let bit = row * w + col;
            let byte = bits.get(bit / 8).copied().unwrap_or(0);
            if byte & (0x80 >> (bit % 8)) == 0 {
                continue;
            }
            // Both fit in u8 range, so the casts are lossless.
            let (cx, cy) = (col as i32, row as i32);
            if scale.is_one() {
                batch.write_pixel(x.saturating_add(xo + cx), y.saturating_add(yo + cy), fg);
            } else {
                batch.write_fill_rect(
                    x.saturating_add((xo + cx) * sx),
                    y.saturating_add((yo + cy) * sy),
                    sx,
                    sy,
                    fg,
                );
            }
            written += 1;
        }
    }
    written
}
