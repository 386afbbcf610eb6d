#![forbid(unsafe_code)]

//! In-memory pixel surface that records every call.
//!
//! Pixels land in a `width x height` grid (off-surface writes are clipped
//! but still logged), and each trait call is appended to an op log so tests
//! can assert both the picture and the exact call sequence.

use pagefont_core::{Color, Scale, Surface};

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    StartWrite,
    EndWrite,
    Pixel {
        x: i32,
        y: i32,
        color: Color,
    },
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    },
    FallbackChar {
        x: i32,
        y: i32,
        ch: u8,
        fg: Color,
        bg: Color,
        scale: Scale,
    },
}

/// Recording framebuffer.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: i32,
    height: i32,
    pixels: Vec<Option<Color>>,
    ops: Vec<SurfaceOp>,
    depth: u32,
    max_depth: u32,
    unmatched_ends: u32,
}

impl MemorySurface {
    /// Blank surface of `width x height` pixels.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width: i32::from(width),
            height: i32::from(height),
            pixels: vec![None; len],
            ops: Vec::new(),
            depth: 0,
            max_depth: 0,
            unmatched_ends: 0,
        }
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Colour at `(x, y)`, `None` when unpainted or off-surface.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).and_then(|i| self.pixels[i])
    }

    /// Number of painted pixels.
    #[must_use]
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Fallback glyphs drawn so far as `(x, y, ch)`.
    #[must_use]
    pub fn fallback_chars(&self) -> Vec<(i32, i32, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                SurfaceOp::FallbackChar { x, y, ch, .. } => Some((x, y, ch)),
                _ => None,
            })
            .collect()
    }

    /// Number of `start_write` calls.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::StartWrite))
            .count()
    }

    /// True when every `start_write` has a matching `end_write`.
    #[must_use]
    pub fn batches_balanced(&self) -> bool {
        self.depth == 0 && self.unmatched_ends == 0
    }

    /// Deepest batch nesting seen.
    #[must_use]
    pub fn max_batch_depth(&self) -> u32 {
        self.max_depth
    }

    /// Forget recorded ops, keeping pixels.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Erase all pixels and ops.
    pub fn clear(&mut self) {
        self.pixels.fill(None);
        self.ops.clear();
        self.depth = 0;
        self.max_depth = 0;
        self.unmatched_ends = 0;
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        usize::try_from(y * self.width + x).ok()
    }

    fn paint(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Some(color);
        }
    }
}

impl Surface for MemorySurface {
    fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.ops.push(SurfaceOp::Pixel { x, y, color });
        self.paint(x, y, color);
    }

    fn write_fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.ops.push(SurfaceOp::FillRect { x, y, w, h, color });
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.paint(px, py, color);
            }
        }
    }

    fn start_write(&mut self) {
        self.ops.push(SurfaceOp::StartWrite);
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn end_write(&mut self) {
        self.ops.push(SurfaceOp::EndWrite);
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.unmatched_ends += 1,
        }
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn draw_fallback_char(
        &mut self,
        x: i32,
        y: i32,
        ch: u8,
        fg: Color,
        bg: Color,
        scale: Scale,
    ) {
        self.ops.push(SurfaceOp::FallbackChar {
            x,
            y,
            ch,
            fg,
            bg,
            scale,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_clipped_but_logged() {
        let mut s = MemorySurface::new(4, 4);
        s.write_pixel(1, 2, 9);
        s.write_pixel(-1, 0, 9);
        s.write_pixel(4, 0, 9);
        assert_eq!(s.pixel(1, 2), Some(9));
        assert_eq!(s.painted(), 1);
        assert_eq!(s.ops().len(), 3);
    }

    #[test]
    fn fill_rect_paints_area() {
        let mut s = MemorySurface::new(8, 8);
        s.write_fill_rect(6, 6, 3, 3, 1);
        assert_eq!(s.painted(), 4);
        assert_eq!(s.pixel(7, 7), Some(1));
    }

    #[test]
    fn batch_accounting() {
        let mut s = MemorySurface::new(1, 1);
        s.start_write();
        s.start_write();
        s.end_write();
        assert!(!s.batches_balanced());
        s.end_write();
        assert!(s.batches_balanced());
        assert_eq!(s.max_batch_depth(), 2);
        s.end_write();
        assert!(!s.batches_balanced());
        s.clear();
        assert!(s.batches_balanced());
    }
}
