#![forbid(unsafe_code)]

//! Pixel surface abstraction.
//!
//! The rendering core never touches pixels directly. Everything it draws goes
//! through [`Surface`], which a display driver (or a test double) implements.
//! Batches of writes are bracketed by [`Batch`], whose `Drop` guarantees the
//! closing `end_write` call on every path.

use core::ops::{Deref, DerefMut};

/// Raw 16-bit surface colour (commonly RGB565). Passed through untouched.
pub type Color = u16;

/// Integer text magnification, each axis at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    pub x: u8,
    pub y: u8,
}

impl Scale {
    /// 1x1, no magnification.
    pub const ONE: Self = Self { x: 1, y: 1 };

    /// Build a scale, clamping zero axes to 1.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self {
            x: if x == 0 { 1 } else { x },
            y: if y == 0 { 1 } else { y },
        }
    }

    /// Same factor on both axes.
    #[must_use]
    pub const fn uniform(s: u8) -> Self {
        Self::new(s, s)
    }

    #[must_use]
    pub const fn is_one(self) -> bool {
        self.x == 1 && self.y == 1
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Drawing capabilities the text renderer needs from a display.
pub trait Surface {
    /// Write a single pixel. Coordinates may lie off-surface; clipping is
    /// the implementor's job.
    fn write_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fill a `w x h` rectangle with its top-left corner at `(x, y)`.
    fn write_fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    /// Open a batch of writes.
    fn start_write(&mut self);

    /// Close the batch opened by [`Surface::start_write`].
    fn end_write(&mut self);

    /// Surface width in pixels, used for wrapping.
    fn width(&self) -> i32;

    /// Draw one glyph of the built-in fixed 6x8 font.
    fn draw_fallback_char(
        &mut self,
        x: i32,
        y: i32,
        ch: u8,
        fg: Color,
        bg: Color,
        scale: Scale,
    );
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        (**self).write_pixel(x, y, color);
    }

    fn write_fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        (**self).write_fill_rect(x, y, w, h, color);
    }

    fn start_write(&mut self) {
        (**self).start_write();
    }

    fn end_write(&mut self) {
        (**self).end_write();
    }

    fn width(&self) -> i32 {
        (**self).width()
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
        (**self).draw_fallback_char(x, y, ch, fg, bg, scale);
    }
}

/// Scoped write batch: `start_write` on creation, `end_write` on drop.
pub struct Batch<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> Batch<'s, S> {
    /// Open a batch on `surface`.
    pub fn begin(surface: &'s mut S) -> Self {
        surface.start_write();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for Batch<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Batch<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Batch<'_, S> {
    fn drop(&mut self) {
        self.surface.end_write();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts: u32,
        ends: u32,
        pixels: u32,
    }

    impl Surface for Counter {
        fn write_pixel(&mut self, _x: i32, _y: i32, _color: Color) {
            self.pixels += 1;
        }
        fn write_fill_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _color: Color) {}
        fn start_write(&mut self) {
            self.starts += 1;
        }
        fn end_write(&mut self) {
            self.ends += 1;
        }
        fn width(&self) -> i32 {
            32
        }
        fn draw_fallback_char(&mut self, _: i32, _: i32, _: u8, _: Color, _: Color, _: Scale) {}
    }

    #[test]
    fn scale_clamps_zero() {
        assert_eq!(Scale::new(0, 3), Scale { x: 1, y: 3 });
        assert_eq!(Scale::uniform(0), Scale::ONE);
        assert!(Scale::default().is_one());
        assert!(!Scale::uniform(2).is_one());
    }

    #[test]
    fn batch_brackets_writes() {
        let mut s = Counter::default();
        {
            let mut batch = Batch::begin(&mut s);
            batch.write_pixel(0, 0, 1);
            assert_eq!(batch.starts, 1);
            assert_eq!(batch.ends, 0);
        }
        assert_eq!((s.starts, s.ends, s.pixels), (1, 1, 1));
    }

    #[test]
    fn empty_batch_still_closes() {
        let mut s = Counter::default();
        drop(Batch::begin(&mut s));
        assert_eq!((s.starts, s.ends), (1, 1));
    }

    fn exercise<S: Surface>(mut s: S) -> i32 {
        s.start_write();
        s.write_pixel(1, 1, 0);
        s.end_write();
        s.width()
    }

    #[test]
    fn mut_ref_forwards() {
        let mut s = Counter::default();
        assert_eq!(exercise(&mut s), 32);
        assert_eq!((s.starts, s.ends, s.pixels), (1, 1, 1));
    }
}
