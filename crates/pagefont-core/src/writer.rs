#![forbid(unsafe_code)]

//! Byte-stream text writer.
//!
//! [`TextWriter`] is the single rendering context: it owns the UTF-8 decoder,
//! the font page table and the cursor, and draws onto a bound [`Surface`].
//! Bytes are consumed one at a time:
//!
//! ```text
//! byte -> Utf8Decoder -> code point -> FontPageTable -> TextCursor -> Surface
//! ```
//!
//! Until a surface is bound every drawing call is a no-op and
//! [`TextWriter::consume_byte`] reports 0 bytes consumed.
//!
//! # Example
//!
//! ```
//! use pagefont_core::{Color, Scale, Surface, TextWriter};
//!
//! struct Null;
//! impl Surface for Null {
//!     fn write_pixel(&mut self, _: i32, _: i32, _: Color) {}
//!     fn write_fill_rect(&mut self, _: i32, _: i32, _: i32, _: i32, _: Color) {}
//!     fn start_write(&mut self) {}
//!     fn end_write(&mut self) {}
//!     fn width(&self) -> i32 { 128 }
//!     fn draw_fallback_char(&mut self, _: i32, _: i32, _: u8, _: Color, _: Color, _: Scale) {}
//! }
//!
//! let mut writer: TextWriter<'_, Null> = TextWriter::new();
//! assert_eq!(writer.consume_byte(b'A'), 0);
//! writer.bind(Null);
//! assert_eq!(writer.write_bytes(b"hi\n"), 3);
//! assert_eq!((writer.cursor_x(), writer.cursor_y()), (0, 8));
//! ```

use core::fmt;

use crate::config::TextConfig;
use crate::cursor::{LayoutOutcome, TextCursor};
use crate::font::FontDescriptor;
use crate::pages::FontPageTable;
use crate::raster::draw_glyph;
use crate::surface::{Color, Scale, Surface};
use crate::utf8::{CodePoint, NO_CHAR, Utf8Decoder};

/// Rendering context for one text stream.
#[derive(Debug)]
pub struct TextWriter<'f, S> {
    surface: Option<S>,
    decoder: Utf8Decoder,
    fonts: FontPageTable<'f>,
    cursor: TextCursor,
    last_outcome: Option<LayoutOutcome>,
}

impl<S: Surface> Default for TextWriter<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f, S: Surface> TextWriter<'f, S> {
    /// Unbound writer with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TextConfig::default())
    }

    /// Unbound writer styled by `config`.
    #[must_use]
    pub fn with_config(config: TextConfig) -> Self {
        Self {
            surface: None,
            decoder: Utf8Decoder::new(),
            fonts: FontPageTable::new(),
            cursor: TextCursor::from_config(&config),
            last_outcome: None,
        }
    }

    // ── Binding ──────────────────────────────────────────────────

    /// Attach the surface to draw on, replacing any previous one.
    pub fn bind(&mut self, surface: S) -> Option<S> {
        #[cfg(feature = "tracing")]
        tracing::debug!(width = surface.width(), "text writer bound");
        self.surface.replace(surface)
    }

    /// Detach and return the surface.
    pub fn unbind(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// The bound surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable access to the bound surface, if any.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    // ── Stream ───────────────────────────────────────────────────

    /// Consume one byte of UTF-8 text.
    ///
    /// Returns 1 once bound (whether or not anything was drawn) and 0 while
    /// unbound.
    pub fn consume_byte(&mut self, byte: u8) -> usize {
        let Some(surface) = self.surface.as_mut() else {
            return 0;
        };
        let code = self.decoder.feed(byte);
        if code == NO_CHAR {
            return 1;
        }
        let font = self.fonts.lookup(code);
        let outcome = self.cursor.write_code_point(surface, code, font);

        #[cfg(feature = "tracing")]
        tracing::trace!(code, ?outcome, x = self.cursor.x, y = self.cursor.y, "code point");

        self.last_outcome = Some(outcome);
        1
    }

    /// Consume every byte of `bytes`, returning the number consumed.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&b| self.consume_byte(b)).sum()
    }

    /// Layout result of the most recent complete code point.
    #[must_use]
    pub fn last_outcome(&self) -> Option<LayoutOutcome> {
        self.last_outcome
    }

    /// The decoder, e.g. to check for a pending multi-byte sequence.
    #[must_use]
    pub fn decoder(&self) -> &Utf8Decoder {
        &self.decoder
    }

    // ── Direct drawing ───────────────────────────────────────────

    /// Draw one character at `(x, y)` without touching the cursor.
    ///
    /// With a font, codes outside its range draw nothing. Without one, the
    /// fallback renderer is used for codes up to 255.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char(
        &mut self,
        x: i32,
        y: i32,
        code: CodePoint,
        fg: Color,
        bg: Color,
        scale: Scale,
        font: Option<&FontDescriptor<'_>>,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match font {
            Some(font) => {
                draw_glyph(surface, x, y, code, fg, bg, scale, font);
            }
            None => {
                if let Ok(ch) = u8::try_from(code) {
                    surface.draw_fallback_char(x, y, ch, fg, bg, scale);
                }
            }
        }
    }

    // ── Fonts ────────────────────────────────────────────────────

    /// Install `font` at its own page and as the page-0 default, or clear
    /// the page-0 default with `None`.
    pub fn set_font(&mut self, font: Option<&'f FontDescriptor<'f>>) {
        #[cfg(feature = "tracing")]
        match font {
            Some(f) => tracing::debug!(first = f.first(), last = f.last(), "default font set"),
            None => tracing::debug!("default font cleared"),
        }
        self.fonts.set_default(font);
    }

    /// Install `font` at exactly `page` (or clear it with `None`).
    ///
    /// Returns `false`, leaving the page untouched, when `font` does not
    /// start on `page`.
    pub fn set_font_at_page(&mut self, font: Option<&'f FontDescriptor<'f>>, page: u8) -> bool {
        let changed = self.fonts.set_page(font, page);
        #[cfg(feature = "tracing")]
        if !changed {
            tracing::debug!(page, "font rejected: range starts on another page");
        }
        changed
    }

    /// Font that would render `code`, if any.
    #[must_use]
    pub fn font_for(&self, code: CodePoint) -> Option<&'f FontDescriptor<'f>> {
        self.fonts.lookup(code)
    }

    /// The page table of installed fonts.
    #[must_use]
    pub fn fonts(&self) -> &FontPageTable<'f> {
        &self.fonts
    }

    // ── Cursor and style ─────────────────────────────────────────

    /// Move the cursor to `(x, y)`, the baseline origin of the next glyph.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor.x = x;
        self.cursor.y = y;
    }

    /// Current cursor x.
    #[must_use]
    pub fn cursor_x(&self) -> i32 {
        self.cursor.x
    }

    /// Current cursor y.
    #[must_use]
    pub fn cursor_y(&self) -> i32 {
        self.cursor.y
    }

    /// Full cursor and style state.
    #[must_use]
    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    /// Set the foreground colour, keeping the background.
    pub fn set_text_color(&mut self, fg: Color) {
        self.cursor.fg = fg;
    }

    /// Set foreground and background colours.
    pub fn set_text_colors(&mut self, fg: Color, bg: Color) {
        self.cursor.fg = fg;
        self.cursor.bg = bg;
    }

    /// Uniform scale; 0 is treated as 1.
    pub fn set_text_size(&mut self, s: u8) {
        self.cursor.scale = Scale::uniform(s);
    }

    /// Per-axis scale; 0 is treated as 1.
    pub fn set_text_size_xy(&mut self, sx: u8, sy: u8) {
        self.cursor.scale = Scale::new(sx, sy);
    }

    /// Enable or disable wrapping at the surface's right edge.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.cursor.wrap = wrap;
    }
}

impl<S: Surface> fmt::Write for TextWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if !self.is_bound() {
            return Err(fmt::Error);
        }
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
