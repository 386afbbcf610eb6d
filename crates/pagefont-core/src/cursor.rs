#![forbid(unsafe_code)]

//! Text cursor and line layout.
//!
//! The cursor owns position, colours, scale and the wrap flag. Each decoded
//! code point is placed by [`TextCursor::write_code_point`], which decides
//! between the custom-font path and the fixed 6x8 fallback, breaks lines,
//! draws, and advances. The result is reported as a [`LayoutOutcome`] so
//! that silently dropped characters stay observable.

use crate::config::TextConfig;
use crate::font::FontDescriptor;
use crate::raster::draw_glyph;
use crate::surface::{Color, Scale, Surface};
use crate::utf8::CodePoint;

/// Horizontal advance of a fallback glyph at scale 1.
pub const FALLBACK_ADVANCE: i32 = 6;
/// Line height of the fallback font at scale 1.
pub const FALLBACK_LINE_HEIGHT: i32 = 8;

const NEWLINE: CodePoint = b'\n' as CodePoint;
const CARRIAGE_RETURN: CodePoint = b'\r' as CodePoint;

/// Why a code point produced neither a draw nor an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No font on the code point's page and the value does not fit the
    /// 8-bit fallback font.
    NoFontForPage,
    /// The page font does not cover the code point.
    OutsideFontRange,
}

/// What placing a single code point did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Line break: x reset, y advanced by one line.
    Newline,
    /// Carriage return, consumed without effect.
    CarriageReturn,
    /// Glyph drawn; `wrapped` when a line break preceded it.
    Drawn { wrapped: bool },
    /// Blank glyph: cursor advanced without drawing.
    Advanced,
    /// Nothing happened.
    Dropped(DropReason),
}

/// Cursor position and text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    pub x: i32,
    pub y: i32,
    pub fg: Color,
    pub bg: Color,
    pub scale: Scale,
    pub wrap: bool,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::from_config(&TextConfig::default())
    }
}

impl TextCursor {
    /// Cursor at the origin styled by `config`.
    #[must_use]
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            x: 0,
            y: 0,
            fg: config.fg,
            bg: config.bg,
            scale: config.scale,
            wrap: config.wrap,
        }
    }

    /// Line height for `font` (or the fallback) at the current scale.
    #[must_use]
    pub fn line_height(&self, font: Option<&FontDescriptor<'_>>) -> i32 {
        let unscaled = font.map_or(FALLBACK_LINE_HEIGHT, |f| i32::from(f.y_advance()));
        i32::from(self.scale.y) * unscaled
    }

    /// Move to the start of the next line.
    pub fn newline(&mut self, font: Option<&FontDescriptor<'_>>) {
        self.x = 0;
        self.y = self.y.saturating_add(self.line_height(font));
    }

    /// Place one code point using `font` (the page font for `code`, or
    /// `None` for the fallback font).
    pub fn write_code_point<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        code: CodePoint,
        font: Option<&FontDescriptor<'_>>,
    ) -> LayoutOutcome {
        match code {
            NEWLINE => {
                self.newline(font);
                LayoutOutcome::Newline
            }
            CARRIAGE_RETURN => LayoutOutcome::CarriageReturn,
            _ => match font {
                Some(font) => self.place_custom(surface, code, font),
                None => self.place_fallback(surface, code),
            },
        }
    }

    fn place_fallback<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        code: CodePoint,
    ) -> LayoutOutcome {
        let Ok(ch) = u8::try_from(code) else {
            return LayoutOutcome::Dropped(DropReason::NoFontForPage);
        };
        let advance = i32::from(self.scale.x) * FALLBACK_ADVANCE;
        let wrapped = self.wrap && self.x.saturating_add(advance) > surface.width();
        if wrapped {
            self.newline(None);
        }
        surface.draw_fallback_char(self.x, self.y, ch, self.fg, self.bg, self.scale);
        self.x = self.x.saturating_add(advance);
        LayoutOutcome::Drawn { wrapped }
    }

    fn place_custom<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        code: CodePoint,
        font: &FontDescriptor<'_>,
    ) -> LayoutOutcome {
        let Some(glyph) = font.glyph(code) else {
            return LayoutOutcome::Dropped(DropReason::OutsideFontRange);
        };
        let sx = i32::from(self.scale.x);
        let advance = i32::from(glyph.x_advance) * sx;

        if glyph.is_blank() {
            self.x = self.x.saturating_add(advance);
            return LayoutOutcome::Advanced;
        }

        let right = self
            .x
            .saturating_add(sx * (i32::from(glyph.x_offset) + i32::from(glyph.width)));
        let wrapped = self.wrap && right > surface.width();
        if wrapped {
            self.newline(Some(font));
        }
        draw_glyph(
            surface, self.x, self.y, code, self.fg, self.bg, self.scale, font,
        );
        self.x = self.x.saturating_add(advance);
        LayoutOutcome::Drawn { wrapped }
    }
}
