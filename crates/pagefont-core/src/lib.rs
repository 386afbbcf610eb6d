#![forbid(unsafe_code)]

//! Paged bitmap-font text rendering.
//!
//! `pagefont-core` turns a UTF-8 byte stream into glyph blits on any pixel
//! surface. Fonts are variable-width 1bpp bitmaps, each covering a range of
//! 16-bit code points; one font can be installed per 256-code-point page,
//! and pages without a font fall back to the surface's fixed 6x8 glyphs.
//!
//! # Primary responsibilities
//!
//! - **utf8**: byte-at-a-time decoder for 1-3 byte sequences.
//! - **font**: typed, bounds-checked views over externally owned font blobs.
//! - **pages**: 256-entry page table with the page-0 default alias.
//! - **raster**: MSB-first bit walker with integer upscaling.
//! - **cursor**: line layout, wrapping and advance.
//! - **writer**: the per-stream rendering context tying it all together.
//!
//! # Design principles
//!
//! - **Total**: every byte and every code point has a defined, non-panicking
//!   outcome; silent drops are reported as [`LayoutOutcome`] values.
//! - **Borrowed fonts**: font data is never copied or freed here.
//! - **`#![forbid(unsafe_code)]`**: safety enforced at compile time.

pub mod config;
pub mod cursor;
pub mod font;
pub mod pages;
pub mod raster;
pub mod surface;
pub mod utf8;
pub mod writer;

pub use config::TextConfig;
pub use cursor::{DropReason, FALLBACK_ADVANCE, FALLBACK_LINE_HEIGHT, LayoutOutcome, TextCursor};
pub use font::{FontDescriptor, FontError, GLYPH_RECORD_LEN, Glyph, GlyphTable};
pub use pages::{FontPageTable, PAGE_COUNT, page_of};
pub use raster::draw_glyph;
pub use surface::{Batch, Color, Scale, Surface};
pub use utf8::{CodePoint, DecoderState, NO_CHAR, Utf8Decoder};
pub use writer::TextWriter;
