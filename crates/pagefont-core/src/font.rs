#![forbid(unsafe_code)]

//! Bitmap font descriptors.
//!
//! A font covers an inclusive code point range `first..=last` and is made of
//! two borrowed blobs produced by an external font converter:
//!
//! - a glyph table of packed 7-byte little-endian records, one per code
//!   point in the range, and
//! - a shared 1-bit-per-pixel bitmap blob that every record points into.
//!
//! ```text
//! Glyph record (7 bytes):
//!   0..2  bitmap_offset  u16 LE
//!   2     width          u8
//!   3     height         u8
//!   4     x_offset       i8   cursor -> glyph left edge
//!   5     y_offset       i8   cursor (baseline) -> glyph top edge
//!   6     x_advance      u8
//! ```
//!
//! Bitmaps are packed MSB first, row-major, with no padding between rows.
//! [`FontDescriptor::new`] checks every record against the bitmap blob once,
//! so lookups and blits afterwards never index outside font data.

use std::fmt;

use crate::utf8::CodePoint;

/// Size in bytes of one packed glyph record.
pub const GLYPH_RECORD_LEN: usize = 7;

/// Per-glyph metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Byte index of the glyph's first bitmap byte.
    pub bitmap_offset: u16,
    pub width: u8,
    pub height: u8,
    pub x_offset: i8,
    pub y_offset: i8,
    /// Horizontal cursor advance in unscaled pixels.
    pub x_advance: u8,
}

impl Glyph {
    /// Decode one packed record.
    #[must_use]
    pub const fn from_record(rec: [u8; GLYPH_RECORD_LEN]) -> Self {
        Self {
            bitmap_offset: u16::from_le_bytes([rec[0], rec[1]]),
            width: rec[2],
            height: rec[3],
            x_offset: rec[4] as i8,
            y_offset: rec[5] as i8,
            x_advance: rec[6],
        }
    }

    /// Encode into the packed record layout.
    #[must_use]
    pub const fn to_record(self) -> [u8; GLYPH_RECORD_LEN] {
        let off = self.bitmap_offset.to_le_bytes();
        [
            off[0],
            off[1],
            self.width,
            self.height,
            self.x_offset as u8,
            self.y_offset as u8,
            self.x_advance,
        ]
    }

    /// True for glyphs with nothing to draw (e.g. space).
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bitmap bytes the glyph spans.
    #[must_use]
    pub const fn bitmap_len(&self) -> usize {
        (self.width as usize * self.height as usize).div_ceil(8)
    }
}

/// Borrowed view over a packed glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTable<'f> {
    raw: &'f [u8],
}

impl<'f> GlyphTable<'f> {
    /// Wrap raw record bytes. Trailing bytes short of a full record are ignored.
    #[must_use]
    pub const fn new(raw: &'f [u8]) -> Self {
        Self { raw }
    }

    /// Number of complete records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len() / GLYPH_RECORD_LEN
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Glyph> {
        let start = index.checked_mul(GLYPH_RECORD_LEN)?;
        let rec = self.raw.get(start..start + GLYPH_RECORD_LEN)?;
        let rec: [u8; GLYPH_RECORD_LEN] = rec.try_into().ok()?;
        Some(Glyph::from_record(rec))
    }

    /// Iterate over all records in table order.
    pub fn iter(&self) -> impl Iterator<Item = Glyph> + 'f {
        self.raw
            .chunks_exact(GLYPH_RECORD_LEN)
            .filter_map(|rec| rec.try_into().ok().map(Glyph::from_record))
    }
}

/// Font construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// `first > last`.
    InvertedRange { first: CodePoint, last: CodePoint },
    /// Glyph table byte length does not match `last - first + 1` records.
    GlyphTableLength { expected: usize, actual: usize },
    /// A glyph's bitmap runs past the end of the bitmap blob.
    BitmapOutOfBounds {
        code: CodePoint,
        end: usize,
        len: usize,
    },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { first, last } => {
                write!(f, "font range inverted: first {first:#06x} > last {last:#06x}")
            }
            Self::GlyphTableLength { expected, actual } => write!(
                f,
                "glyph table is {actual} bytes, expected {expected} ({GLYPH_RECORD_LEN} per glyph)"
            ),
            Self::BitmapOutOfBounds { code, end, len } => write!(
                f,
                "glyph {code:#06x} bitmap ends at byte {end}, blob is {len} bytes"
            ),
        }
    }
}

impl std::error::Error for FontError {}

/// Immutable, externally owned bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDescriptor<'f> {
    bitmap: &'f [u8],
    glyphs: GlyphTable<'f>,
    first: CodePoint,
    last: CodePoint,
    y_advance: u8,
}

impl<'f> FontDescriptor<'f> {
    /// Assemble a descriptor from its blobs, validating the range, the
    /// table length and every glyph's bitmap span.
    pub fn new(
        bitmap: &'f [u8],
        glyph_table: &'f [u8],
        first: CodePoint,
        last: CodePoint,
        y_advance: u8,
    ) -> Result<Self, FontError> {
        if first > last {
            return Err(FontError::InvertedRange { first, last });
        }
        let count = usize::from(last - first) + 1;
        let expected = count * GLYPH_RECORD_LEN;
        if glyph_table.len() != expected {
            return Err(FontError::GlyphTableLength {
                expected,
                actual: glyph_table.len(),
            });
        }

        let glyphs = GlyphTable::new(glyph_table);
        for (code, glyph) in (first..=last).zip(glyphs.iter()) {
            if glyph.is_blank() {
                continue;
            }
            let end = usize::from(glyph.bitmap_offset) + glyph.bitmap_len();
            if end > bitmap.len() {
                return Err(FontError::BitmapOutOfBounds {
                    code,
                    end,
                    len: bitmap.len(),
                });
            }
        }

        Ok(Self {
            bitmap,
            glyphs,
            first,
            last,
            y_advance,
        })
    }

    /// First code point covered (inclusive).
    #[must_use]
    pub const fn first(&self) -> CodePoint {
        self.first
    }

    /// Last code point covered (inclusive).
    #[must_use]
    pub const fn last(&self) -> CodePoint {
        self.last
    }

    /// Line height in unscaled pixels.
    #[must_use]
    pub const fn y_advance(&self) -> u8 {
        self.y_advance
    }

    /// Page this font naturally belongs to (`first / 256`).
    #[must_use]
    pub const fn page(&self) -> u8 {
        (self.first >> 8) as u8
    }

    /// Whether `code` lies within `first..=last`.
    #[must_use]
    pub const fn covers(&self, code: CodePoint) -> bool {
        code >= self.first && code <= self.last
    }

    /// Metrics for `code`, or `None` outside the covered range.
    #[must_use]
    pub fn glyph(&self, code: CodePoint) -> Option<Glyph> {
        if !self.covers(code) {
            return None;
        }
        self.glyphs.get(usize::from(code - self.first))
    }

    /// The glyph table view.
    #[must_use]
    pub const fn glyphs(&self) -> GlyphTable<'f> {
        self.glyphs
    }

    /// Bitmap bytes for `glyph`. Empty for blank glyphs.
    #[must_use]
    pub fn glyph_bitmap(&self, glyph: &Glyph) -> &'f [u8] {
        let start = usize::from(glyph.bitmap_offset);
        self.bitmap
            .get(start..start + glyph.bitmap_len())
            .unwrap_or(&[])
    }

    /// The whole shared bitmap blob.
    #[must_use]
    pub const fn bitmap(&self) -> &'f [u8] {
        self.bitmap
    }
}
