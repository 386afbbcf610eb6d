#![forbid(unsafe_code)]

//! Fixture fonts from ASCII art.
//!
//! Produces the same packed blobs a font converter would: a 7-byte record
//! per code point and a bitmap blob where each glyph starts on a byte
//! boundary and its rows follow each other without padding.
//!
//! ```
//! use pagefont_harness::FontBuilder;
//!
//! let owned = FontBuilder::new(12)
//!     .glyph(0x41, ["#.#", ".#.", "#.#"], (0, -3), 4)
//!     .blank(0x20, 3)
//!     .build();
//! let font = owned.descriptor().unwrap();
//! assert_eq!((font.first(), font.last()), (0x20, 0x41));
//! ```

use std::collections::BTreeMap;

use pagefont_core::{CodePoint, FontDescriptor, FontError, Glyph};

#[derive(Debug, Clone)]
struct GlyphArt {
    width: u8,
    height: u8,
    offset: (i8, i8),
    x_advance: u8,
    bits: Vec<bool>,
}

/// Builder for [`OwnedFont`].
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    y_advance: u8,
    range: Option<(CodePoint, CodePoint)>,
    glyphs: BTreeMap<CodePoint, GlyphArt>,
}

impl FontBuilder {
    /// Empty font with the given line height.
    #[must_use]
    pub fn new(y_advance: u8) -> Self {
        Self {
            y_advance,
            ..Self::default()
        }
    }

    /// Force the covered range instead of deriving it from the glyphs.
    #[must_use]
    pub fn range(mut self, first: CodePoint, last: CodePoint) -> Self {
        self.range = Some((first, last));
        self
    }

    /// Add a glyph drawn with `#` (set) and any other character (clear).
    ///
    /// # Panics
    ///
    /// * If the rows differ in width.
    /// * If the glyph is wider or taller than 255 pixels.
    #[must_use]
    pub fn glyph<const N: usize>(
        mut self,
        code: CodePoint,
        rows: [&str; N],
        offset: (i8, i8),
        x_advance: u8,
    ) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count());
        assert!(
            rows.iter().all(|r| r.chars().count() == width),
            "ragged glyph rows for {code:#06x}"
        );
        let bits = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        let art = GlyphArt {
            width: u8::try_from(width).expect("glyph wider than 255"),
            height: u8::try_from(N).expect("glyph taller than 255"),
            offset,
            x_advance,
            bits,
        };
        self.glyphs.insert(code, art);
        self
    }

    /// Add a glyph without pixels that only advances the cursor.
    #[must_use]
    pub fn blank(mut self, code: CodePoint, x_advance: u8) -> Self {
        self.glyphs.insert(
            code,
            GlyphArt {
                width: 0,
                height: 0,
                offset: (0, 0),
                x_advance,
                bits: Vec::new(),
            },
        );
        self
    }

    /// Pack the glyphs. Codes in range without a glyph get an empty record.
    ///
    /// # Panics
    ///
    /// * If a glyph would start past byte 65535 of the bitmap blob.
    #[must_use]
    pub fn build(self) -> OwnedFont {
        let (first, last) = self.range.unwrap_or_else(|| {
            let first = self.glyphs.keys().next().copied().unwrap_or(0);
            let last = self.glyphs.keys().next_back().copied().unwrap_or(0);
            (first, last)
        });

        let mut bitmap = Vec::new();
        let mut table = Vec::new();
        for code in first..=last {
            let glyph = match self.glyphs.get(&code) {
                Some(art) => {
                    let offset = u16::try_from(bitmap.len()).expect("bitmap blob over 64 KiB");
                    bitmap.extend(pack_bits(&art.bits));
                    Glyph {
                        bitmap_offset: offset,
                        width: art.width,
                        height: art.height,
                        x_offset: art.offset.0,
                        y_offset: art.offset.1,
                        x_advance: art.x_advance,
                    }
                }
                None => Glyph::default(),
            };
            table.extend_from_slice(&glyph.to_record());
        }

        OwnedFont {
            bitmap,
            table,
            first,
            last,
            y_advance: self.y_advance,
        }
    }
}

/// Pack bits MSB first, padding only the final byte.
#[must_use]
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &on)| if on { acc | (0x80 >> i) } else { acc })
        })
        .collect()
}

/// Font blobs owned by the test, borrowed by [`FontDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFont {
    pub bitmap: Vec<u8>,
    pub table: Vec<u8>,
    pub first: CodePoint,
    pub last: CodePoint,
    pub y_advance: u8,
}

impl OwnedFont {
    /// Borrow as a validated descriptor.
    pub fn descriptor(&self) -> Result<FontDescriptor<'_>, FontError> {
        FontDescriptor::new(
            &self.bitmap,
            &self.table,
            self.first,
            self.last,
            self.y_advance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_msb_first_across_rows() {
        let bits = [true, false, true, false, true, false, true, false, true];
        assert_eq!(pack_bits(&bits), vec![0b1010_1010, 0b1000_0000]);
        assert!(pack_bits(&[]).is_empty());
    }

    #[test]
    fn glyphs_start_on_byte_boundaries() {
        let owned = FontBuilder::new(8)
            .glyph(0x41, ["###"], (0, 0), 4)
            .glyph(0x42, ["#.."], (0, 0), 4)
            .build();
        assert_eq!(owned.bitmap, vec![0b1110_0000, 0b1000_0000]);
        let font = owned.descriptor().unwrap();
        assert_eq!(font.glyph(0x42).unwrap().bitmap_offset, 1);
    }

    #[test]
    fn gaps_get_empty_records() {
        let owned = FontBuilder::new(8)
            .blank(0x20, 3)
            .glyph(0x23, ["#"], (0, -1), 2)
            .build();
        let font = owned.descriptor().unwrap();
        assert_eq!(font.glyphs().len(), 4);
        assert_eq!(font.glyph(0x21), Some(Glyph::default()));
        assert_eq!(font.glyph(0x20).unwrap().x_advance, 3);
    }

    #[test]
    #[should_panic(expected = "ragged glyph rows")]
    fn ragged_rows_are_rejected() {
        let _ = FontBuilder::new(8).glyph(0x41, ["##", "#"], (0, 0), 3);
    }

    #[test]
    #[should_panic(expected = "glyph wider than 255")]
    fn oversized_glyph_is_rejected() {
        let row = "#".repeat(256);
        let _ = FontBuilder::new(8).glyph(0x41, [row.as_str()], (0, 0), 3);
    }

    #[test]
    fn explicit_range_wins() {
        let owned = FontBuilder::new(8)
            .range(0x0400, 0x0402)
            .glyph(0x0401, ["#"], (0, 0), 1)
            .build();
        let font = owned.descriptor().unwrap();
        assert_eq!(font.page(), 4);
        assert_eq!(font.glyphs().len(), 3);
    }
}
