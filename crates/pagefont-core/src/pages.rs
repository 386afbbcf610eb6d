#![forbid(unsafe_code)]

//! Per-page font table.
//!
//! The 16-bit code point space is split into 256 pages of 256 code points.
//! Each page may reference one installed font. Page 0 doubles as the
//! default slot: installing a font with [`FontPageTable::set_default`] also
//! puts it at page 0, so ASCII controls such as newline and space resolve to
//! that font even when its own range starts on a higher page.

use crate::font::FontDescriptor;
use crate::utf8::CodePoint;

/// Number of pages in the code point space.
pub const PAGE_COUNT: usize = 256;

/// Page index for a code point.
#[must_use]
pub const fn page_of(code: CodePoint) -> u8 {
    (code >> 8) as u8
}

/// Fixed-size table of borrowed font references.
#[derive(Debug, Clone)]
pub struct FontPageTable<'f> {
    pages: [Option<&'f FontDescriptor<'f>>; PAGE_COUNT],
}

impl Default for FontPageTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f> FontPageTable<'f> {
    /// Empty table: every page uses the fallback font.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: [None; PAGE_COUNT],
        }
    }

    /// Install `font` at its own page and at page 0, or clear page 0.
    pub fn set_default(&mut self, font: Option<&'f FontDescriptor<'f>>) {
        match font {
            Some(font) => {
                self.pages[usize::from(font.page())] = Some(font);
                self.pages[0] = Some(font);
            }
            None => self.pages[0] = None,
        }
    }

    /// Install `font` at exactly `page`, or clear `page` when `font` is `None`.
    ///
    /// A font whose range does not start on `page` is not installed and the
    /// page keeps its previous entry. Returns whether the table changed.
    pub fn set_page(&mut self, font: Option<&'f FontDescriptor<'f>>, page: u8) -> bool {
        match font {
            Some(font) if font.page() == page => {
                self.pages[usize::from(page)] = Some(font);
                true
            }
            Some(_) => false,
            None => {
                self.pages[usize::from(page)] = None;
                true
            }
        }
    }

    /// Font responsible for `code`, if any.
    #[must_use]
    pub fn lookup(&self, code: CodePoint) -> Option<&'f FontDescriptor<'f>> {
        self.get(page_of(code))
    }

    /// Entry at `page`.
    #[must_use]
    pub fn get(&self, page: u8) -> Option<&'f FontDescriptor<'f>> {
        self.pages[usize::from(page)]
    }

    /// Remove every installed font.
    pub fn clear(&mut self) {
        self.pages = [None; PAGE_COUNT];
    }

    /// Pages that currently reference a font.
    pub fn installed_pages(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&page| self.pages[usize::from(page)].is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GLYPH_RECORD_LEN, Glyph};

    const BLANK: [u8; GLYPH_RECORD_LEN] = Glyph {
        bitmap_offset: 0,
        width: 0,
        height: 0,
        x_offset: 0,
        y_offset: 0,
        x_advance: 4,
    }
    .to_record();

    fn font_at(first: CodePoint) -> FontDescriptor<'static> {
        FontDescriptor::new(&[], &BLANK, first, first, 10).unwrap()
    }

    #[test]
    fn empty_table_has_no_fonts() {
        let table = FontPageTable::new();
        assert!(table.lookup(0x41).is_none());
        assert_eq!(table.installed_pages().count(), 0);
    }

    #[test]
    fn set_default_aliases_page_zero() {
        let cyrillic = font_at(0x0410);
        let mut table = FontPageTable::new();
        table.set_default(Some(&cyrillic));

        assert_eq!(table.lookup(0x0410), Some(&cyrillic));
        assert_eq!(table.lookup(0x000A), Some(&cyrillic));
        assert_eq!(table.installed_pages().collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn set_default_none_clears_only_page_zero() {
        let cyrillic = font_at(0x0410);
        let mut table = FontPageTable::new();
        table.set_default(Some(&cyrillic));
        table.set_default(None);

        assert!(table.get(0).is_none());
        assert_eq!(table.get(4), Some(&cyrillic));
    }

    #[test]
    fn set_page_accepts_matching_page() {
        let greek = font_at(0x0391);
        let mut table = FontPageTable::new();
        assert!(table.set_page(Some(&greek), 3));
        assert_eq!(table.lookup(0x03A9), Some(&greek));
        assert!(table.get(0).is_none());
    }

    #[test]
    fn set_page_rejects_mismatch_and_keeps_entry() {
        let greek = font_at(0x0391);
        let cyrillic = font_at(0x0410);
        let mut table = FontPageTable::new();
        table.set_page(Some(&greek), 3);

        assert!(!table.set_page(Some(&cyrillic), 3));
        assert_eq!(table.get(3), Some(&greek));
        assert!(!table.set_page(Some(&cyrillic), 5));
        assert!(table.get(5).is_none());
    }

    #[test]
    fn set_page_none_clears() {
        let greek = font_at(0x0391);
        let mut table = FontPageTable::new();
        table.set_page(Some(&greek), 3);
        assert!(table.set_page(None, 3));
        assert!(table.get(3).is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let latin = font_at(0x0020);
        let mut table = FontPageTable::new();
        table.set_default(Some(&latin));
        table.clear();
        assert_eq!(table.installed_pages().count(), 0);
    }
}
