//! Property-based invariants for the text writer.
//!
//! For **any** byte stream:
//!
//! 1. Consuming never panics and reports one byte per byte once bound.
//! 2. Every write batch opened on the surface is closed, never nested.
//! 3. Valid BMP text decodes to exactly one layout step per character.
//! 4. Rendering is deterministic.

use pagefont_core::{Scale, TextWriter};
use pagefont_harness::{FontBuilder, MemorySurface, OwnedFont, SurfaceOp};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Small Latin-1 font with a few blanks and a Cyrillic page font.
fn fonts() -> (OwnedFont, OwnedFont) {
    let latin = FontBuilder::new(10)
        .range(0x20, 0xFF)
        .blank(0x20, 3)
        .glyph(0x41, [".#.", "#.#", "###", "#.#"], (0, -4), 4)
        .glyph(0x61, ["##", "##"], (0, -2), 3)
        .glyph(0xE9, [".#", "##"], (0, -2), 3)
        .build();
    let cyrillic = FontBuilder::new(12)
        .glyph(0x0410, ["###", "#.#"], (1, -2), 5)
        .glyph(0x0411, ["##.", "###"], (1, -2), 5)
        .build();
    (latin, cyrillic)
}

fn scale() -> impl Strategy<Value = Scale> {
    (0u8..=4, 0u8..=4).prop_map(|(x, y)| Scale::new(x, y))
}

fn render(bytes: &[u8], wrap: bool, scale: Scale, with_fonts: bool) -> MemorySurface {
    let (latin, cyrillic) = fonts();
    let latin = latin.descriptor().unwrap();
    let cyrillic = cyrillic.descriptor().unwrap();

    let mut w = TextWriter::new();
    w.bind(MemorySurface::new(48, 48));
    if with_fonts {
        w.set_font(Some(&latin));
        w.set_font_at_page(Some(&cyrillic), 4);
    }
    w.set_wrap(wrap);
    w.set_text_size_xy(scale.x, scale.y);
    assert_eq!(w.write_bytes(bytes), bytes.len());
    w.unbind().unwrap()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn arbitrary_bytes_keep_batches_balanced(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        wrap in any::<bool>(),
        scale in scale(),
        with_fonts in any::<bool>(),
    ) {
        let s = render(&bytes, wrap, scale, with_fonts);
        prop_assert!(s.batches_balanced());
        prop_assert!(s.max_batch_depth() <= 1);
    }

    #[test]
    fn unbound_writer_consumes_nothing(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut w: TextWriter<'_, MemorySurface> = TextWriter::new();
        prop_assert_eq!(w.write_bytes(&bytes), 0);
        prop_assert_eq!((w.cursor_x(), w.cursor_y()), (0, 0));
    }

    #[test]
    fn fallback_text_draws_one_glyph_per_char(
        text in "[a-zA-Z0-9 ,.é]{0,64}",
    ) {
        let s = render(text.as_bytes(), false, Scale::ONE, false);
        let drawn: Vec<u8> = s.fallback_chars().iter().map(|&(_, _, c)| c).collect();
        let expected: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
        prop_assert_eq!(drawn, expected);
    }

    #[test]
    fn fallback_without_wrap_stays_on_one_line(
        text in "[ -~]{0,64}",
        scale in scale(),
    ) {
        let s = render(text.as_bytes(), false, scale, false);
        let advance = i32::from(scale.x) * 6;
        for (i, &(x, y, _)) in s.fallback_chars().iter().enumerate() {
            prop_assert_eq!((x, y), (advance * i as i32, 0));
        }
    }

    #[test]
    fn rendering_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        wrap in any::<bool>(),
        scale in scale(),
    ) {
        let a = render(&bytes, wrap, scale, true);
        let b = render(&bytes, wrap, scale, true);
        prop_assert_eq!(a.ops(), b.ops());
    }

    #[test]
    fn scaled_glyphs_only_use_rects(
        text in "[Aa \u{e9}\u{410}\u{411}]{0,32}",
        sx in 2u8..=4,
        sy in 2u8..=4,
    ) {
        let s = render(text.as_bytes(), true, Scale::new(sx, sy), true);
        for op in s.ops() {
            match *op {
                SurfaceOp::Pixel { .. } => prop_assert!(false, "pixel write at scale {sx}x{sy}"),
                SurfaceOp::FillRect { w, h, .. } => {
                    prop_assert_eq!((w, h), (i32::from(sx), i32::from(sy)));
                }
                _ => {}
            }
        }
    }
}
