#![forbid(unsafe_code)]

//! Test harness for pagefont.
//!
//! - **Recording surface**: [`MemorySurface`] keeps pixels and a call log.
//! - **Fixture fonts**: [`FontBuilder`] packs ASCII-art glyphs into the real
//!   font blob layout.
//! - **Snapshots**: [`surface_to_text`] renders painted pixels as `#`/`.` so
//!   glyph blits can be compared against inline expected pictures.
//! - **Logging**: [`init_tracing`] installs a test-writer subscriber filtered
//!   by `PAGEFONT_LOG`.

pub mod font_builder;
pub mod memory_surface;

use tracing_subscriber::EnvFilter;

pub use font_builder::{FontBuilder, OwnedFont, pack_bits};
pub use memory_surface::{MemorySurface, SurfaceOp};

/// Environment variable holding the tracing filter directive.
pub const ENV_LOG: &str = "PAGEFONT_LOG";

/// Install a `fmt` subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Render the painted pixels as text: `#` painted, `.` empty.
///
/// Trailing rows with nothing painted are omitted, so a small glyph near
/// the origin gives a compact picture.
#[must_use]
pub fn surface_to_text(surface: &MemorySurface) -> String {
    let width = pagefont_core::Surface::width(surface);
    let last_row = (0..surface.height())
        .rev()
        .find(|&y| (0..width).any(|x| surface.pixel(x, y).is_some()));
    let Some(last_row) = last_row else {
        return String::new();
    };

    let mut out = String::with_capacity(((width + 1) * (last_row + 1)) as usize);
    for y in 0..=last_row {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..width {
            out.push(if surface.pixel(x, y).is_some() { '#' } else { '.' });
        }
    }
    out
}
