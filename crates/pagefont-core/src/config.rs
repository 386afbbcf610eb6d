#![forbid(unsafe_code)]

//! Initial text style.
//!
//! [`TextConfig`] seeds a writer's cursor. The defaults are the classic ones
//! (no wrap, 1x1, white on white); each field can be overridden from the
//! environment. Unparseable values are ignored so a bad variable never
//! prevents text from rendering.

use crate::surface::{Color, Scale};

/// Environment variable enabling wrap (`1/0/true/false/on/off/yes/no`).
const ENV_WRAP: &str = "PAGEFONT_WRAP";
/// Environment variable for text scale (`N` or `NxM`).
const ENV_TEXT_SIZE: &str = "PAGEFONT_TEXT_SIZE";
/// Environment variable for the foreground colour (decimal or `0x` hex).
const ENV_FG: &str = "PAGEFONT_FG";
/// Environment variable for the background colour (decimal or `0x` hex).
const ENV_BG: &str = "PAGEFONT_BG";

/// Default foreground and background colour.
pub const DEFAULT_COLOR: Color = 0xFFFF;

/// Initial cursor style for a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextConfig {
    /// Break lines at the surface's right edge.
    pub wrap: bool,
    pub scale: Scale,
    pub fg: Color,
    pub bg: Color,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            wrap: false,
            scale: Scale::ONE,
            fg: DEFAULT_COLOR,
            bg: DEFAULT_COLOR,
        }
    }
}

impl TextConfig {
    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(wrap) = env_override(&get_env, ENV_WRAP, parse_bool) {
            config.wrap = wrap;
        }
        if let Some(scale) = env_override(&get_env, ENV_TEXT_SIZE, parse_scale) {
            config.scale = scale;
        }
        if let Some(fg) = env_override(&get_env, ENV_FG, parse_color) {
            config.fg = fg;
        }
        if let Some(bg) = env_override(&get_env, ENV_BG, parse_color) {
            config.bg = bg;
        }
        config
    }
}

fn env_override<F, T>(get_env: &F, key: &str, parse: fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let value = get_env(key)?;
    let parsed = parse(value.trim());
    if parsed.is_none() {
        #[cfg(feature = "tracing")]
        tracing::warn!(key, value = %value, "ignoring invalid text config value");
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_scale(value: &str) -> Option<Scale> {
    let lower = value.to_ascii_lowercase();
    let (sx, sy) = match lower.split_once('x') {
        Some((sx, sy)) => (sx.trim().parse().ok()?, sy.trim().parse().ok()?),
        None => {
            let s = lower.parse().ok()?;
            (s, s)
        }
    };
    if sx == 0 || sy == 0 {
        return None;
    }
    Some(Scale::new(sx, sy))
}

fn parse_color(value: &str) -> Option<Color> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => Color::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
