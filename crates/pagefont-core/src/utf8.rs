#![forbid(unsafe_code)]

//! Streaming UTF-8 decoder.
//!
//! Bytes arrive one at a time from the text stream. The decoder assembles
//! 2- and 3-byte sequences into 16-bit code points and passes every other
//! byte through verbatim, so the caller always gets a defined value:
//!
//! - `0` means "sequence in progress, nothing to draw yet".
//! - Any other value is a code point ready for font lookup.
//!
//! 4-byte sequences (21-bit code points) are not decoded. The lead byte is
//! returned raw and its continuation bytes follow as raw values too.

/// A decoded 16-bit code point. `0` is reserved for "no character yet".
pub type CodePoint = u16;

/// Returned by [`Utf8Decoder::feed`] while a multi-byte sequence is pending.
pub const NO_CHAR: CodePoint = 0;

/// Position inside a multi-byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Ground state: the next byte starts a new character.
    #[default]
    AwaitingFirstByte,
    /// One continuation byte left (bits 0-5).
    ExpectOneMore,
    /// Two continuation bytes left (bits 6-11, then 0-5).
    ExpectTwoMore,
}

/// Byte-at-a-time UTF-8 decoder state.
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    state: DecoderState,
    /// Partially assembled code point bits.
    acc: u16,
}

impl Utf8Decoder {
    /// Create a decoder in the ground state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecoderState::AwaitingFirstByte,
            acc: 0,
        }
    }

    /// Current sequence state.
    #[must_use]
    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// True while a multi-byte sequence is half-way through.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !matches!(self.state, DecoderState::AwaitingFirstByte)
    }

    /// Drop any partial sequence.
    pub fn reset(&mut self) {
        self.state = DecoderState::AwaitingFirstByte;
        self.acc = 0;
    }

    /// Feed one byte. Returns [`NO_CHAR`] while a sequence is incomplete.
    pub fn feed(&mut self, b: u8) -> CodePoint {
        // 7-bit code point; abandons any pending sequence.
        if b & 0x80 == 0 {
            self.reset();
            return CodePoint::from(b);
        }

        match self.state {
            DecoderState::AwaitingFirstByte => {
                if b & 0xE0 == 0xC0 {
                    self.acc = u16::from(b & 0x1F) << 6;
                    self.state = DecoderState::ExpectOneMore;
                    return NO_CHAR;
                }
                if b & 0xF0 == 0xE0 {
                    self.acc = u16::from(b & 0x0F) << 12;
                    self.state = DecoderState::ExpectTwoMore;
                    return NO_CHAR;
                }
                // 4-byte leads (0xF0..=0xF7), orphan continuations and
                // 0xF8..=0xFF all fall back to the raw byte.
                self.reset();
                CodePoint::from(b)
            }
            DecoderState::ExpectTwoMore => {
                self.acc |= u16::from(b & 0x3F) << 6;
                self.state = DecoderState::ExpectOneMore;
                NO_CHAR
            }
            DecoderState::ExpectOneMore => {
                let code = self.acc | u16::from(b & 0x3F);
                self.reset();
                code
            }
        }
    }

    /// Feed a slice and collect every non-zero code point.
    #[must_use]
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<CodePoint> {
        bytes
            .iter()
            .map(|&b| self.feed(b))
            .filter(|&c| c != NO_CHAR)
            .collect()
    }
}
