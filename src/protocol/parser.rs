// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-stream parser for incoming command frames.
//!
//! Feed received bytes one at a time with [`Parser::push`]. The parser hunts for the two-byte
//! header, collects the rest of the frame and hands back a [`CommandFrame`] once the checksum and
//! command id check out. Rejected frames are dropped and counted.

use crate::protocol::messages::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    WaitStart,
    WaitSecondStart,
    Body { len: usize },
}

pub struct Parser {
    state: State,
    buf: [u8; FRAME_LEN],
    rejected: u32,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            buf: [0; FRAME_LEN],
            rejected: 0,
        }
    }

    /// Frames dropped for a bad checksum or unknown id since creation.
    #[inline]
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Drop any partially received frame.
    pub fn reset(&mut self) {
        self.state = State::WaitStart;
    }

    /// Process a single incoming byte. Returns `Some(frame)` if a complete, valid frame is received.
    pub fn push(&mut self, byte: u8) -> Option<CommandFrame> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.buf[0] = byte;
                    self.state = State::WaitSecondStart;
                }
            }
            State::WaitSecondStart => {
                if byte == START_BYTE {
                    self.buf[1] = byte;
                    self.state = State::Body { len: 2 };
                } else {
                    self.state = State::WaitStart;
                }
            }
            State::Body { len } => {
                self.buf[len] = byte;
                let len = len + 1;
                if len < FRAME_LEN {
                    self.state = State::Body { len };
                    return None;
                }

                // Reset for next frame
                self.state = State::WaitStart;

                match CommandFrame::decode(&self.buf) {
                    Ok(frame) => return Some(frame),
                    Err(e) => {
                        self.rejected = self.rejected.wrapping_add(1);
                        warn!("dropped command frame: {}", e);
                    }
                }
            }
        }
        None
    }
}
