// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Serial Protocols
//!
//! - [`messages`] - 21-byte command frames for the motor-driver board.
//! - [`parser`] - Receiver-side byte-stream parser for command frames.
//! - [`telemetry`] - `0xA5 0xA5` framed big-endian `i16` telemetry.

pub mod messages;
pub mod parser;
pub mod telemetry;

pub use messages::{CommandFrame, CommandId, FrameError};
pub use telemetry::{receive as receive_telemetry, send as send_telemetry};
pub use parser::Parser;

use thiserror::Error;

/// Failure of a blocking exchange over a serial link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum LinkError<E: core::fmt::Debug> {
    /// No matching acknowledgement within the wait budget (elapsed ms).
    #[error("no acknowledgement after {0} ms")]
    Timeout(u32),
    #[error("received frame rejected: {0}")]
    Frame(FrameError),
    #[error("serial error: {0:?}")]
    Serial(E),
}

impl<E: core::fmt::Debug> From<FrameError> for LinkError<E> {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}
