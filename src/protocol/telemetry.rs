// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry frames: a `0xA5 0xA5` header followed by signed 16-bit big-endian values.
//!
//! The fixed form carries three values (8 bytes). The variable form carries any count, the
//! receiver must know how many to expect.

use embedded_hal_nb::serial::{Read, Write};
use heapless::Vec;
use nb::block;

use super::messages::{FrameError, START_BYTE};
use super::LinkError;

pub const HEADER: [u8; 2] = [START_BYTE, START_BYTE];

/// Length of a three-value frame.
pub const FRAME_LEN: usize = 8;

/// Bytes needed for a frame of `count` values.
#[inline]
pub const fn frame_len(count: usize) -> usize {
    HEADER.len() + count * 2
}

pub fn encode(values: [i16; 3]) -> [u8; FRAME_LEN] {
    let mut buf = [0u8; FRAME_LEN];
    // Sized exactly for three values.
    let _ = encode_values(&values, &mut buf);
    buf
}

pub fn decode(buf: &[u8]) -> Result<[i16; 3], FrameError> {
    let values = decode_values::<3>(buf)?;
    if values.len() != 3 {
        return Err(FrameError::Length {
            expected: FRAME_LEN,
            actual: buf.len(),
        });
    }
    Ok([values[0], values[1], values[2]])
}

/// Write a frame for `values` into `out`, returning the number of bytes used.
pub fn encode_values(values: &[i16], out: &mut [u8]) -> Result<usize, FrameError> {
    let len = frame_len(values.len());
    if out.len() < len {
        return Err(FrameError::Length {
            expected: len,
            actual: out.len(),
        });
    }

    out[..2].copy_from_slice(&HEADER);
    for (chunk, value) in out[2..len].chunks_exact_mut(2).zip(values) {
        chunk.copy_from_slice(&value.to_be_bytes());
    }
    Ok(len)
}

/// Decode a whole frame. The value count is taken from the buffer length.
pub fn decode_values<const N: usize>(buf: &[u8]) -> Result<Vec<i16, N>, FrameError> {
    if buf.len() < HEADER.len() || buf.len() % 2 != 0 || buf.len() > frame_len(N) {
        return Err(FrameError::Length {
            expected: frame_len(N),
            actual: buf.len(),
        });
    }
    if buf[..2] != HEADER {
        return Err(FrameError::BadHeader);
    }

    let mut values = Vec::new();
    for chunk in buf[2..].chunks_exact(2) {
        // Length was checked against N above.
        let _ = values.push(i16::from_be_bytes([chunk[0], chunk[1]]));
    }
    Ok(values)
}

/// Send one telemetry frame, blocking until every byte is queued.
pub fn send<S: Write<u8>>(serial: &mut S, values: &[i16]) -> Result<(), S::Error> {
    block!(serial.write(HEADER[0]))?;
    block!(serial.write(HEADER[1]))?;
    for value in values {
        for b in value.to_be_bytes() {
            block!(serial.write(b))?;
        }
    }
    block!(serial.flush())
}

/// Receive one frame of `count` values, blocking until all of its bytes have arrived.
///
/// The whole frame is always consumed. On a header mismatch it is discarded and no values are
/// returned.
pub fn receive<S: Read<u8>, const N: usize>(
    serial: &mut S,
    count: usize,
) -> Result<Vec<i16, N>, LinkError<S::Error>> {
    let count = count.min(N);
    let mut buf = [0u8; 2];

    for b in buf.iter_mut() {
        *b = block!(serial.read()).map_err(LinkError::Serial)?;
    }
    let header_ok = buf == HEADER;

    let mut values = Vec::new();
    for _ in 0..count {
        let hi = block!(serial.read()).map_err(LinkError::Serial)?;
        let lo = block!(serial.read()).map_err(LinkError::Serial)?;
        let _ = values.push(i16::from_be_bytes([hi, lo]));
    }

    if !header_ok {
        warn!("telemetry header mismatch");
        return Err(LinkError::Frame(FrameError::BadHeader));
    }
    Ok(values)
}
