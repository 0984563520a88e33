// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command frames exchanged with a motor-driver board.
//!
//! ```text
//! offset  size  field
//!  0       2    header 0xA5 0xA5
//!  2       1    sequence number
//!  3       1    command id
//!  4      16    four f32, little-endian
//! 20       1    checksum, 8-bit sum of bytes 2..=19
//! ```
//!
//! The receiver acknowledges a frame by echoing its sequence number as a single byte.

use thiserror::Error;

/// Sync byte for the protocol. Frames start with two of them.
pub const START_BYTE: u8 = 0xA5;

/// Total command frame length on the wire.
pub const FRAME_LEN: usize = 21;

/// Number of `f32` payload values per frame.
pub const PAYLOAD_LEN: usize = 4;

const BODY: core::ops::Range<usize> = 2..20;
const DATA_OFFSET: usize = 4;

/// Command identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandId {
    /// Per-wheel velocity targets, closed loop.
    MotorRps = 0,
    /// Per-wheel duty cycles, open loop.
    MotorPwm = 1,
    /// Body velocity `[vx, vy, omega]` for a mecanum base.
    Mecanum = 2,
    /// Body velocity for a 3-wheel omni base.
    Omni3 = 3,
    /// Body velocity for a 4-wheel omni base.
    Omni4 = 4,
    /// `[kp, ki, kd, tau]` for wheel 0.
    M1PidGain = 5,
    M2PidGain = 6,
    M3PidGain = 7,
    M4PidGain = 8,
    /// `[robot diameter, wheel diameter]` in mm. A non-positive wheel diameter keeps the current
    /// value.
    RobotDiameter = 9,
    /// Reset every wheel PID.
    PidReset = 10,
    /// `[mode]`: `0` closed-loop velocity, anything else open-loop duty.
    CommandModeSelect = 11,
    /// Per-wheel encoder counts per revolution. Non-positive entries are skipped.
    EncoderResolution = 12,
}

impl TryFrom<u8> for CommandId {
    type Error = FrameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            0 => CommandId::MotorRps,
            1 => CommandId::MotorPwm,
            2 => CommandId::Mecanum,
            3 => CommandId::Omni3,
            4 => CommandId::Omni4,
            5 => CommandId::M1PidGain,
            6 => CommandId::M2PidGain,
            7 => CommandId::M3PidGain,
            8 => CommandId::M4PidGain,
            9 => CommandId::RobotDiameter,
            10 => CommandId::PidReset,
            11 => CommandId::CommandModeSelect,
            12 => CommandId::EncoderResolution,
            other => return Err(FrameError::UnknownCommand(other)),
        })
    }
}

impl CommandId {
    /// Wheel addressed by a gain command.
    pub fn gain_wheel(self) -> Option<usize> {
        match self {
            CommandId::M1PidGain => Some(0),
            CommandId::M2PidGain => Some(1),
            CommandId::M3PidGain => Some(2),
            CommandId::M4PidGain => Some(3),
            _ => None,
        }
    }
}

/// Frame decoding failures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[error("bad frame header")]
    BadHeader,
    #[error("frame length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("checksum mismatch")]
    Checksum,
    #[error("unknown command id {0}")]
    UnknownCommand(u8),
}

/// A decoded command frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    pub seq: u8,
    pub id: CommandId,
    pub data: [f32; PAYLOAD_LEN],
}

impl CommandFrame {
    pub fn new(seq: u8, id: CommandId, data: [f32; PAYLOAD_LEN]) -> Self {
        Self { seq, id, data }
    }

    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut buf = [0u8; FRAME_LEN];
        buf[0] = START_BYTE;
        buf[1] = START_BYTE;
        buf[2] = self.seq;
        buf[3] = self.id as u8;
        for (i, value) in self.data.iter().enumerate() {
            let at = DATA_OFFSET + i * 4;
            buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
        }
        buf[FRAME_LEN - 1] = checksum(&buf);
        buf
    }

    pub fn decode(buf: &[u8]) -> Result<Self, FrameError> {
        let Ok(buf) = <&[u8; FRAME_LEN]>::try_from(buf) else {
            return Err(FrameError::Length {
                expected: FRAME_LEN,
                actual: buf.len(),
            });
        };
        if buf[0] != START_BYTE || buf[1] != START_BYTE {
            return Err(FrameError::BadHeader);
        }
        if checksum(buf) != buf[FRAME_LEN - 1] {
            return Err(FrameError::Checksum);
        }

        let id = CommandId::try_from(buf[3])?;
        let mut data = [0.0; PAYLOAD_LEN];
        for (i, value) in data.iter_mut().enumerate() {
            let at = DATA_OFFSET + i * 4;
            *value = f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        }

        Ok(Self {
            seq: buf[2],
            id,
            data,
        })
    }
}

/// 8-bit sum of the sequence, id and payload bytes (`buf[2..20]`).
pub fn checksum(buf: &[u8; FRAME_LEN]) -> u8 {
    buf[BODY].iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
