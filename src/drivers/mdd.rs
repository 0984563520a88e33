// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial link to an external motor-driver board (MDD).
//!
//! Commands go out as 21-byte frames (see [`crate::protocol::messages`]). Every transmission takes
//! the next sequence number. Two delivery modes are offered:
//!
//! - [`MotorDriverLink::send`] transmits once and expects nothing back.
//! - [`MotorDriverLink::send_confirmed`] retransmits every `resend_interval_ms` until the board
//!   echoes the latest sequence number, and gives up once `max_wait_ms` has elapsed.

use embedded_hal_nb::serial::{Read, Write};
use nb::block;

use crate::config::LinkConfig;
use crate::protocol::messages::{CommandFrame, CommandId, PAYLOAD_LEN};
use crate::protocol::LinkError;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

pub struct MotorDriverLink<S, K> {
    serial: S,
    clock: K,
    seq: u8,
}

impl<S, K> MotorDriverLink<S, K>
where
    S: Read<u8> + Write<u8>,
    K: Clock,
{
    pub fn new(serial: S, clock: K) -> Self {
        Self {
            serial,
            clock,
            seq: 0,
        }
    }

    /// Tear down the link and return the serial port and clock.
    pub fn free(self) -> (S, K) {
        (self.serial, self.clock)
    }

    /// Sequence number of the most recent transmission.
    #[inline]
    pub fn seq(&self) -> u8 {
        self.seq
    }

    /// Transmit once, no acknowledgement expected.
    pub fn send(
        &mut self,
        id: CommandId,
        data: &[f32; PAYLOAD_LEN],
    ) -> Result<(), LinkError<S::Error>> {
        self.transmit(id, data)?;
        Ok(())
    }

    /// Transmit until acknowledged, or fail with [`LinkError::Timeout`].
    ///
    /// Only an echo of the latest sequence number counts, stale acknowledgements of earlier
    /// retransmissions are skipped.
    pub fn send_confirmed(
        &mut self,
        id: CommandId,
        data: &[f32; PAYLOAD_LEN],
        cfg: &LinkConfig,
    ) -> Result<(), LinkError<S::Error>> {
        let start = self.clock.now_ms();
        let mut seq = self.transmit(id, data)?;
        let mut sent_at = start;

        loop {
            match self.serial.read() {
                Ok(ack) if ack == seq => return Ok(()),
                Ok(_) | Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => return Err(LinkError::Serial(e)),
            }

            let now = self.clock.now_ms();
            let waited = now.wrapping_sub(start);
            if waited > cfg.max_wait_ms {
                warn!("no ack for command {} after {} ms", id, waited);
                return Err(LinkError::Timeout(waited));
            }
            if now.wrapping_sub(sent_at) >= cfg.resend_interval_ms {
                seq = self.transmit(id, data)?;
                sent_at = now;
                trace!("resend command {} as seq {}", id, seq);
            }
        }
    }

    fn transmit(
        &mut self,
        id: CommandId,
        data: &[f32; PAYLOAD_LEN],
    ) -> Result<u8, LinkError<S::Error>> {
        self.seq = self.seq.wrapping_add(1);
        let frame = CommandFrame::new(self.seq, id, *data).encode();
        for b in frame {
            block!(self.serial.write(b)).map_err(LinkError::Serial)?;
        }
        block!(self.serial.flush()).map_err(LinkError::Serial)?;
        Ok(self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::FRAME_LEN;
    use crate::test_util::{FakeSerial, StepClock};
    use embedded_hal_nb::serial::{ErrorKind, ErrorType};

    /// Board stand-in that echoes the sequence number of the n-th frame it receives.
    struct Board {
        port: FakeSerial,
        ack_frame: usize,
        stale_ack: bool,
    }

    impl Board {
        fn new(ack_frame: usize) -> Self {
            Self {
                port: FakeSerial::default(),
                ack_frame,
                stale_ack: false,
            }
        }

        fn frames(&self) -> std::vec::Vec<CommandFrame> {
            self.port
                .tx
                .chunks(FRAME_LEN)
                .map(|c| CommandFrame::decode(c).unwrap())
                .collect()
        }
    }

    impl ErrorType for Board {
        type Error = ErrorKind;
    }

    impl Read<u8> for Board {
        fn read(&mut self) -> nb::Result<u8, ErrorKind> {
            self.port.read()
        }
    }

    impl Write<u8> for Board {
        fn write(&mut self, word: u8) -> nb::Result<(), ErrorKind> {
            self.port.write(word)
        }

        fn flush(&mut self) -> nb::Result<(), ErrorKind> {
            self.port.flush()?;
            let n = self.port.flushes;
            let seq = self.port.tx[self.port.tx.len() - FRAME_LEN + 2];
            if self.stale_ack && n == 1 {
                self.port.rx.push_back(seq.wrapping_add(100));
            }
            if n == self.ack_frame {
                self.port.rx.push_back(seq);
            }
            Ok(())
        }
    }

    #[test]
    fn unconfirmed_send_transmits_once() {
        let clock = StepClock::default();
        let mut link = MotorDriverLink::new(FakeSerial::default(), &clock);

        link.send(CommandId::Mecanum, &[100.0, 0.0, 0.0, 0.0]).unwrap();
        link.send(CommandId::Mecanum, &[0.0, 100.0, 0.0, 0.0]).unwrap();

        let (serial, _) = link.free();
        assert_eq!(serial.tx.len(), 2 * FRAME_LEN);
        let second = CommandFrame::decode(&serial.tx[FRAME_LEN..]).unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(second.data[1], 100.0);
    }

    #[test]
    fn confirmed_send_times_out_with_periodic_retransmission() {
        let clock = StepClock::default();
        let mut link = MotorDriverLink::new(Board::new(usize::MAX), &clock);
        let cfg = LinkConfig::new(10, 50);

        let res = link.send_confirmed(CommandId::PidReset, &[0.0; 4], &cfg);
        assert_eq!(res, Err(LinkError::Timeout(51)));

        // Sent at t = 0, then every 10 ms up to and including t = 50.
        let (board, _) = link.free();
        let frames = board.frames();
        assert_eq!(frames.len(), 6);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.seq as usize, i + 1);
            assert_eq!(frame.id, CommandId::PidReset);
        }
    }

    #[test]
    fn confirmed_send_succeeds_on_matching_ack() {
        let clock = StepClock::default();
        let mut board = Board::new(3);
        board.stale_ack = true;
        let mut link = MotorDriverLink::new(board, &clock);

        let res = link.send_confirmed(CommandId::Omni4, &[1.0, 2.0, 3.0, 0.0], &LinkConfig::default());
        assert_eq!(res, Ok(()));
        assert_eq!(link.seq(), 3);

        let (board, _) = link.free();
        assert_eq!(board.frames().len(), 3);
    }

    #[test]
    fn sequence_wraps_mod_256() {
        let clock = StepClock::default();
        let mut link = MotorDriverLink::new(FakeSerial::default(), &clock);
        for _ in 0..256 {
            link.send(CommandId::PidReset, &[0.0; 4]).unwrap();
        }
        assert_eq!(link.seq(), 0);
    }
}
