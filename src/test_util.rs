// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Helpers shared by the unit tests.

#[track_caller]
pub fn assert_close(got: f32, want: f32, tol: f32) {
    assert!(
        (got - want).abs() <= tol,
        "expected {want} ± {tol}, got {got}"
    );
}

/// In-memory serial port. Reads drain `rx` and report `WouldBlock` once it is empty.
#[derive(Default)]
pub struct FakeSerial {
    pub tx: std::vec::Vec<u8>,
    pub rx: std::collections::VecDeque<u8>,
    pub flushes: usize,
}

impl embedded_hal_nb::serial::ErrorType for FakeSerial {
    type Error = embedded_hal_nb::serial::ErrorKind;
}

impl embedded_hal_nb::serial::Read<u8> for FakeSerial {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl embedded_hal_nb::serial::Write<u8> for FakeSerial {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.tx.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Millisecond clock that advances by one on every read.
#[derive(Default)]
pub struct StepClock {
    pub now: core::cell::Cell<u32>,
}

impl crate::drivers::mdd::Clock for StepClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(1));
        now
    }
}
