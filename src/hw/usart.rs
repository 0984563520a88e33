// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART link implementing the `embedded-hal-nb` serial traits.
//!
//! Wraps a HAL `Serial` so the protocol code ([`crate::protocol`], [`crate::drivers::mdd`]) can
//! run on it unchanged.
//!
//! To watch the raw link from the host, connect the USB-serial adapter and use
//! ```text
//! $ screen /dev/tty.usbserial* <baud_rate>
//! ```

use embedded_hal_nb::serial::{ErrorKind, ErrorType, Read, Write};
use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

pub struct UsartLink<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> UsartLink<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }
}

fn kind(e: serial::Error) -> ErrorKind {
    match e {
        serial::Error::Framing => ErrorKind::FrameFormat,
        serial::Error::Noise => ErrorKind::Noise,
        serial::Error::Overrun => ErrorKind::Overrun,
        serial::Error::Parity => ErrorKind::Parity,
        #[allow(unreachable_patterns)]
        _ => ErrorKind::Other,
    }
}

impl<U: Instance> ErrorType for UsartLink<U> {
    type Error = ErrorKind;
}

impl<U: Instance> Read<u8> for UsartLink<U> {
    #[inline]
    fn read(&mut self) -> nb::Result<u8, ErrorKind> {
        self.rx.read().map_err(|e| e.map(kind))
    }
}

impl<U: Instance> Write<u8> for UsartLink<U> {
    #[inline]
    fn write(&mut self, word: u8) -> nb::Result<(), ErrorKind> {
        self.tx.write(word).map_err(|e| e.map(|_| ErrorKind::Other))
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    fn flush(&mut self) -> nb::Result<(), ErrorKind> {
        self.tx.flush().map_err(|e| e.map(|_| ErrorKind::Other))
    }
}
