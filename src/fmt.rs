// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logging shim.
//!
//! With the `defmt` feature these forward to the matching `defmt` macros. Without it they evaluate
//! nothing at runtime, which keeps host builds and unit tests free of a global logger.

#![macro_use]
#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($x:tt)*) => { ::defmt::trace!($($x)*) };
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($x:tt)*) => { ::defmt::debug!($($x)*) };
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($x:tt)*) => { ::defmt::info!($($x)*) };
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($x:tt)*) => { ::defmt::warn!($($x)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}
