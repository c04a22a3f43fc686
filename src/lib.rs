//! # fob433
//!
//! A portable, no_std firmware core for battery-powered, transmit-only
//! 433 MHz remote controls built on cheap OOK transmitter modules.
//!
//! The crate implements the whole key-to-radio pipeline of such a remote:
//! - debounced key-matrix scanning ([`matrix`])
//! - short-press / long-press / two-key-combination classification
//!   ([`gesture`])
//! - the fixed 9-byte packet and its checksum ([`packet`])
//! - OOK level framing ([`waveform`])
//! - a timer-interrupt bit-bang transmitter ([`transmitter`])
//! - bounded, timed retransmission ([`scheduler`])
//! - and the sleep gate guarding the lowest-power state ([`sleep`])
//!
//! all glued together by the owned foreground controller in [`device`].
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support (host test builds) |
//! | `timer-isr` (default) | `critical_section` singleton helpers for ISR ticking |
//! | `delay-loop`          | Blocking `embedded_hal::delay::DelayNs` transmit loop |
//! | `keyboard` (default)  | Matrix scanning and gesture classification |
//! | `rf` (default)        | Packet framing, waveform encoding, transmit scheduling |
//! | `led` (default)       | Indicator output side effects |
//! | `low-power` (default) | Sleep-gate evaluation in the foreground controller |
//! | `temperature` (default) | Temperature bytes in outgoing packets |
//! | `defmt-0-3`           | `defmt` logging at state-machine transitions |
//! | `log`                 | `log` logging at state-machine transitions |
//!
//! ## Hardware model
//!
//! - One hardware timer interrupt, firing every 400 µs, owns the RF pin
//!   through [`transmitter::BitBangTransmitter::tick`].
//! - Everything else runs in a cooperative foreground loop that polls
//!   monotonic-clock deadlines ([`clock`]); nothing blocks.
//! - Foreground access to the transmitter goes through
//!   `critical_section::with` (see [`timer`]), making the busy-check and
//!   transmission start a single atomic step.
//!
//! ## Usage
//!
//! ```ignore
//! use fob433::consts::DEFAULT_KEYMAP;
//! use fob433::device::{RemoteConfig, RemoteControl};
//!
//! fob433::init_rf_transmitter!(RfPin);
//!
//! fn main() -> ! {
//!     let (rows, cols, led, rf_pin) = platform::pins();
//!     setup_rf_transmitter!(rf_pin);
//!
//!     let config = RemoteConfig::new(platform::pairing_id());
//!     let mut remote = RemoteControl::new(rows, cols, DEFAULT_KEYMAP, led, config);
//!     let mut stop = platform::DeepStopEntry;
//!
//!     loop {
//!         let now = platform::now();
//!         let _ = fob433::timer::with_transmitter(&RF_TRANSMITTER, |tx| {
//!             remote.poll(now, tx, &mut stop);
//!         });
//!         if remote.temperature_stale() {
//!             remote.set_temperature(platform::sample_ntc());
//!         }
//!     }
//! }
//! ```
//!
//! The timer ISR only ever contains `tick_rf_transmitter!();`.
//!
//! ## Integration Notes
//!
//! - Transmit timing is 800 µs per bit (one level per 400 µs tick);
//!   [`timer::half_bit_ticks`] computes the timer reload for a given clock.
//! - Only one transmitter instance should be active at a time in
//!   interrupt-driven mode.
//! - The scheduler retransmits each armed packet 5 times, 100 ms apart;
//!   there is no receive path and no acknowledgement.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod clock;
pub mod consts;
#[cfg(all(feature = "keyboard", feature = "rf"))]
pub mod device;
#[cfg(feature = "keyboard")]
pub mod gesture;
#[cfg(feature = "keyboard")]
pub mod matrix;
#[cfg(feature = "rf")]
pub mod packet;
#[cfg(feature = "rf")]
pub mod scheduler;
pub mod sleep;
#[cfg(test)]
pub(crate) mod testpin;
pub mod timer;
#[cfg(feature = "rf")]
pub mod transmitter;
#[cfg(feature = "rf")]
pub mod waveform;
