//! The foreground controller for one remote unit.
//!
//! [`RemoteControl`] owns the whole key-to-radio pipeline below the
//! interrupt boundary: the matrix scanner, the gesture classifier, the
//! retransmission scheduler, the sleep gate, and the indicator output. It
//! is constructed once at startup and polled from the main loop with the
//! current monotonic time; no state lives outside the struct.
//!
//! Each [`poll`](RemoteControl::poll) runs one foreground iteration in the
//! firmware's fixed order: scan and classify key activity, evaluate the
//! sleep gate, then run the retransmission schedule. The transmitter is
//! passed in per call because it normally lives inside the
//! interrupt-shared singleton (see [`crate::timer`]); on platforms without
//! the ISR helpers it can simply be a local.
//!
//! ## Example
//!
//! ```ignore
//! let mut remote = RemoteControl::new(rows, cols, DEFAULT_KEYMAP, led, config);
//! loop {
//!     let now = platform::now();
//!     fob433::timer::with_transmitter(&RF_TRANSMITTER, |tx| {
//!         remote.poll(now, tx, &mut stop);
//!     });
//!     if remote.temperature_stale() {
//!         remote.set_temperature(platform::sample_ntc());
//!     }
//! }
//! ```

use crate::clock::Instant;
use crate::consts::{PROTOCOL_PID, Timings};
use crate::gesture::{GestureClassifier, GestureEvent};
use crate::matrix::MatrixScanner;
use crate::packet::Packet;
use crate::scheduler::TransmitScheduler;
use crate::sleep::{DeepStop, SleepGate};
use crate::transmitter::BitBangTransmitter;
use embedded_hal::digital::{InputPin, OutputPin};

/// Identity and timing configuration for one remote unit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RemoteConfig {
    /// Persisted 3-byte pairing identifier, read back from flash.
    pub device_id: [u8; 3],
    /// Protocol id carried in the packet tag byte.
    pub pid: u8,
    /// Timing thresholds for every component.
    pub timings: Timings,
}

impl RemoteConfig {
    /// Configuration with the stock protocol id and timings.
    pub fn new(device_id: [u8; 3]) -> Self {
        Self {
            device_id,
            pid: PROTOCOL_PID,
            timings: Timings::DEFAULT,
        }
    }
}

/// How the current foreground session started.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WakeSource {
    /// Cold start.
    PowerOn,
    /// Resumed from the lowest-power state by a wake event.
    SleepWakeup,
}

/// The assembled remote: everything the foreground loop owns.
///
/// ## Type Parameters
///
/// - `RP`/`CP`: matrix row and column pins
/// - `LED`: the indicator output
/// - `ROWS`/`COLS`: matrix geometry
#[derive(Debug)]
pub struct RemoteControl<RP, CP, LED, const ROWS: usize, const COLS: usize>
where
    RP: OutputPin,
    CP: InputPin,
    LED: OutputPin,
{
    scanner: MatrixScanner<RP, CP, ROWS, COLS>,
    classifier: GestureClassifier,
    scheduler: TransmitScheduler,
    gate: SleepGate,
    indicator: LED,
    device_id: [u8; 3],
    pid: u8,
    temperature: [u8; 2],
    temperature_stale: bool,
    wake: WakeSource,
}

impl<RP, CP, LED, const ROWS: usize, const COLS: usize> RemoteControl<RP, CP, LED, ROWS, COLS>
where
    RP: OutputPin,
    CP: InputPin,
    LED: OutputPin,
{
    /// Assembles a remote from its pins, key map, and configuration.
    pub fn new(
        rows: [RP; ROWS],
        cols: [CP; COLS],
        keymap: [[u8; COLS]; ROWS],
        indicator: LED,
        config: RemoteConfig,
    ) -> Self {
        Self {
            scanner: MatrixScanner::new(rows, cols, keymap, config.timings),
            classifier: GestureClassifier::new(config.timings),
            scheduler: TransmitScheduler::new(config.timings),
            gate: SleepGate::new(config.timings),
            indicator,
            device_id: config.device_id,
            pid: config.pid,
            temperature: [0; 2],
            temperature_stale: true,
            wake: WakeSource::PowerOn,
        }
    }

    /// Stores a fresh temperature reading for subsequent packets.
    pub fn set_temperature(&mut self, temperature: [u8; 2]) {
        self.temperature = temperature;
        self.temperature_stale = false;
    }

    /// Returns `true` while the stored temperature predates the last wake.
    ///
    /// Set on construction and after every resume from deep stop; the
    /// application clears it by sampling the sensor and calling
    /// [`set_temperature`](Self::set_temperature).
    pub fn temperature_stale(&self) -> bool {
        self.temperature_stale
    }

    /// How the current session started.
    pub fn wake_source(&self) -> WakeSource {
        self.wake
    }

    /// Returns `true` while a retransmission schedule is draining.
    pub fn is_sending(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Runs one foreground iteration.
    ///
    /// `tx` is the interrupt-driven transmitter (borrowed inside the
    /// critical section on ISR platforms); `stop` is the platform's
    /// low-power entry capability, invoked only when the sleep gate fires.
    pub fn poll<TX, S>(&mut self, now: Instant, tx: &mut BitBangTransmitter<TX>, stop: &mut S)
    where
        TX: OutputPin,
        S: DeepStop,
    {
        if let Some(scan) = self.scanner.poll(now, self.classifier.keys_mut()) {
            if let Some(event) = self.classifier.update(now, scan) {
                self.dispatch(event);
            }
        }

        if cfg!(feature = "low-power") {
            let keys_held = !self.classifier.keys().is_empty();
            if self.gate.poll(now, keys_held, self.scheduler.is_active()) {
                self.enter_deep_stop(tx, stop);
            }
        }

        self.scheduler.poll(now, tx);
    }

    fn dispatch(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Command(code) => {
                self.indicator_set(true);
                let packet = self.key_packet(code);
                self.scheduler.arm(packet);
            }
            GestureEvent::ComboIndicator(lit) => self.indicator_set(lit),
            GestureEvent::PressTimeout => {
                self.scheduler.cancel();
                self.indicator_set(false);
            }
            GestureEvent::Released => self.indicator_set(false),
        }
    }

    fn key_packet(&self, code: u8) -> Packet {
        let temperature = if cfg!(feature = "temperature") {
            self.temperature
        } else {
            [0; 2]
        };
        Packet::key_event(self.device_id, self.pid, code, 0, temperature)
    }

    fn indicator_set(&mut self, lit: bool) {
        if cfg!(feature = "led") {
            if lit {
                let _ = self.indicator.set_high();
            } else {
                let _ = self.indicator.set_low();
            }
        }
    }

    /// The sleep entry sequence: quiesce outputs, mark the session stale,
    /// and hand control to the platform until a wake event.
    fn enter_deep_stop<TX, S>(&mut self, tx: &mut BitBangTransmitter<TX>, stop: &mut S)
    where
        TX: OutputPin,
        S: DeepStop,
    {
        #[cfg(feature = "defmt-0-3")]
        defmt::debug!("entering deep stop");
        #[cfg(feature = "log")]
        log::debug!("entering deep stop");
        tx.pin_low();
        self.scanner.set_rows_low();
        self.indicator_set(false);
        self.wake = WakeSource::SleepWakeup;
        self.temperature_stale = true;
        stop.enter();
    }
}
