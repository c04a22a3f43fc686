/// Declares a static global `RF_TRANSMITTER` singleton protected by a
/// `critical_section` mutex.
///
/// This macro creates a `static` singleton suitable for use in
/// interrupt-based environments, where both the main loop and the timer
/// ISR need to safely access the shared transmitter state.
///
/// # Arguments
/// - `$tx`: the concrete type of the RF pin (must implement `OutputPin`)
///
/// # Example
/// ```ignore
/// init_rf_transmitter!(MyRfPinType);
/// ```
#[macro_export]
macro_rules! init_rf_transmitter {
    ( $tx:ty ) => {
        pub static RF_TRANSMITTER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::transmitter::BitBangTransmitter<$tx>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `RF_TRANSMITTER` singleton around the RF pin.
///
/// # Arguments
/// - `$tx`: the RF pin variable (must implement `OutputPin`)
///
/// # Example
/// ```ignore
/// fn main() {
///     setup_rf_transmitter!(rf_pin);
/// }
/// ```
///
/// # Notes
/// - Requires `init_rf_transmitter!` to have been used earlier.
#[macro_export]
macro_rules! setup_rf_transmitter {
    ( $tx:expr ) => {
        $crate::critical_section::with(|cs| {
            let _ = RF_TRANSMITTER
                .borrow(cs)
                .replace(Some($crate::transmitter::BitBangTransmitter::new($tx)));
        });
    };
}

/// Calls `tick()` on the global `RF_TRANSMITTER` if it has been initialized.
///
/// Invoke from the half-bit timer ISR to advance waveform playback.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM1() {
///     tick_rf_transmitter!();
/// }
/// ```
///
/// # Notes
/// - Safe to call repeatedly; silently does nothing before setup.
#[macro_export]
macro_rules! tick_rf_transmitter {
    () => {
        $crate::critical_section::with(|cs| {
            if let Some(tx) = RF_TRANSMITTER.borrow(cs).borrow_mut().as_mut() {
                tx.tick();
            }
        });
    };
}
