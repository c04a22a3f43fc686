use crate::transmitter::BitBangTransmitter;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// Used to initialize the global static [`BitBangTransmitter`] for use
/// with `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```ignore
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use fob433::timer::global_transmitter_init;
/// use fob433::transmitter::BitBangTransmitter;
/// use some_hal::PB7;
///
/// static RF_TRANSMITTER: Mutex<RefCell<Option<BitBangTransmitter<PB7>>>> =
///     global_transmitter_init::<PB7>();
/// ```
pub const fn global_transmitter_init<TX: OutputPin>()
-> Mutex<RefCell<Option<BitBangTransmitter<TX>>>> {
    Mutex::new(RefCell::new(None))
}

/// Places a transmitter into the global singleton.
///
/// # Arguments
/// * The global static transmitter slot
/// * The RF output pin
///
/// # Example
/// ```ignore
/// fn main() {
///     global_transmitter_setup(&RF_TRANSMITTER, rf_pin);
/// }
/// ```
pub fn global_transmitter_setup<TX: OutputPin>(
    global_transmitter: &'static Mutex<RefCell<Option<BitBangTransmitter<TX>>>>,
    rf: TX,
) {
    critical_section::with(|cs| {
        let _ = global_transmitter
            .borrow(cs)
            .replace(Some(BitBangTransmitter::new(rf)));
    });
}

/// Runs the transmitter tick at each interrupt.
///
/// # Arguments
/// * The global static transmitter slot
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM1() {
///     global_transmitter_tick(&RF_TRANSMITTER);
/// }
/// ```
pub fn global_transmitter_tick<TX: OutputPin>(
    global_transmitter: &'static Mutex<RefCell<Option<BitBangTransmitter<TX>>>>,
) {
    critical_section::with(|cs| {
        if let Some(tx) = global_transmitter.borrow(cs).borrow_mut().as_mut() {
            tx.tick();
        }
    });
}

/// Runs a foreground closure against the global transmitter, atomically
/// with respect to the timer interrupt.
///
/// Because the closure runs inside the critical section, an idle-check
/// followed by a [`send`](BitBangTransmitter::send) cannot race with a
/// completion in the interrupt handler; the pair is a single atomic
/// read-modify-write. Returns `None` if the singleton has not been set up.
///
/// # Example
/// ```ignore
/// let now = platform::now();
/// with_transmitter(&RF_TRANSMITTER, |tx| {
///     remote.poll(now, tx, &mut stop);
/// });
/// ```
pub fn with_transmitter<TX: OutputPin, R>(
    global_transmitter: &'static Mutex<RefCell<Option<BitBangTransmitter<TX>>>>,
    f: impl FnOnce(&mut BitBangTransmitter<TX>) -> R,
) -> Option<R> {
    critical_section::with(|cs| {
        global_transmitter
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(f)
    })
}
