use std::fmt::Display;
use std::thread;
use std::time::Duration;

/// Calls `op` up to `attempts` times, sleeping `delay` between attempts,
/// and returns the first result the predicate accepts.
///
/// Reboot, reset and firmware update are asynchronous on the device side
/// with no completion signal, so polling is the only readiness mechanism.
/// An `Err` from `op` is logged and consumed as one attempt rather than
/// propagated; exhaustion returns `None` and the caller decides whether
/// that is fatal.
pub fn wait_until<T, E, Op, Pred>(
    mut op: Op,
    predicate: Pred,
    attempts: u32,
    delay: Duration,
) -> Option<T>
where
    Op: FnMut() -> Result<T, E>,
    Pred: Fn(&T) -> bool,
    E: Display,
{
    for attempt in 1..=attempts {
        match op() {
            Ok(value) => {
                if predicate(&value) {
                    log::debug!("poll attempt {attempt}/{attempts} accepted");
                    return Some(value);
                }
                log::debug!("poll attempt {attempt}/{attempts} rejected by predicate");
            }
            Err(err) => {
                log::debug!("poll attempt {attempt}/{attempts} failed: {err}, ignoring");
            }
        }
        if attempt < attempts {
            thread::sleep(delay);
        }
    }
    log::debug!("exhausted {attempts} poll attempts without an accepted result");
    None
}
