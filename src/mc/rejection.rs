//! Bounded "draw until accepted" loops.
//!
//! Every loop here terminates with probability one; the cap only turns a
//! pathological stream into a [`SimulationError::Stalled`] instead of a hang.
use crate::core::SimulationError;
use crate::math::RngStream;

/// Default cap for rejection loops over small discrete supports.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Redraws with `draw` until `accept` holds, at most `max_attempts` times.
pub fn draw_until<T, D, A>(
    rng: &mut RngStream,
    what: &'static str,
    max_attempts: usize,
    mut draw: D,
    accept: A,
) -> Result<T, SimulationError>
where
    D: FnMut(&mut RngStream) -> T,
    A: Fn(&T) -> bool,
{
    for _ in 0..max_attempts {
        let candidate = draw(rng);
        if accept(&candidate) {
            return Ok(candidate);
        }
    }
    Err(SimulationError::Stalled {
        what,
        attempts: max_attempts,
    })
}
