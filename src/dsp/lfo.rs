//! # Low-Frequency Oscillator
//!
//! A sine oscillator running at sub-audio rates (0–10 Hz here). It
//! never produces sound directly; its output sweeps the flanger's
//! delay time up and down, which is what turns a static comb filter
//! into the moving "whoosh."
//!
//! ## Phase Accumulation
//!
//! A digital oscillator is just a phase accumulator. Each sample we add
//! a fixed increment to a running phase and take the sine of the total:
//!
//! ```text
//! increment = 2π · frequency / sample_rate
//! phase    += increment
//! value     = sin(phase)
//! ```
//!
//! The increment is how far around the unit circle one sample period
//! moves at the requested frequency. At 2 Hz and 44100 Hz sample rate
//! that's 2π·2/44100 ≈ 0.000285 radians per sample — it takes 22050
//! samples (half a second) to complete one cycle.
//!
//! The phase here is allowed to grow without bound rather than being
//! wrapped back into [0, 2π). It only ever feeds `sin`, which is
//! periodic, so the output is unaffected; the cost is that after very
//! long runtimes the f64 phase loses ulp-level precision and the
//! oscillator drifts microscopically. For a modulation source that is
//! inaudible, and it matches the behavior this effect was tuned with.

use std::f64::consts::TAU;

/// Sine LFO state: a single unbounded phase accumulator.
///
/// The frequency is *not* stored here — it is passed into every
/// [`tick`](Self::tick) so a control-surface change takes effect on the
/// very next sample. No phase-continuity correction is applied when the
/// frequency jumps; the sweep just bends at the new rate.
pub struct Lfo {
    /// Accumulated phase in radians. Monotonically increasing; see the
    /// module docs for why it is never wrapped.
    phase: f64,
}

impl Lfo {
    /// Create an LFO with its phase at zero (modulation output 0.5).
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advance the phase by one sample at `frequency_hz` and return the
    /// modulation value, normalized into [0, 1]:
    ///
    /// ```text
    /// modulation = 0.5 · (1 + sin(phase))
    /// ```
    ///
    /// The raw sine swings over [-1, 1]; shifting and halving maps it
    /// onto [0, 1] so the caller can use it directly as a fraction of
    /// the maximum delay. A frequency of zero freezes the phase and the
    /// output becomes a constant.
    pub fn tick(&mut self, frequency_hz: f64, sample_rate: f64) -> f64 {
        let increment = TAU * frequency_hz / sample_rate;
        self.phase += increment;

        0.5 * (1.0 + self.phase.sin())
    }

    /// Zero the phase. Called only when the engine is (re)prepared.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// At 0 Hz the phase never moves from zero, so the modulation sits
    /// at the midpoint: 0.5 · (1 + sin 0) = 0.5. The engine's
    /// "frozen sweep" behavior depends on this exact value.
    #[test]
    fn test_zero_frequency_is_constant_midpoint() {
        let mut lfo = Lfo::new();

        for _ in 0..1000 {
            let m = lfo.tick(0.0, 44100.0);
            assert_eq!(m, 0.5);
        }
    }

    /// Walk the oscillator around one full cycle in four steps by
    /// picking a frequency of sample_rate / 4: each tick advances the
    /// phase by π/2, hitting the sine's peak, midpoint, trough,
    /// midpoint in turn.
    #[test]
    fn test_quarter_period_walk() {
        let mut lfo = Lfo::new();
        let fs = 1000.0;
        let f = 250.0; // increment = π/2 per tick

        assert!((lfo.tick(f, fs) - 1.0).abs() < 1e-9); // sin(π/2) = 1
        assert!((lfo.tick(f, fs) - 0.5).abs() < 1e-9); // sin(π)   = 0
        assert!((lfo.tick(f, fs) - 0.0).abs() < 1e-9); // sin(3π/2) = -1
        assert!((lfo.tick(f, fs) - 0.5).abs() < 1e-9); // sin(2π)  = 0
    }

    /// The modulation output stays inside [0, 1] no matter how long the
    /// oscillator runs or how the frequency moves around.
    #[test]
    fn test_output_range() {
        let mut lfo = Lfo::new();

        for i in 0..10_000 {
            // Sweep the frequency while running, like automation would.
            let f = (i % 11) as f64;
            let m = lfo.tick(f, 44100.0);
            assert!((0.0..=1.0).contains(&m), "modulation {m} out of range");
        }
    }

    /// Reset puts the phase back to zero exactly.
    #[test]
    fn test_reset() {
        let mut lfo = Lfo::new();
        for _ in 0..137 {
            lfo.tick(3.7, 48000.0);
        }

        lfo.reset();
        assert_eq!(lfo.tick(0.0, 48000.0), 0.5);
    }
}
