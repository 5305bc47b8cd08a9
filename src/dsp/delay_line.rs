//! # Delay Line (Ring Buffer)
//!
//! A delay line stores audio samples and lets you read them back some
//! number of samples later. It is the heart of the flanger: the LFO
//! sweeps the read position back and forth behind the write position,
//! and the moving comb-filter cancellations that result are the
//! characteristic "jet plane" sound.
//!
//! ## How a Ring Buffer Works
//!
//! Picture a circular tape loop. A "write head" records incoming audio
//! onto the tape, and a "read head" plays it back from a position some
//! distance behind. The distance between the heads is the delay time.
//!
//! In code the "tape" is a `Vec<f32>` and the write head is an integer
//! index. Each processed sample does three things, in this order:
//!
//! 1. Write the new sample at `write_pos`.
//! 2. Read one or more taps at `(write_pos - offset)`, wrapping around
//!    the end of the buffer.
//! 3. Advance `write_pos` by 1, wrapping back to 0 at the end.
//!
//! Writing *before* reading matters here: it lets a zero-offset tap see
//! the sample that just went in, which is what collapses the flanger to
//! a doubled signal when the modulation depth is turned all the way down.
//!
//! ## Fractional Delays
//!
//! The LFO produces delay times like 441.3 samples, not whole numbers.
//! Snapping to whole sample positions would make the sweep audibly step
//! ("zipper noise"), so a fractional delay is approximated by blending
//! the two adjacent integer taps:
//!
//! ```text
//! result = (1 - frac) * tap[floor(d)] + frac * tap[floor(d) + 1]
//! ```

use std::num::NonZeroUsize;

/// A fixed-capacity ring buffer used as an audio delay line.
///
/// The buffer is allocated once, at its maximum length, when the engine
/// is prepared. Nothing about it ever grows or shrinks while audio is
/// running — changing the delay time only moves the read offset. The
/// capacity is a [`NonZeroUsize`] so a zero-length line (which would
/// make the wrap-around arithmetic divide by zero) cannot be built.
pub struct DelayLine {
    /// The circular sample storage. Starts out all zeros (silence).
    buffer: Vec<f32>,

    /// Where the next incoming sample will be stored. Advances by 1 per
    /// sample via [`advance`](Self::advance), wrapping to 0 at the end.
    write_pos: usize,

    /// Cached `buffer.len()`, kept separate so the modular arithmetic
    /// below reads clearly.
    capacity: usize,
}

impl DelayLine {
    /// Create a delay line holding `capacity` samples of history.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            buffer: vec![0.0; capacity.get()],
            write_pos: 0,
            capacity: capacity.get(),
        }
    }

    /// Maximum number of samples of history this line can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a sample at the current write position.
    ///
    /// This does NOT advance the write position. Call
    /// [`advance()`](Self::advance) once the reads for the current
    /// sample are done; keeping the cursor still in between is what
    /// lets `read_at(0)` return the sample just written.
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
    }

    /// Read the sample stored `offset_back` positions behind the write
    /// cursor. `read_at(0)` is the slot the cursor currently points at.
    ///
    /// The index math for looking N samples back on a ring:
    ///
    /// ```text
    /// index = (write_pos + capacity - N) % capacity
    /// ```
    ///
    /// Adding `capacity` before subtracting keeps the intermediate value
    /// non-negative (`usize` can't go below zero), and the modulo wraps
    /// it back into range. Offsets at or beyond the capacity simply wrap
    /// around again; there is no out-of-range error. A total, pure
    /// function is exactly what a real-time path wants: it can never
    /// panic, block, or fail.
    pub fn read_at(&self, offset_back: usize) -> f32 {
        let index = (self.write_pos + self.capacity - offset_back % self.capacity) % self.capacity;
        self.buffer[index]
    }

    /// Read a (possibly fractional) number of samples behind the write
    /// cursor, linearly interpolating between the two adjacent taps.
    ///
    /// For `delay_samples = 441.3`:
    /// - `tap_a` is 441 samples back, weighted 0.7
    /// - `tap_b` is 442 samples back, weighted 0.3
    ///
    /// When the fractional part is exactly zero the blend degenerates to
    /// `tap_a` alone, so integer delays are reproduced exactly.
    ///
    /// The delay is clamped to `[0, capacity - 1]` so that both taps
    /// land on stored history. The LFO can request a delay equal to the
    /// full capacity at the top of its swing; the clamp pins that to the
    /// oldest stored sample instead of wrapping back to the newest.
    pub fn read(&self, delay_samples: f32) -> f32 {
        let delay_clamped = delay_samples.clamp(0.0, (self.capacity - 1) as f32);

        let delay_int = delay_clamped as usize;
        let delay_frac = delay_clamped - delay_int as f32;

        let tap_a = self.read_at(delay_int);
        let tap_b = self.read_at(delay_int + 1);

        (1.0 - delay_frac) * tap_a + delay_frac * tap_b
    }

    /// Advance the write position by one sample, wrapping at the end.
    ///
    /// Call this once per sample, after `write()` and the reads for that
    /// sample are both done.
    pub fn advance(&mut self) {
        self.write_pos = (self.write_pos + 1) % self.capacity;
    }

    /// Clear the buffer to silence and reset the write position.
    ///
    /// Called when playback stops so stale audio from the last session
    /// doesn't bleed into the next one.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line(capacity: usize) -> DelayLine {
        DelayLine::new(NonZeroUsize::new(capacity).unwrap())
    }

    /// A zero-offset tap sees the sample that was just written, before
    /// the cursor advances. The whole per-sample ordering of the engine
    /// leans on this.
    #[test]
    fn test_zero_offset_reads_current_sample() {
        let mut dl = line(100);

        dl.write(0.75);
        assert!((dl.read_at(0) - 0.75).abs() < 1e-6);

        // After advancing, the same sample is one position back.
        dl.advance();
        assert!((dl.read_at(1) - 0.75).abs() < 1e-6);
    }

    /// Verify linear interpolation between two known samples.
    #[test]
    fn test_interpolation_midpoint() {
        let mut dl = line(100);

        dl.write(0.0);
        dl.advance();
        dl.write(1.0);
        dl.advance();

        // write_pos is now 2. Reading 1.5 samples back blends:
        //   tap_a at pos 1 → 1.0, weight 0.5
        //   tap_b at pos 0 → 0.0, weight 0.5
        let result = dl.read(1.5);
        assert!((result - 0.5).abs() < 1e-6, "Expected 0.5, got {result}");
    }

    /// At an exact integer delay, interpolation must reproduce the
    /// stored sample bit-for-bit — the fractional weight is zero, so
    /// the second tap contributes nothing.
    #[test]
    fn test_integer_delay_is_exact() {
        let mut dl = line(100);

        for i in 1..=5 {
            dl.write(i as f32 * 0.1);
            dl.advance();
        }

        for offset in 1..=5usize {
            assert_eq!(dl.read(offset as f32), dl.read_at(offset));
        }
    }

    /// Reading is pure: repeated reads at the same offset with no
    /// intervening writes return the same value.
    #[test]
    fn test_read_has_no_side_effects() {
        let mut dl = line(16);
        dl.write(0.42);
        dl.advance();

        let first = dl.read_at(1);
        let second = dl.read_at(1);
        assert_eq!(first, second);

        let frac_first = dl.read(0.5);
        let frac_second = dl.read(0.5);
        assert_eq!(frac_first, frac_second);
    }

    /// Verify the buffer wraps correctly past its boundaries.
    #[test]
    fn test_wrapping() {
        let mut dl = line(4);

        // Write 0..6 into a buffer of size 4; the last 4 survive.
        for i in 0..6 {
            dl.write(i as f32);
            dl.advance();
        }

        // write_pos = 6 % 4 = 2. Buffer: [4.0, 5.0, 2.0, 3.0].
        // One sample back from pos 2 is pos 1 → 5.0.
        let result = dl.read(1.0);
        assert!((result - 5.0).abs() < 1e-6, "Expected 5.0, got {result}");
    }

    /// Writing exactly `capacity` samples and reading `capacity` back
    /// wraps to the write cursor itself; an offset of `capacity - 1`
    /// reaches the oldest surviving sample. This exercises the modulo
    /// wrap at and beyond the buffer edge.
    #[test]
    fn test_full_capacity_round_trip() {
        const CAP: usize = 8;
        let mut dl = line(CAP);

        for i in 0..CAP {
            dl.write(i as f32 + 1.0);
            dl.advance();
        }

        // After CAP writes the cursor is back at slot 0, so an offset
        // of CAP wraps to offset 0, and CAP - 1 reaches the oldest
        // surviving sample (the second one written, value 2.0).
        assert_eq!(dl.read_at(CAP), dl.read_at(0));
        assert!((dl.read_at(CAP - 1) - 2.0).abs() < 1e-6);

        // Keep writing past capacity; the read always lands on stored
        // history, never on uninitialized or out-of-range memory.
        for i in CAP..(3 * CAP) {
            dl.write(i as f32 + 1.0);
            dl.advance();
            assert!((dl.read_at(1) - (i as f32 + 1.0)).abs() < 1e-6);
        }
    }

    /// The fractional read clamps to `capacity - 1`, pinning oversized
    /// delay requests to the oldest stored sample.
    #[test]
    fn test_fractional_read_clamps_to_capacity() {
        let mut dl = line(4);
        for i in 1..=4 {
            dl.write(i as f32);
            dl.advance();
        }

        // Offsets of 3, 100, and a billion all pin to the oldest tap.
        assert_eq!(dl.read(100.0), dl.read(3.0));
        assert_eq!(dl.read(1e9), dl.read(3.0));
        // Negative requests pin to the zero-offset tap.
        assert_eq!(dl.read(-5.0), dl.read(0.0));
    }

    /// Verify that clearing resets everything to silence.
    #[test]
    fn test_clear() {
        let mut dl = line(10);

        dl.write(0.5);
        dl.advance();
        dl.clear();

        for offset in 0..10 {
            assert_eq!(dl.read_at(offset), 0.0);
        }
    }

    /// A freshly created buffer outputs silence at any delay.
    #[test]
    fn test_silence_in_silence_out() {
        let dl = line(100);

        for delay in [0.0, 1.0, 10.0, 50.5, 99.0] {
            let result = dl.read(delay);
            assert!(
                result.abs() < 1e-6,
                "Expected silence at delay {delay}, got {result}"
            );
        }
    }

    /// Writing a sequence and reading it back in order (FIFO behavior).
    #[test]
    fn test_fifo_sequence() {
        let mut dl = line(10);

        for i in 1..=5 {
            dl.write(i as f32);
            dl.advance();
        }

        // Most recent first: 1 back = 5.0, ... 5 back = 1.0.
        for offset in 1..=5usize {
            let expected = (6 - offset) as f32;
            assert!((dl.read_at(offset) - expected).abs() < 1e-6);
        }
    }
}
