//! # Flanger Engine
//!
//! The host-independent core of the plugin: everything that happens to
//! audio lives here, behind three operations — `prepare`, `process`,
//! and a handful of parameter setters. The nih-plug glue in `lib.rs`
//! is a thin adapter over this type, which also makes the whole signal
//! path testable with plain slices and no plugin host in sight.
//!
//! ## Per-Sample Algorithm (channel 0)
//!
//! ```text
//! 1. input  = gain · raw_sample
//! 2. write input into the delay line          (before the read!)
//! 3. tick the LFO → modulation ∈ [0, 1]
//! 4. delay  = depth · MAX_DELAY · modulation
//! 5. tapped = delay_line.read(delay)          (two-tap interpolation)
//! 6. out    = limit(input + tapped, -1, 1)
//! 7. advance the delay line cursor
//! ```
//!
//! Writing before reading (steps 2 and 5) is load-bearing: it means a
//! zero delay reads back the sample that just went in, so turning the
//! depth down collapses the effect into a doubled signal rather than
//! into garbage from one buffer-length ago.
//!
//! The mix at step 6 is wet-only: direct plus delayed, no dry/wet
//! blend knob. That is the classic student-flanger topology, and the
//! reason the limiter at the end is not optional.
//!
//! ## Channels
//!
//! Only channel 0 runs the algorithm. Every other input channel is
//! overwritten with the previous channel's already-processed samples,
//! so the processed signal cascades across the whole channel set and a
//! stereo track comes out with both sides identical. Output channels
//! beyond the input count are cleared to silence up front — the host
//! does not guarantee their contents, and passing through whatever
//! memory happens to be there is how plugins emit screaming garbage.
//!
//! ## Threading
//!
//! `process` runs on the host's real-time audio thread and does no
//! allocation, no locking, and no I/O — every sample costs the same
//! constant amount of work. Parameter setters are called from the
//! non-real-time side between blocks; the fields are plain values, and
//! a change simply takes effect on the next block. Torn or stale reads
//! produce at worst a one-block glitch, never a crash, which is the
//! standard low-latency trade-off.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::dsp::{delay_line::DelayLine, lfo::Lfo, limiter::limit};

/// Delay line capacity in samples. Fixed, not derived from the sample
/// rate: at 44100 Hz this is ~23 ms of maximum delay, squarely in
/// flanger territory (above ~30 ms the ear starts hearing a discrete
/// echo instead of a sweep).
pub const MAX_DELAY_SAMPLES: usize = 1000;

const DELAY_CAPACITY: NonZeroUsize = match NonZeroUsize::new(MAX_DELAY_SAMPLES) {
    Some(n) => n,
    None => panic!("MAX_DELAY_SAMPLES must be non-zero"),
};

/// Rejected configuration at prepare time.
///
/// This is the engine's entire error surface. Once `prepare` has
/// succeeded, every operation on the audio path is a total function:
/// buffer reads wrap instead of failing and the limiter always returns
/// an in-range value, so there is nothing left to go wrong mid-stream.
#[derive(Debug, Error, PartialEq)]
pub enum PrepareError {
    /// The host handed us a sample rate that is zero, negative, or not
    /// finite. Phase increments and delay times would all be nonsense.
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    /// A maximum block size of zero means the host would never deliver
    /// audio; treat it as a broken configuration rather than silently
    /// accepting it.
    #[error("maximum block size must be at least 1 sample")]
    InvalidBlockSize,
}

/// The flanger's complete processing state.
///
/// Audio-rate state (delay line, LFO phase) is owned exclusively by
/// this struct and only touched inside [`process`](Self::process).
/// The parameter fields are written by the setters and read by the
/// processing loop once per sample; they carry the control surface's
/// most recent values with no smoothing and no clamping — range
/// enforcement belongs to whoever owns the sliders.
pub struct FlangerEngine {
    /// Samples per second, set by `prepare`. Feeds the LFO's phase
    /// increment; nothing else in the active path depends on it.
    sample_rate: f64,

    /// The modulated delay line. Reallocated (at the same fixed
    /// capacity) on every `prepare`, never while audio is running.
    delay_line: DelayLine,

    /// LFO phase state. Reset only by `prepare`/`reset`, so the sweep
    /// is continuous across blocks.
    lfo: Lfo,

    /// Input gain ∈ [0, 1]. Applied to the raw sample before it enters
    /// the delay line, so it scales direct and delayed signal alike.
    gain: f64,

    /// Center frequency in Hz ∈ [20, 2000]. A leftover from this
    /// effect's tone-generator ancestry: the setter and the host
    /// parameter exist, but nothing in the active signal path consumes
    /// the value. Kept so existing sessions and automation lanes keep
    /// working; wiring it back up to an internal oscillator is a
    /// product decision, not a bug fix.
    center_frequency: f64,

    /// LFO rate in Hz ∈ [0, 10]. Zero freezes the sweep.
    lfo_frequency: f64,

    /// LFO depth ∈ [0, 1]: the fraction of `MAX_DELAY_SAMPLES` the
    /// sweep can reach. Zero reduces the delay to zero samples.
    lfo_depth: f64,
}

impl FlangerEngine {
    /// Create an engine with the stock defaults: unity-ish gain at 0.5,
    /// a 2 Hz sweep at half depth. The delay line exists immediately so
    /// the engine is safe to use even before `prepare`, but hosts are
    /// expected to call `prepare` first.
    pub fn new() -> Self {
        Self {
            // Placeholder until prepare() reports the real rate.
            sample_rate: 44100.0,
            delay_line: DelayLine::new(DELAY_CAPACITY),
            lfo: Lfo::new(),
            gain: 0.5,
            center_frequency: 440.0,
            lfo_frequency: 2.0,
            lfo_depth: 0.5,
        }
    }

    /// (Re)configure for a sample rate and maximum block size.
    ///
    /// Called by the host before any processing, and again whenever the
    /// audio configuration changes; the host serializes this against
    /// `process`, so this is the one place allocation is allowed. The
    /// delay line is rebuilt (dropping any stored audio) and the LFO
    /// phase starts over from zero.
    ///
    /// Bad configurations are rejected here, at the only moment a
    /// failure can be surfaced — per-sample processing has no error
    /// path by design.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) -> Result<(), PrepareError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(PrepareError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(PrepareError::InvalidBlockSize);
        }

        self.sample_rate = sample_rate;
        self.delay_line = DelayLine::new(DELAY_CAPACITY);
        self.lfo.reset();

        Ok(())
    }

    /// Clear audio-rate state without reconfiguring.
    ///
    /// Maps to the host's "playback stopped / plugin bypassed" hook:
    /// stored audio and the LFO phase go back to silence so old sweeps
    /// don't bleed into the next play session.
    pub fn reset(&mut self) {
        self.delay_line.clear();
        self.lfo.reset();
    }

    /// Process one block in place.
    ///
    /// `channels` is the host's buffer, one slice per channel, input
    /// and output sharing storage. `num_input_channels` says how many
    /// of those channels actually carried input; any channel at or
    /// beyond that index is cleared to silence before anything else
    /// runs. Channel 0 gets the flanger; channels `1..num_input` each
    /// copy their predecessor (see the module docs).
    ///
    /// Never fails, never blocks, never allocates.
    pub fn process(&mut self, channels: &mut [&mut [f32]], num_input_channels: usize) {
        // Outputs the host gave us but no input filled: silence them
        // rather than emitting whatever was left in the buffer.
        for channel in channels.iter_mut().skip(num_input_channels) {
            channel.fill(0.0);
        }

        let active_channels = num_input_channels.min(channels.len());
        if active_channels == 0 {
            return;
        }

        for sample in channels[0].iter_mut() {
            // Parameters are re-read every sample; a setter call landing
            // between blocks is picked up at the next sample boundary.
            let input_signal = self.gain as f32 * *sample;

            // Write before read: the freshest tap a read can reach is
            // the sample going in right now.
            self.delay_line.write(input_signal);

            let modulation = self.lfo.tick(self.lfo_frequency, self.sample_rate);

            // Scale the [0, 1] modulation onto [0, MAX_DELAY] samples.
            let delay = self.lfo_depth * modulation * MAX_DELAY_SAMPLES as f64;
            let delayed = self.delay_line.read(delay as f32);

            // Wet-only mix, then the unconditional hard clamp.
            *sample = limit(input_signal + delayed, -1.0, 1.0);

            self.delay_line.advance();
        }

        // Cascade the processed signal across the remaining channels:
        // 1 copies 0, 2 copies 1, and so on.
        for channel in 1..active_channels {
            let (done, rest) = channels.split_at_mut(channel);
            rest[0].copy_from_slice(&done[channel - 1]);
        }
    }

    /// Set the input gain. Stored as-is; expected range [0, 1].
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
    }

    /// Set the (currently inert) center frequency in Hz. Stored as-is;
    /// expected range [20, 2000]. See the field docs for why this
    /// exists at all.
    pub fn set_center_frequency(&mut self, frequency_hz: f64) {
        self.center_frequency = frequency_hz;
    }

    /// The stored (and unconsumed) center frequency in Hz. Exists so
    /// a control surface can read back what it last set.
    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    /// Set the LFO sweep rate in Hz. Stored as-is; expected range
    /// [0, 10]. Takes effect on the next sample with no phase
    /// correction — the sweep bends, it doesn't restart.
    pub fn set_lfo_frequency(&mut self, frequency_hz: f64) {
        self.lfo_frequency = frequency_hz;
    }

    /// Set the LFO depth. Stored as-is; expected range [0, 1].
    pub fn set_lfo_depth(&mut self, depth: f64) {
        self.lfo_depth = depth;
    }
}

impl Default for FlangerEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
