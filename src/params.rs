//! # Plugin Parameters
//!
//! Parameters are the knobs and sliders the user sees in the DAW. Each
//! parameter has:
//!
//! - A **unique string ID** (`#[id = "..."]`) that the host uses to
//!   save and recall presets. Once published, never change these IDs
//!   or existing presets will break.
//! - A **human-readable name** shown in the DAW's UI.
//! - A **range** (min, max, and optional skew).
//! - A **default value**.
//!
//! ## Why No Smoothing?
//!
//! nih-plug can ramp parameter changes over a few milliseconds to avoid
//! zipper noise, and most plugins should use that. This one
//! deliberately does not: the engine reads each value raw, once per
//! block, and applies it instantly — the same take-it-as-it-comes
//! behavior this flanger has always had. Sweeping a slider hard can
//! therefore produce small discontinuities; that is an accepted
//! trade-off, not an oversight, and it keeps the engine's output a pure
//! function of (input, parameter trajectory).

use nih_plug::prelude::*;

/// All user-facing parameters for the Northlight Flanger.
///
/// The `#[derive(Params)]` macro registers these with the host,
/// handles preset serialization, and exposes them for automation.
/// The engine never sees this struct: `lib.rs` copies the four values
/// into the engine's plain setter surface at the top of every block.
#[derive(Params)]
pub struct FlangerParams {
    /// **Gain** — input level into the effect.
    ///
    /// Applied to the raw sample *before* it enters the delay line, so
    /// it scales the direct signal and every delayed copy of it alike.
    /// Because the wet-only mix sums direct + delayed, full gain on a
    /// full-scale input will lean on the output limiter; backing this
    /// off is how you stay clear of it.
    ///
    /// Range: 0–100%. Default: 50%.
    #[id = "gain"]
    pub gain: FloatParam,

    /// **Center Frequency** — currently inert.
    ///
    /// Inherited from this effect's tone-generator ancestry, when it
    /// drove a built-in sine oscillator instead of the track input.
    /// The knob, its range, and its automation lane are all preserved
    /// so sessions keep loading, but the value goes nowhere in the
    /// signal path today.
    ///
    /// Range: 20 Hz – 2 kHz. Default: 440 Hz.
    #[id = "freq"]
    pub center_frequency: FloatParam,

    /// **LFO Rate** — how fast the sweep moves.
    ///
    /// The speed of the sine that modulates the delay time. Slow rates
    /// (0.1–0.5 Hz) give the classic slow jet-plane sweep; a few Hz
    /// starts to warble; 0 Hz freezes the sweep wherever the phase
    /// happens to sit, turning the flanger into a static comb filter.
    ///
    /// Range: 0–10 Hz. Default: 2 Hz.
    #[id = "lforate"]
    pub lfo_rate: FloatParam,

    /// **LFO Depth** — how far the sweep reaches.
    ///
    /// The fraction of the maximum delay (1000 samples, ~23 ms at
    /// 44.1 kHz) the modulation can cover. 0% disables the sweep
    /// entirely (zero delay, doubled signal); 100% sweeps the full
    /// line for the widest, most seasick effect.
    ///
    /// Range: 0–100%. Default: 50%.
    #[id = "lfodepth"]
    pub lfo_depth: FloatParam,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            gain: FloatParam::new(
                "Gain",
                0.5, // Default: 50% — headroom for the wet-only sum
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            // Display as percentage: 0.50 → "50.0%"
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),

            center_frequency: FloatParam::new(
                "Center Freq",
                440.0, // Default: 440 Hz (A4), the ancestral test tone
                FloatRange::Skewed {
                    min: 20.0,
                    max: 2000.0,
                    // Frequency perception is roughly logarithmic, so
                    // bias knob travel toward the low end where equal
                    // movements sound like equal changes.
                    factor: FloatRange::skew_factor(-2.0),
                },
            )
            .with_unit(" Hz")
            .with_step_size(1.0), // Whole Hz steps are fine

            lfo_rate: FloatParam::new(
                "LFO Rate",
                2.0, // Default: 2 Hz — a brisk but musical sweep
                FloatRange::Linear { min: 0.0, max: 10.0 },
            )
            .with_unit(" Hz")
            .with_step_size(0.01),

            lfo_depth: FloatParam::new(
                "LFO Depth",
                0.5, // Default: 50% of the delay line
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),
        }
    }
}
