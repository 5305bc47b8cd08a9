//! # Northlight Flanger — An AU/VST3/CLAP Flanger Plugin
//!
//! A classic modulated-delay flanger built with
//! [nih-plug](https://github.com/robbert-vdh/nih-plug). Outputs Audio
//! Unit (AUv2), VST3, and CLAP formats from a single codebase. The DSP
//! is implemented from scratch in [`engine`] and [`dsp`]; this file is
//! only the host-facing glue.
//!
//! ## Signal Flow
//!
//! ```text
//!                    ┌────────────────────────────────┐
//! Input ──► × gain ──┼──► [Ring Buffer / Delay Line] ─┼──► delayed tap
//!                │   │          ▲                     │        │
//!                │   │          │ read position       │        │
//!                │   │   [LFO: 0.5·(1 + sin φ)]       │        │
//!                │   └────────────────────────────────┘        │
//!                │                                             ▼
//!                └────────────────────────────────────────────►(+)──► [Limiter] ──► Output
//! ```
//!
//! Only channel 0 is processed; every other channel mirrors it. The
//! mix is wet-only (direct + delayed, no dry/wet knob), which is why
//! the hard limiter on the way out is not optional.

pub mod dsp;
pub mod engine;
mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use engine::{FlangerEngine, MAX_DELAY_SAMPLES};
use nih_plug::prelude::*;
use params::FlangerParams;

/// The main plugin struct.
///
/// ## Why separate state from parameters?
///
/// Parameters (`FlangerParams`) are shared with the host via `Arc` and
/// can be read from any thread (the audio thread, the UI thread, the
/// host's automation thread). Processing state (the delay line, the
/// LFO phase) lives in [`FlangerEngine`], is owned exclusively by the
/// audio thread, and is only touched in `process()`. This separation
/// makes the design thread-safe without locks.
pub struct NorthlightFlanger {
    /// Shared reference to the plugin parameters. The `Arc` allows
    /// both the plugin and the host to hold references to the same
    /// parameter data without copying.
    params: Arc<FlangerParams>,

    /// The host-independent DSP core: prepare/process/setters. Every
    /// audio-rate decision is made in there, not here.
    engine: FlangerEngine,
}

impl Default for NorthlightFlanger {
    fn default() -> Self {
        Self {
            params: Arc::new(FlangerParams::default()),
            engine: FlangerEngine::new(),
        }
    }
}

impl Plugin for NorthlightFlanger {
    const NAME: &'static str = "Northlight Flanger";
    const VENDOR: &'static str = "Northlight Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "hello@northlight-audio.example";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Supported audio channel layouts. The host picks the first layout
    // that matches the track configuration. Stereo first (most DAW
    // tracks are stereo), mono as the fallback. The engine itself
    // handles any channel count by mirroring channel 0.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    // A flanger is a pure audio effect; MIDI passes it by entirely.
    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Called when the plugin is first loaded or the audio
    /// configuration changes. Hands the sample rate and block size to
    /// the engine, which (re)allocates its delay line here — the one
    /// moment allocation is allowed, because the host guarantees this
    /// never races `process()`.
    ///
    /// Returning `false` tells the host the configuration is unusable
    /// and the plugin won't load.
    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        match self.engine.prepare(
            f64::from(buffer_config.sample_rate),
            buffer_config.max_buffer_size as usize,
        ) {
            Ok(()) => true,
            Err(err) => {
                nih_error!("refusing audio configuration: {err}");
                false
            }
        }
    }

    /// Called when playback stops or the plugin is bypassed. Clears
    /// the delay line and LFO phase so a stale sweep doesn't bleed
    /// into the next play session.
    fn reset(&mut self) {
        self.engine.reset();
    }

    /// The per-block processing callback.
    ///
    /// All the DSP lives in [`FlangerEngine::process`]; this adapter
    /// only (1) copies the current host parameter values into the
    /// engine's setter surface — raw, unsmoothed, once per block — and
    /// (2) hands the engine the buffer as plain channel slices.
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        self.engine.set_gain(f64::from(self.params.gain.value()));
        self.engine
            .set_center_frequency(f64::from(self.params.center_frequency.value()));
        self.engine
            .set_lfo_frequency(f64::from(self.params.lfo_rate.value()));
        self.engine
            .set_lfo_depth(f64::from(self.params.lfo_depth.value()));

        // In-place processing: input and output share this storage.
        let num_channels = buffer.channels();
        self.engine.process(buffer.as_slice(), num_channels);

        // The delay line can keep ringing for up to its full length
        // after the input goes silent; ask the host to keep calling us
        // that long so the tail isn't cut off.
        ProcessStatus::Tail(MAX_DELAY_SAMPLES as u32)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────
//
// These traits tell nih-plug how to package the plugin for different
// plugin formats. We support both CLAP and VST3.

impl ClapPlugin for NorthlightFlanger {
    // A reverse-domain-notation ID, unique to this plugin.
    const CLAP_ID: &'static str = "com.northlight-audio.northlight-flanger";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("A classic LFO-modulated fractional-delay flanger");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Flanger,
    ];
}

impl Vst3Plugin for NorthlightFlanger {
    // A 16-byte class ID that must be globally unique across all VST3
    // plugins. The `*b"..."` syntax turns a 16-character ASCII string
    // literal into a `[u8; 16]`.
    const VST3_CLASS_ID: [u8; 16] = *b"NrthlghtFlngr001";

    // File under modulation effects in the host's plugin browser.
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Modulation];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// These macros generate the C-compatible entry points that the host
// DAW uses to discover and load the plugin.
//
// nih_export_clap! exports the `clap_entry` symbol for CLAP hosts.
// nih_export_vst3! exports `GetPluginFactory` for VST3 hosts.
// clap_wrapper re-exports the CLAP entry point as AUv2 so Logic Pro
// (Audio Units only) can load it.

nih_export_clap!(NorthlightFlanger);
nih_export_vst3!(NorthlightFlanger);

clap_wrapper::export_auv2!();
