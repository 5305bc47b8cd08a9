//! # DSP (Digital Signal Processing) Primitives
//!
//! The leaf building blocks of the flanger:
//!
//! - **`delay_line`**: A ring buffer that stores past audio samples and
//!   reads them back at integer or fractional offsets. The heart of any
//!   time-based effect.
//!
//! - **`lfo`**: A sub-audio sine oscillator whose output sweeps the
//!   delay time up and down — what makes a flanger a flanger rather
//!   than a fixed comb filter.
//!
//! - **`limiter`**: A hard clamp on the output so the direct + delayed
//!   sum can never leave [-1, 1].

pub mod delay_line;
pub mod lfo;
pub mod limiter;
