//! # Hard Limiter
//!
//! The last stage before a sample leaves the plugin. The flanger's
//! wet-only mix adds the delayed signal on top of the direct signal, so
//! a full-scale input can momentarily sum to twice full scale; without
//! a guard that would clip unpredictably in the host (or worse, in the
//! listener's ears). A hard clamp to [-1, 1] bounds the damage.
//!
//! This is the bluntest possible limiter: no soft knee, no lookahead,
//! no release envelope. Values inside the range pass through untouched,
//! values outside are pinned to the nearest bound, every sample,
//! unconditionally.

/// Clamp `value` into `[min, max]`.
///
/// Written out as explicit comparisons rather than `f32::clamp`: the
/// result is the same for finite inputs and a NaN passes through
/// unchanged, but the three-way branch keeps the contract readable at
/// a glance and has no assertion (`clamp` panics if min > max) — on
/// the audio thread we never want a code path that can panic.
pub fn limit(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Values barely over the ceiling come back exactly at the ceiling.
    #[test]
    fn test_clamps_upper_bound() {
        assert_eq!(limit(1.000_000_1, -1.0, 1.0), 1.0);
        assert_eq!(limit(2.0, -1.0, 1.0), 1.0);
        assert_eq!(limit(f32::INFINITY, -1.0, 1.0), 1.0);
    }

    /// Values under the floor come back exactly at the floor.
    #[test]
    fn test_clamps_lower_bound() {
        assert_eq!(limit(-2.0, -1.0, 1.0), -1.0);
        assert_eq!(limit(-1.000_01, -1.0, 1.0), -1.0);
        assert_eq!(limit(f32::NEG_INFINITY, -1.0, 1.0), -1.0);
    }

    /// In-range values pass through bit-for-bit, including the bounds
    /// themselves.
    #[test]
    fn test_passes_in_range_values() {
        assert_eq!(limit(0.3, -1.0, 1.0), 0.3);
        assert_eq!(limit(-0.999, -1.0, 1.0), -0.999);
        assert_eq!(limit(1.0, -1.0, 1.0), 1.0);
        assert_eq!(limit(-1.0, -1.0, 1.0), -1.0);
        assert_eq!(limit(0.0, -1.0, 1.0), 0.0);
    }
}
