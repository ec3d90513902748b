// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration: scale limits and fit padding.

/// Smallest minimum scale the engine accepts.
///
/// Lower configured limits are raised to this value so the scale can never
/// reach zero.
pub const MIN_SCALE_FLOOR: f64 = 1e-6;

/// Space kept around the content when scaling it to fit, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Added on the left and on the right.
    pub horizontal: f64,
    /// Added on the top and at the bottom.
    pub vertical: f64,
}

impl Padding {
    /// Default padding used by [`TransformEngine::fit_content`](crate::TransformEngine::fit_content).
    pub const DEFAULT: Self = Self::uniform(200.0);

    /// No padding at all.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(padding: f64) -> Self {
        Self {
            horizontal: padding,
            vertical: padding,
        }
    }

    /// Separate horizontal and vertical padding.
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Replaces negative or NaN components with `0`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let fix = |v: f64| if v > 0.0 { v } else { 0.0 };
        Self::new(fix(self.horizontal), fix(self.vertical))
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for Padding {
    fn from(padding: f64) -> Self {
        Self::uniform(padding)
    }
}

impl From<(f64, f64)> for Padding {
    fn from((horizontal, vertical): (f64, f64)) -> Self {
        Self::new(horizontal, vertical)
    }
}

/// Tunables for a [`TransformEngine`](crate::TransformEngine).
///
/// The engine always stores a [normalized](Self::normalized) copy, so the
/// scale range is well-formed regardless of what the caller passes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Lower scale limit, at least [`MIN_SCALE_FLOOR`].
    pub min_scale: f64,
    /// Upper scale limit.
    pub max_scale: f64,
    /// Padding used when no explicit padding is given.
    pub default_padding: Padding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
            default_padding: Padding::DEFAULT,
        }
    }
}

impl EngineConfig {
    /// Returns a copy with the scale limits replaced.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.normalized()
    }

    /// Returns a copy with the default padding replaced.
    #[must_use]
    pub fn with_default_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.default_padding = padding.into();
        self.normalized()
    }

    /// Makes the configuration usable.
    ///
    /// - Non-finite limits fall back to their defaults.
    /// - The limits are swapped if `min_scale > max_scale`.
    /// - `min_scale` is raised to [`MIN_SCALE_FLOOR`], and `max_scale` to
    ///   `min_scale`.
    /// - Padding is [normalized](Padding::normalized).
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        let mut min = pick(self.min_scale, defaults.min_scale);
        let mut max = pick(self.max_scale, defaults.max_scale);
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        let min = min.max(MIN_SCALE_FLOOR);
        Self {
            min_scale: min,
            max_scale: max.max(min),
            default_padding: self.default_padding.normalized(),
        }
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
