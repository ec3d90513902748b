// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale + offset state and its persistable snapshot.

use core::fmt;

use kurbo::{Affine, Point};

/// Uniform scale and translation mapping content space onto the surface.
///
/// `surface = content × scale + offset`, where surface coordinates are backing
/// pixels (device coordinates × device pixel ratio). The scale is always
/// finite and strictly positive; the offset is always finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    scale: f64,
    offset: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// `scale = 1`, `offset = (0, 0)`.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Point::ZERO,
    };

    /// Creates a state, validating the scale and offset.
    pub fn new(scale: f64, offset: Point) -> Result<Self, StateError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(StateError::InvalidScale(scale));
        }
        if !(offset.x.is_finite() && offset.y.is_finite()) {
            return Err(StateError::InvalidOffset(offset));
        }
        Ok(Self { scale, offset })
    }

    /// Returns a copy with the scale replaced.
    pub fn with_scale(self, scale: f64) -> Result<Self, StateError> {
        Self::new(scale, self.offset)
    }

    /// Returns a copy with the offset replaced.
    pub fn with_offset(self, offset: Point) -> Result<Self, StateError> {
        Self::new(self.scale, offset)
    }

    /// Current scale; `1.0` is 100%.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current content-to-surface translation, in surface pixels.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Maps a content-space point onto the surface.
    #[must_use]
    pub fn content_to_surface(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + self.offset.x,
            pt.y * self.scale + self.offset.y,
        )
    }

    /// Maps a surface point back into content space.
    #[must_use]
    pub fn surface_to_content(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.offset.x) / self.scale,
            (pt.y - self.offset.y) / self.scale,
        )
    }

    /// Content → surface transform, for callers that paint.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.offset.to_vec2()) * Affine::scale(self.scale)
    }

    /// Captures the state as a [`Snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            scale: self.scale,
            offset: self.offset,
        }
    }
}

/// Immutable capture of a [`TransformState`].
///
/// This is the only persistable form of the view state. With the `serde`
/// feature it serializes as `{"scale": f64, "offset": {"x": f64, "y": f64}}`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Scale at capture time.
    pub scale: f64,
    /// Offset at capture time, in surface pixels.
    pub offset: Point,
}

impl Snapshot {
    /// Checks the snapshot and turns it back into a state.
    pub fn validate(self) -> Result<TransformState, StateError> {
        TransformState::new(self.scale, self.offset)
    }
}

impl From<TransformState> for Snapshot {
    fn from(state: TransformState) -> Self {
        state.snapshot()
    }
}

impl TryFrom<Snapshot> for TransformState {
    type Error = StateError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        snapshot.validate()
    }
}

/// Error returned when a scale or offset would break the state invariants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateError {
    /// Scale was zero, negative, NaN or infinite.
    InvalidScale(f64),
    /// Offset had a NaN or infinite coordinate.
    InvalidOffset(Point),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale(scale) => {
                write!(f, "scale must be finite and positive, got {scale}")
            }
            Self::InvalidOffset(offset) => {
                write!(f, "offset must be finite, got ({}, {})", offset.x, offset.y)
            }
        }
    }
}

impl core::error::Error for StateError {}
