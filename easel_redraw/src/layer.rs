// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint layers and layer sets.

use core::fmt;

/// A paint layer of the drawing surface.
///
/// Layers are painted back to front in the order given by [`Layer::PAINT_ORDER`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Shapes and other document content.
    Main,
    /// Overlays drawn above everything else (selection handles, cursors).
    Top,
    /// Content-dependent chrome such as scrollbars.
    Internal,
}

impl Layer {
    /// Layers in the order they are painted.
    pub const PAINT_ORDER: [Self; 3] = [Self::Main, Self::Internal, Self::Top];

    /// Converts this layer into a single-element [`LayerSet`].
    #[must_use]
    pub const fn into_set(self) -> LayerSet {
        match self {
            Self::Main => LayerSet::MAIN,
            Self::Top => LayerSet::TOP,
            Self::Internal => LayerSet::INTERNAL,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Top => 1,
            Self::Internal => 2,
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Main => "main",
            Self::Top => "top",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// A compact set of [`Layer`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerSet: u8 {
        /// [`Layer::Main`].
        const MAIN     = 0b0000_0001;
        /// [`Layer::Top`].
        const TOP      = 0b0000_0010;
        /// [`Layer::Internal`].
        const INTERNAL = 0b0000_0100;
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayerSet {
    /// Adds the layers implied by the ones already present.
    ///
    /// `MAIN` implies `INTERNAL`.
    #[must_use]
    pub fn expand(self) -> Self {
        if self.contains(Self::MAIN) {
            self | Self::INTERNAL
        } else {
            self
        }
    }

    /// Returns `true` if the set contains `layer`.
    #[must_use]
    pub fn has(self, layer: Layer) -> bool {
        self.contains(layer.into_set())
    }

    /// Iterates the layers in this set in paint order.
    pub fn layers(self) -> impl Iterator<Item = Layer> {
        Layer::PAINT_ORDER
            .into_iter()
            .filter(move |layer| self.has(*layer))
    }
}

impl From<Layer> for LayerSet {
    fn from(layer: Layer) -> Self {
        layer.into_set()
    }
}
