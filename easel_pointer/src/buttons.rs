// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer button identities and pressed-button sets.

/// A single pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button, or a touch/pen contact.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Usually the middle mouse button or wheel press.
    Auxiliary,
    /// The "browser back" side button.
    Back,
    /// The "browser forward" side button.
    Forward,
}

impl PointerButton {
    /// Decodes a platform button index.
    ///
    /// Uses the DOM `MouseEvent.button` numbering: `0` primary, `1`
    /// auxiliary, `2` secondary, `3` back, `4` forward. Other values yield
    /// `None`.
    #[must_use]
    pub const fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    /// Returns the single-button set for this button.
    #[must_use]
    pub const fn into_set(self) -> PointerButtons {
        match self {
            Self::Primary => PointerButtons::PRIMARY,
            Self::Secondary => PointerButtons::SECONDARY,
            Self::Auxiliary => PointerButtons::AUXILIARY,
            Self::Back => PointerButtons::BACK,
            Self::Forward => PointerButtons::FORWARD,
        }
    }
}

bitflags::bitflags! {
    /// Set of pointer buttons currently held down.
    ///
    /// Bit values follow the DOM `MouseEvent.buttons` mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u16 {
        /// [`PointerButton::Primary`].
        const PRIMARY   = 0b0_0001;
        /// [`PointerButton::Secondary`].
        const SECONDARY = 0b0_0010;
        /// [`PointerButton::Auxiliary`].
        const AUXILIARY = 0b0_0100;
        /// [`PointerButton::Back`].
        const BACK      = 0b0_1000;
        /// [`PointerButton::Forward`].
        const FORWARD   = 0b1_0000;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

impl PointerButtons {
    /// Decodes a platform `buttons` mask, ignoring unknown bits.
    #[must_use]
    pub const fn from_mask(mask: u16) -> Self {
        Self::from_bits_truncate(mask)
    }

    /// Returns `true` if `button` is held.
    #[must_use]
    pub const fn is_down(self, button: PointerButton) -> bool {
        self.contains(button.into_set())
    }

    /// Returns `true` if the primary button is held.
    #[must_use]
    pub const fn is_primary_down(self) -> bool {
        self.contains(Self::PRIMARY)
    }

    /// Returns `true` if the secondary button is held.
    #[must_use]
    pub const fn is_secondary_down(self) -> bool {
        self.contains(Self::SECONDARY)
    }

    /// Returns `true` if the auxiliary button is held.
    #[must_use]
    pub const fn is_auxiliary_down(self) -> bool {
        self.contains(Self::AUXILIARY)
    }

    /// Returns `true` if any button is held.
    #[must_use]
    pub const fn any_down(self) -> bool {
        !self.is_empty()
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        button.into_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_decoding() {
        let held = PointerButtons::from_mask(0b101);
        assert!(held.is_primary_down());
        assert!(held.is_auxiliary_down());
        assert!(!held.is_secondary_down());
        assert!(held.is_down(PointerButton::Auxiliary));

        // Bits above FORWARD are dropped.
        assert_eq!(PointerButtons::from_mask(0xffe0), PointerButtons::empty());
        assert!(!PointerButtons::default().any_down());
    }

    #[test]
    fn index_and_mask_disagree_on_purpose() {
        // Index 1 is the auxiliary button, but mask bit 1 is secondary.
        assert_eq!(PointerButton::from_index(1), Some(PointerButton::Auxiliary));
        assert_eq!(
            PointerButtons::from_mask(0b10),
            PointerButtons::from(PointerButton::Secondary)
        );
        assert_eq!(PointerButton::from_index(7), None);
        assert_eq!(PointerButton::from_index(-1), None);
    }
}
