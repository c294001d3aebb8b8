// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion state and transition bookkeeping.
//!
//! A menu is always in exactly one [`MenuState`]. Visual transitions between the
//! two states run in two phases ([`Phase::Primary`] then [`Phase::Settle`]), and
//! each toggle is tagged with a monotonically increasing generation. Completion
//! reports carry an [`AnimationId`] so that a late completion for an older toggle
//! can be recognized and ignored.

/// Expansion state of an action menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// Only the trigger is shown. This is the initial state.
    #[default]
    Collapsed,
    /// The content layer and backdrop are attached and items sit at their
    /// stacked offsets.
    Expanded,
}

impl MenuState {
    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    /// Returns `true` for [`MenuState::Expanded`].
    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// One of the two steps of an expand/collapse transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Rotate the trigger past its final angle and move/fade items and backdrop.
    Primary,
    /// Snap the trigger rotation and, when collapsing, detach the content layer.
    Settle,
}

/// Identifies a tracked animation requested by a menu.
///
/// Hosts echo this value back through
/// [`ActionMenu::animation_finished`](crate::ActionMenu::animation_finished).
/// Ids are only meaningful to the menu that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId {
    pub(crate) generation: u64,
    pub(crate) phase: Phase,
}

impl AnimationId {
    pub(crate) const fn new(generation: u64, phase: Phase) -> Self {
        Self { generation, phase }
    }

    /// The toggle generation this animation belongs to.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    /// The transition phase this animation drives.
    #[must_use]
    pub const fn phase(self) -> Phase {
        self.phase
    }
}

/// The transition currently in flight, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) generation: u64,
    pub(crate) target: MenuState,
    pub(crate) phase: Phase,
    /// Whether the trigger glyph overshot and needs to settle.
    pub(crate) rotates: bool,
}

impl Transition {
    pub(crate) const fn current_id(self) -> AnimationId {
        AnimationId::new(self.generation, self.phase)
    }

    /// Returns `true` if `id` is the completion this transition is waiting for.
    pub(crate) fn awaits(self, id: AnimationId) -> bool {
        self.current_id() == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_collapsed() {
        assert_eq!(MenuState::default(), MenuState::Collapsed);
        assert!(!MenuState::default().is_expanded());
    }

    #[test]
    fn toggled_flips_and_round_trips() {
        assert_eq!(MenuState::Collapsed.toggled(), MenuState::Expanded);
        assert_eq!(MenuState::Expanded.toggled(), MenuState::Collapsed);
        assert_eq!(MenuState::Expanded.toggled().toggled(), MenuState::Expanded);
    }

    #[test]
    fn transition_only_awaits_its_current_phase() {
        let t = Transition {
            generation: 3,
            target: MenuState::Expanded,
            phase: Phase::Primary,
            rotates: true,
        };
        assert!(t.awaits(AnimationId::new(3, Phase::Primary)));
        assert!(!t.awaits(AnimationId::new(3, Phase::Settle)));
        assert!(!t.awaits(AnimationId::new(2, Phase::Primary)));
    }
}
