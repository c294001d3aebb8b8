// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation curves and the trigger rotation choreography.
//!
//! The menu never interpolates anything itself. It describes *what* should
//! change and with which [`Curve`], and the host's animation scheduler does the
//! rest. Expand and collapse each run in two phases:
//!
//! 1. [`Phase::Primary`](crate::Phase::Primary): the trigger glyph rotates past
//!    its final angle while items, content layer and backdrop move and fade.
//! 2. [`Phase::Settle`](crate::Phase::Settle): a short spring snaps the glyph to
//!    its final angle. When collapsing, the content layer and backdrop are
//!    detached as this phase starts, once their opacity has reached zero.

use core::f64::consts::FRAC_PI_4;

use alloc::vec::Vec;

use crate::MenuState;
use crate::command::Change;
use crate::state::AnimationId;

/// Timing description handed to the host animation scheduler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    /// A damped spring, parameterized like common platform spring animations.
    Spring {
        /// Duration in seconds.
        duration: f64,
        /// Damping ratio; `1.0` is critically damped (no oscillation).
        damping: f64,
        /// Initial velocity, relative to the total distance per second.
        initial_velocity: f64,
    },
    /// A plain ease-in/ease-out interpolation.
    EaseInOut {
        /// Duration in seconds.
        duration: f64,
    },
}

impl Curve {
    /// A critically damped spring with the given duration and a small initial velocity.
    #[must_use]
    pub const fn spring(duration: f64) -> Self {
        Self::Spring {
            duration,
            damping: 1.0,
            initial_velocity: 0.1,
        }
    }

    /// Returns the duration of the curve in seconds.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        match *self {
            Self::Spring { duration, .. } | Self::EaseInOut { duration } => duration,
        }
    }
}

/// A batch of property changes the host should animate together.
///
/// When `id` is `Some`, the host must report completion through
/// [`ActionMenu::animation_finished`](crate::ActionMenu::animation_finished)
/// once the changes have reached their targets.
#[derive(Clone, Debug)]
pub struct Animation<V> {
    /// Completion token, or `None` for fire-and-forget animations.
    pub id: Option<AnimationId>,
    /// Timing curve.
    pub curve: Curve,
    /// Target values.
    pub changes: Vec<Change<V>>,
}

/// Rotation applied to a `+` glyph during the primary phase of a transition to `target`.
///
/// The glyph overshoots its resting angle so the settle phase can snap it back
/// without a visible bounce.
#[must_use]
pub const fn overshoot_rotation(target: MenuState) -> f64 {
    match target {
        MenuState::Expanded => FRAC_PI_4 + FRAC_PI_4 / 2.0,
        MenuState::Collapsed => -FRAC_PI_4 / 2.0,
    }
}

/// Resting rotation of a `+` glyph in `state`.
#[must_use]
pub const fn resting_rotation(state: MenuState) -> f64 {
    match state {
        MenuState::Expanded => FRAC_PI_4,
        MenuState::Collapsed => 0.0,
    }
}
