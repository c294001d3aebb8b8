// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure placement functions.
//!
//! Layout is static: the trigger sits in the bottom-right corner of its parent,
//! every item shares one center horizontally offset from the trigger, and
//! expansion is expressed as a per-item vertical translation
//! `(index + 1) * item_offset`. There is no measurement, collision handling or
//! sizing based on item count.
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use understory_action_menu::{MenuMetrics, MenuState};
//! use understory_action_menu::layout::{item_visual, trigger_frame};
//!
//! let metrics = MenuMetrics::default();
//! let frame = trigger_frame(Rect::new(0.0, 0.0, 320.0, 480.0), &metrics);
//! assert_eq!(frame, Rect::new(255.0, 415.0, 305.0, 465.0));
//!
//! let second = item_visual(1, MenuState::Expanded, &metrics);
//! assert_eq!(second.translation, Vec2::new(0.0, -110.0));
//! assert_eq!(second.opacity, 1.0);
//! ```

use kurbo::{Point, Rect, Size, Vec2};

use crate::MenuState;
use crate::config::MenuMetrics;

/// Transform and opacity of a single item for a given menu state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemVisual {
    /// Translation from the item's resting center.
    pub translation: Vec2,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl ItemVisual {
    /// The collapsed visual: no translation, fully transparent.
    pub const HIDDEN: Self = Self {
        translation: Vec2::ZERO,
        opacity: 0.0,
    };
}

/// Frame of the trigger inside a parent with the given bounds.
#[must_use]
pub fn trigger_frame(parent_bounds: Rect, metrics: &MenuMetrics) -> Rect {
    let d = metrics.trigger_diameter;
    let origin = Point::new(
        parent_bounds.x1 - metrics.margin - d,
        parent_bounds.y1 - metrics.margin - d,
    );
    Rect::from_origin_size(origin, Size::new(d, d))
}

/// Resting center shared by all items, before any expansion translation.
#[must_use]
pub fn item_center(trigger_center: Point, metrics: &MenuMetrics) -> Point {
    trigger_center + Vec2::new(metrics.horizontal_offset, 0.0)
}

/// Visual of the item at `index` when the menu is in `state`.
#[must_use]
pub fn item_visual(index: usize, state: MenuState, metrics: &MenuMetrics) -> ItemVisual {
    match state {
        MenuState::Collapsed => ItemVisual::HIDDEN,
        MenuState::Expanded => {
            let step = (index + 1) as f64;
            ItemVisual {
                translation: Vec2::new(0.0, step * metrics.item_offset),
                opacity: 1.0,
            }
        }
    }
}

/// Visuals for `count` items in `state`, in item order.
pub fn item_visuals(
    count: usize,
    state: MenuState,
    metrics: &MenuMetrics,
) -> impl Iterator<Item = ItemVisual> + '_ {
    (0..count).map(move |index| item_visual(index, state, metrics))
}

/// Opacity of the content layer in `state`.
#[must_use]
pub const fn content_opacity(state: MenuState) -> f64 {
    match state {
        MenuState::Collapsed => 0.0,
        MenuState::Expanded => 1.0,
    }
}
