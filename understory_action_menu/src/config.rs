// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and timing configuration.
//!
//! All values have defaults matching a compact bottom-right floating button:
//! a 50pt trigger inset 15pt from the corner, items stacked upwards every 55pt.

use kurbo::Vec2;
use peniko::Color;

use crate::animation::Curve;

/// Drop shadow drawn under the trigger.
#[derive(Copy, Clone, Debug)]
pub struct Shadow {
    /// Shadow color.
    pub color: Color,
    /// Shadow opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Blur radius.
    pub radius: f64,
    /// Offset from the trigger.
    pub offset: Vec2,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(128, 128, 128),
            opacity: 1.0,
            radius: 2.0,
            offset: Vec2::new(1.0, 1.0),
        }
    }
}

/// Fixed distances and visual constants used by layout.
#[derive(Copy, Clone, Debug)]
pub struct MenuMetrics {
    /// Distance between consecutive items along the stacking axis.
    ///
    /// Negative values stack items upwards, away from a bottom-anchored trigger.
    pub item_offset: f64,
    /// Horizontal offset of every item center relative to the trigger center.
    pub horizontal_offset: f64,
    /// Width and height of the round trigger.
    pub trigger_diameter: f64,
    /// Gap between the trigger and the bottom/right edges of the parent.
    pub margin: f64,
    /// Bottom content inset applied under a text glyph, to optically center it.
    pub glyph_inset: f64,
    /// Font size used for the trigger title.
    pub glyph_font_size: f64,
    /// Scale of the trigger while pressed.
    pub pressed_scale: f64,
    /// Opacity of the backdrop while expanded.
    pub backdrop_opacity: f64,
    /// Trigger drop shadow.
    pub shadow: Shadow,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            item_offset: -55.0,
            horizontal_offset: -133.0,
            trigger_diameter: 50.0,
            margin: 15.0,
            glyph_inset: 8.0,
            glyph_font_size: 35.0,
            pressed_scale: 0.9,
            backdrop_opacity: 0.95,
            shadow: Shadow::default(),
        }
    }
}

/// Curves used for each kind of animation the menu requests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuTimings {
    /// Phase one of expand/collapse.
    pub primary: Curve,
    /// Phase two of expand/collapse.
    pub settle: Curve,
    /// Trigger press and release scaling.
    pub press: Curve,
    /// Backdrop fade-in when expanding.
    pub backdrop_fade: Curve,
}

impl Default for MenuTimings {
    fn default() -> Self {
        Self {
            primary: Curve::spring(0.2),
            settle: Curve::spring(0.08),
            press: Curve::spring(0.2),
            backdrop_fade: Curve::EaseInOut { duration: 0.2 },
        }
    }
}

/// Complete configuration of an [`ActionMenu`](crate::ActionMenu).
#[derive(Copy, Clone, Debug, Default)]
pub struct MenuConfig {
    /// Geometry.
    pub metrics: MenuMetrics,
    /// Animation timing.
    pub timings: MenuTimings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_stack_upwards() {
        let m = MenuMetrics::default();
        assert!(m.item_offset < 0.0);
        assert_eq!(m.item_offset, -55.0);
        assert_eq!(m.trigger_diameter, 50.0);
    }

    #[test]
    fn settle_is_shorter_than_primary() {
        let t = MenuTimings::default();
        assert!(t.settle.duration() < t.primary.duration());
    }
}
