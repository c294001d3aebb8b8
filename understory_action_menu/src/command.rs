// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commands emitted for the host toolkit.
//!
//! An [`ActionMenu`](crate::ActionMenu) does not talk to a view system
//! directly. Every operation appends [`Command`]s to an internal queue, in the
//! order the host must apply them. Hosts drain the queue with
//! [`ActionMenu::take_commands`](crate::ActionMenu::take_commands) or
//! [`ActionMenu::flush`](crate::ActionMenu::flush).
//!
//! The host contract is small:
//!
//! - [`TreeOp`]s attach and detach views. Attaching an already attached view
//!   moves it.
//! - [`Change`]s set a single property. Transforms are relative to the view's
//!   center.
//! - [`Animation`]s animate a batch of changes with a [`Curve`](crate::Curve)
//!   and, when they carry an id, report completion back to the menu.

use alloc::string::String;

use kurbo::{Affine, Insets, Point, Rect};
use peniko::Color;

use crate::animation::Animation;
use crate::config::Shadow;
use crate::style::{ControlState, ImageId};

/// A structural view-tree operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeOp<V> {
    /// Attach `view` as the topmost child of `parent`.
    Append {
        /// New parent.
        parent: V,
        /// View to attach.
        view: V,
    },
    /// Attach `view` to `parent` directly below `sibling`.
    InsertBelow {
        /// New parent.
        parent: V,
        /// View to attach.
        view: V,
        /// Existing child of `parent` that should stay above `view`.
        sibling: V,
    },
    /// Detach `view` from its parent, if any.
    Remove {
        /// View to detach.
        view: V,
    },
}

/// A single property assignment on a view.
#[derive(Clone, Debug)]
pub enum Change<V> {
    /// Frame in parent coordinates.
    Frame {
        /// Target view.
        view: V,
        /// New frame.
        frame: Rect,
    },
    /// Center in parent coordinates.
    Center {
        /// Target view.
        view: V,
        /// New center.
        center: Point,
    },
    /// Transform about the view's center.
    Transform {
        /// Target view.
        view: V,
        /// New transform.
        transform: Affine,
    },
    /// Opacity in `0.0..=1.0`.
    Opacity {
        /// Target view.
        view: V,
        /// New opacity.
        opacity: f64,
    },
    /// Background fill.
    Background {
        /// Target view.
        view: V,
        /// New color.
        color: Color,
    },
    /// Visibility flag.
    Hidden {
        /// Target view.
        view: V,
        /// `true` hides the view.
        hidden: bool,
    },
    /// Selection flag of a control.
    Selected {
        /// Target view.
        view: V,
        /// `true` marks the control selected.
        selected: bool,
    },
    /// Title of a control for one interaction state.
    Title {
        /// Target view.
        view: V,
        /// State the title applies to.
        state: ControlState,
        /// Title text.
        title: String,
    },
    /// Image of a control for one interaction state.
    Image {
        /// Target view.
        view: V,
        /// State the image applies to.
        state: ControlState,
        /// Image handle.
        image: ImageId,
    },
    /// Content insets of a control.
    ContentInsets {
        /// Target view.
        view: V,
        /// New insets.
        insets: Insets,
    },
    /// Static chrome of a round control.
    Chrome {
        /// Target view.
        view: V,
        /// Corner radius.
        corner_radius: f64,
        /// Drop shadow.
        shadow: Shadow,
        /// Font size of the title.
        font_size: f64,
    },
}

impl<V: Copy> Change<V> {
    /// The view this change applies to.
    #[must_use]
    pub fn view(&self) -> V {
        match *self {
            Self::Frame { view, .. }
            | Self::Center { view, .. }
            | Self::Transform { view, .. }
            | Self::Opacity { view, .. }
            | Self::Background { view, .. }
            | Self::Hidden { view, .. }
            | Self::Selected { view, .. }
            | Self::Title { view, .. }
            | Self::Image { view, .. }
            | Self::ContentInsets { view, .. }
            | Self::Chrome { view, .. } => view,
        }
    }
}

/// One instruction for the host.
#[derive(Clone, Debug)]
pub enum Command<V> {
    /// Structural operation, applied immediately.
    Tree(TreeOp<V>),
    /// Property assignment, applied immediately.
    Set(Change<V>),
    /// Animated property assignments.
    Animate(Animation<V>),
}

/// A view system that can carry out [`Command`]s.
///
/// Implementations translate commands into their toolkit's calls. When an
/// applied [`Animation`] has an id, the implementation must eventually pass it
/// to [`ActionMenu::animation_finished`](crate::ActionMenu::animation_finished).
pub trait MenuHost<V> {
    /// Applies one command.
    fn apply(&mut self, command: Command<V>);
}

impl<V, H: MenuHost<V> + ?Sized> MenuHost<V> for &mut H {
    fn apply(&mut self, command: Command<V>) {
        (**self).apply(command);
    }
}
