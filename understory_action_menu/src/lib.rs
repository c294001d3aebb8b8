// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_action_menu --heading-base-level=0

//! Understory Action Menu: a headless floating action button with an expanding menu.
//!
//! The component is a round **trigger** anchored in the bottom-right corner of a
//! parent view. Tapping it expands a vertical stack of **items** over a dimming
//! **backdrop**; tapping the trigger again, or the backdrop, collapses it. Items
//! and backdrop live on a transient **content layer** that is attached to the
//! parent only while the menu is expanded.
//!
//! This crate implements the interaction state machine, item layout and
//! animation choreography. It does not render, run animations or recognize
//! gestures. Instead:
//!
//! - The host supplies view handles ([`MenuViews`], [`MenuItem`]) of any
//!   `Copy` type, for example generational node ids from a box tree.
//! - Every operation queues [`Command`]s describing view-tree operations,
//!   property changes and animations. The host drains and applies them with
//!   [`ActionMenu::take_commands`] or [`ActionMenu::flush`].
//! - The host forwards gestures ([`ActionMenu::trigger_pressed`],
//!   [`ActionMenu::trigger_released`], [`ActionMenu::backdrop_tapped`],
//!   [`ActionMenu::item_tapped`]) and animation completions
//!   ([`ActionMenu::animation_finished`]).
//!
//! ## State machine
//!
//! A menu is either [`MenuState::Collapsed`] (initial) or
//! [`MenuState::Expanded`]. Each toggle:
//!
//! 1. Re-runs layout: every item is attached to the content layer at a center
//!    horizontally offset from the trigger.
//! 2. On expand, inserts the content layer below the trigger and the backdrop
//!    below the content layer.
//! 3. Requests the primary animation: items translate to
//!    `(index + 1) * item_offset` (or back to zero) and fade, the backdrop fades,
//!    and a `+` glyph rotates past its resting angle.
//! 4. Commits the new state; [`ActionMenu::is_active`] reflects it immediately.
//!
//! When the host reports the primary animation finished, the menu requests a
//! short settle animation that snaps the glyph to its resting angle. When
//! collapsing, the content layer and backdrop are detached at that point, after
//! their opacity has reached zero.
//!
//! ## Rapid toggles
//!
//! Toggles are never debounced. Each toggle bumps a generation counter and tags
//! its animations with an [`AnimationId`]. Completions that do not match the
//! transition in flight are ignored, so a late collapse completion can never
//! detach the layer of a newer expansion.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_action_menu::{ActionMenu, Command, MenuItem, MenuViews, Phase};
//!
//! let views = MenuViews { trigger: 1_u32, content: 2, backdrop: 3 };
//! let items = vec![
//!     MenuItem::new(10),
//!     MenuItem::with_action(11, |menu: &mut ActionMenu<u32>| menu.toggle_menu()),
//! ];
//! let mut menu = ActionMenu::new(0, views, Rect::new(0.0, 0.0, 320.0, 480.0), items);
//! let _setup = menu.take_commands();
//!
//! menu.toggle_menu();
//! assert!(menu.is_active());
//!
//! // The host animates the queued changes, then reports completion.
//! let primary = menu
//!     .take_commands()
//!     .into_iter()
//!     .find_map(|c| match c {
//!         Command::Animate(a) => a.id,
//!         _ => None,
//!     })
//!     .unwrap();
//! assert_eq!(primary.phase(), Phase::Primary);
//! assert!(menu.animation_finished(primary));
//! ```
//!
//! See the [`headless`] module for an in-memory host that applies commands and
//! drives completions deterministically.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo and Peniko.
//! - `libm`: use `libm` for floating point math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
pub mod command;
mod config;
pub mod headless;
pub mod layout;
mod menu;
mod state;
mod style;

pub use animation::{Animation, Curve, overshoot_rotation, resting_rotation};
pub use command::{Change, Command, MenuHost, TreeOp};
pub use config::{MenuConfig, MenuMetrics, MenuTimings, Shadow};
pub use layout::ItemVisual;
pub use menu::{ActionMenu, MenuAction, MenuItem, MenuViews};
pub use state::{AnimationId, MenuState, Phase};
pub use style::{ControlState, ImageId, PLUS_GLYPH, TriggerContent, TriggerStyle, default_background};
