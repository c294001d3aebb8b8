// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`ActionMenu`] state machine.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use kurbo::{Affine, Insets, Point, Rect};
use peniko::Color;

use crate::animation::{Animation, overshoot_rotation, resting_rotation};
use crate::command::{Change, Command, MenuHost, TreeOp};
use crate::config::MenuConfig;
use crate::layout::{ItemVisual, content_opacity, item_center, item_visuals, trigger_frame};
use crate::state::{AnimationId, MenuState, Phase, Transition};
use crate::style::{ControlState, ImageId, PLUS_GLYPH, TriggerContent, TriggerStyle};

/// Callback run for a trigger tap or an item tap, with the owning menu.
pub type MenuAction<V> = Box<dyn FnMut(&mut ActionMenu<V>)>;

/// One entry of the menu: a host view plus an optional action.
pub struct MenuItem<V> {
    view: V,
    action: Option<MenuAction<V>>,
}

impl<V> MenuItem<V> {
    /// Creates an item without an action.
    pub fn new(view: V) -> Self {
        Self { view, action: None }
    }

    /// Creates an item that runs `action` when tapped.
    pub fn with_action<F>(view: V, action: F) -> Self
    where
        F: FnMut(&mut ActionMenu<V>) + 'static,
    {
        Self {
            view,
            action: Some(Box::new(action)),
        }
    }

    /// Returns `true` if the item has an action.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

impl<V: Copy> MenuItem<V> {
    /// The item's host view.
    #[must_use]
    pub fn view(&self) -> V {
        self.view
    }
}

impl<V: fmt::Debug> fmt::Debug for MenuItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("view", &self.view)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Host views owned by the menu's host but driven by the menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuViews<V> {
    /// The round button that is always attached to the parent.
    pub trigger: V,
    /// Transient layer hosting the items, attached only while expanded.
    pub content: V,
    /// Dimming overlay below the content layer, attached only while expanded.
    pub backdrop: V,
}

/// A floating action button that expands into a stack of items.
///
/// The menu is bound to one parent view for its whole lifetime and never owns
/// it. See the [crate documentation](crate) for the command/completion
/// protocol with the host.
pub struct ActionMenu<V> {
    parent: V,
    views: MenuViews<V>,
    parent_bounds: Rect,
    config: MenuConfig,
    items: Vec<MenuItem<V>>,
    items_revision: u64,
    state: MenuState,
    action: Option<MenuAction<V>>,
    action_revision: u64,
    style: TriggerStyle,
    content: TriggerContent,
    pressed: bool,
    rotation: f64,
    scale: f64,
    layer_attached: bool,
    generation: u64,
    transition: Option<Transition>,
    commands: Vec<Command<V>>,
}

impl<V: fmt::Debug> fmt::Debug for ActionMenu<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionMenu")
            .field("parent", &self.parent)
            .field("views", &self.views)
            .field("state", &self.state)
            .field("items", &self.items)
            .field("layer_attached", &self.layer_attached)
            .field("transition", &self.transition)
            .field("queued_commands", &self.commands.len())
            .finish_non_exhaustive()
    }
}

impl<V: Copy> ActionMenu<V> {
    /// Creates a collapsed menu with the default configuration.
    ///
    /// `parent_bounds` are the parent's bounds in its own coordinate space. The
    /// trigger is attached to `parent` right away; the content layer and
    /// backdrop stay detached until the first expansion.
    pub fn new(parent: V, views: MenuViews<V>, parent_bounds: Rect, items: Vec<MenuItem<V>>) -> Self {
        Self::with_config(parent, views, parent_bounds, items, MenuConfig::default())
    }

    /// Creates a collapsed menu with an explicit configuration.
    pub fn with_config(
        parent: V,
        views: MenuViews<V>,
        parent_bounds: Rect,
        items: Vec<MenuItem<V>>,
        config: MenuConfig,
    ) -> Self {
        let mut menu = Self {
            parent,
            views,
            parent_bounds,
            config,
            items,
            items_revision: 0,
            state: MenuState::Collapsed,
            action: None,
            action_revision: 0,
            style: TriggerStyle::default(),
            content: TriggerContent::plus(),
            pressed: false,
            rotation: 0.0,
            scale: 1.0,
            layer_attached: false,
            generation: 0,
            transition: None,
            commands: Vec::new(),
        };
        menu.install_trigger();
        menu.place_items();
        menu.show_current();
        menu
    }

    // --- Queries ---

    /// The parent view the menu is bound to.
    #[must_use]
    pub fn parent(&self) -> V {
        self.parent
    }

    /// The trigger, content and backdrop views.
    #[must_use]
    pub fn views(&self) -> MenuViews<V> {
        self.views
    }

    /// Current expansion state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Returns `true` while the menu is expanded.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_expanded()
    }

    /// Items in stacking order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem<V>] {
        &self.items
    }

    /// Revision counter bumped every time the item list is replaced.
    #[must_use]
    pub fn items_revision(&self) -> u64 {
        self.items_revision
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Trigger colors and visibility.
    #[must_use]
    pub fn style(&self) -> &TriggerStyle {
        &self.style
    }

    /// Trigger titles and images.
    #[must_use]
    pub fn trigger_content(&self) -> &TriggerContent {
        &self.content
    }

    /// Current interaction state of the trigger.
    #[must_use]
    pub fn control_state(&self) -> ControlState {
        let mut state = ControlState::NORMAL;
        if self.pressed {
            state |= ControlState::HIGHLIGHTED;
        }
        if self.state.is_expanded() {
            state |= ControlState::SELECTED;
        }
        state
    }

    /// Frame of the trigger in parent coordinates.
    #[must_use]
    pub fn trigger_frame(&self) -> Rect {
        trigger_frame(self.parent_bounds, &self.config.metrics)
    }

    /// Resting center of every item in content-layer coordinates.
    #[must_use]
    pub fn item_center(&self) -> Point {
        item_center(self.trigger_frame().center(), &self.config.metrics)
    }

    /// Current visual of the item at `index`, or `None` if out of range.
    #[must_use]
    pub fn item_visual(&self, index: usize) -> Option<ItemVisual> {
        (index < self.items.len()).then(|| {
            crate::layout::item_visual(index, self.state, &self.config.metrics)
        })
    }

    /// Current trigger transform: press scale combined with glyph rotation.
    #[must_use]
    pub fn trigger_transform(&self) -> Affine {
        Affine::rotate(self.rotation) * Affine::scale(self.scale)
    }

    /// Returns `true` while the content layer and backdrop are attached.
    #[must_use]
    pub fn is_layer_attached(&self) -> bool {
        self.layer_attached
    }

    /// Returns `true` while an expand or collapse transition has not settled.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Number of toggles performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if a direct trigger action is bound.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    // --- Commands ---

    /// Commands queued since the last drain.
    #[must_use]
    pub fn pending_commands(&self) -> &[Command<V>] {
        &self.commands
    }

    /// Drains the queued commands, in the order they must be applied.
    pub fn take_commands(&mut self) -> Vec<Command<V>> {
        mem::take(&mut self.commands)
    }

    /// Drains the queued commands into `host`.
    pub fn flush<H: MenuHost<V>>(&mut self, mut host: H) {
        for command in mem::take(&mut self.commands) {
            host.apply(command);
        }
    }

    // --- Mutators ---

    /// Replaces the items.
    ///
    /// Previous item views are detached first. The new items are attached to
    /// the content layer and immediately shown in the visual of the current
    /// state, so replacing items while expanded keeps the menu expanded.
    pub fn set_items(&mut self, items: Vec<MenuItem<V>>) {
        let old = mem::replace(&mut self.items, items);
        for item in &old {
            self.tree(TreeOp::Remove { view: item.view });
        }
        self.items_revision = self.items_revision.wrapping_add(1);
        tracing::debug!(
            count = self.items.len(),
            revision = self.items_revision,
            "replaced action menu items"
        );
        self.place_items();
        self.show_current();
    }

    /// Binds the action run once per trigger tap, replacing any previous one.
    pub fn set_action<F>(&mut self, action: F) -> &mut Self
    where
        F: FnMut(&mut Self) + 'static,
    {
        self.action = Some(Box::new(action));
        self.action_revision = self.action_revision.wrapping_add(1);
        self
    }

    /// Removes the direct trigger action.
    pub fn clear_action(&mut self) -> &mut Self {
        self.action = None;
        self.action_revision = self.action_revision.wrapping_add(1);
        self
    }

    /// Sets the trigger background and resets the selected background to match.
    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.style.set_background(color);
        self.set(Change::Background {
            view: self.views.trigger,
            color,
        });
        self
    }

    /// Sets the trigger background used while expanded.
    pub fn set_selected_color(&mut self, color: Color) -> &mut Self {
        self.style.set_selected_background(color);
        if self.state.is_expanded() {
            self.set(Change::Background {
                view: self.views.trigger,
                color,
            });
        }
        self
    }

    /// Shows or hides the trigger.
    ///
    /// This does not collapse an expanded menu, and hidden menus still accept
    /// [`ActionMenu::toggle_menu`].
    pub fn set_hidden(&mut self, hidden: bool) -> &mut Self {
        self.style.set_hidden(hidden);
        self.set(Change::Hidden {
            view: self.views.trigger,
            hidden,
        });
        self
    }

    /// Sets the trigger title for `state`. `None` leaves the title unchanged.
    pub fn set_title(&mut self, title: Option<&str>, state: ControlState) -> &mut Self {
        let Some(title) = title else {
            tracing::trace!(?state, "ignoring absent trigger title");
            return self;
        };
        self.content.set_title(state, String::from(title));
        self.set(Change::Title {
            view: self.views.trigger,
            state,
            title: String::from(title),
        });
        let inset = if title.is_empty() {
            0.0
        } else {
            self.config.metrics.glyph_inset
        };
        self.set_bottom_inset(inset);
        self
    }

    /// Sets the trigger image for `state`. `None` leaves the image unchanged.
    pub fn set_image(&mut self, image: Option<ImageId>, state: ControlState) -> &mut Self {
        let Some(image) = image else {
            tracing::trace!(?state, "ignoring absent trigger image");
            return self;
        };
        self.content.set_image(state, image);
        self.set(Change::Image {
            view: self.views.trigger,
            state,
            image,
        });
        let has_title = self
            .content
            .current_title(self.control_state())
            .is_some_and(|t| !t.is_empty());
        let inset = if has_title {
            0.0
        } else {
            self.config.metrics.glyph_inset
        };
        self.set_bottom_inset(inset);
        self
    }

    /// Updates the parent bounds after the parent was resized.
    ///
    /// Re-places the trigger, content layer, backdrop and item centers.
    pub fn set_parent_bounds(&mut self, bounds: Rect) {
        self.parent_bounds = bounds;
        self.set(Change::Frame {
            view: self.views.trigger,
            frame: self.trigger_frame(),
        });
        self.set(Change::Frame {
            view: self.views.content,
            frame: bounds,
        });
        self.set(Change::Frame {
            view: self.views.backdrop,
            frame: bounds,
        });
        let center = self.item_center();
        for index in 0..self.items.len() {
            let view = self.items[index].view;
            self.set(Change::Center { view, center });
        }
    }

    // --- State machine ---

    /// Re-runs item layout, then expands or collapses.
    ///
    /// This follows the same transition as a trigger tap, without the press
    /// feedback and without running the trigger's own action.
    pub fn toggle_menu(&mut self) {
        self.place_items();
        self.toggle();
    }

    /// Reports that the host finished the animation tagged `id`.
    ///
    /// Returns `false` when `id` is stale: it belongs to a transition that was
    /// superseded by a newer toggle, or it was already reported. Stale
    /// completions have no effect.
    pub fn animation_finished(&mut self, id: AnimationId) -> bool {
        let Some(mut transition) = self.transition else {
            tracing::trace!(?id, "no transition in flight; ignoring completion");
            return false;
        };
        if !transition.awaits(id) {
            tracing::trace!(?id, current = ?transition.current_id(), "ignoring stale completion");
            return false;
        }

        match id.phase {
            Phase::Primary => {
                let mut changes = Vec::new();
                if transition.rotates {
                    self.rotation = resting_rotation(transition.target);
                    changes.push(self.trigger_transform_change());
                }
                if !transition.target.is_expanded() {
                    self.detach_layer();
                }
                transition.phase = Phase::Settle;
                self.transition = Some(transition);
                self.commands.push(Command::Animate(Animation {
                    id: Some(transition.current_id()),
                    curve: self.config.timings.settle,
                    changes,
                }));
            }
            Phase::Settle => {
                self.transition = None;
                tracing::debug!(
                    generation = transition.generation,
                    state = ?transition.target,
                    "action menu settled"
                );
            }
        }
        true
    }

    // --- Gestures ---

    /// The trigger was pressed down.
    pub fn trigger_pressed(&mut self) {
        self.pressed = true;
        self.scale = self.config.metrics.pressed_scale;
        self.animate_press();
    }

    /// The trigger was tapped (released inside).
    ///
    /// Restores the press scale, toggles the menu, then runs the direct action
    /// exactly once if one is bound.
    pub fn trigger_released(&mut self) {
        self.pressed = false;
        self.scale = 1.0;
        self.animate_press();
        self.toggle_menu();
        self.run_action();
    }

    /// The press ended outside the trigger; restores the scale without a tap.
    pub fn trigger_cancelled(&mut self) {
        self.pressed = false;
        self.scale = 1.0;
        self.animate_press();
    }

    /// The backdrop was tapped. Collapses an expanded menu.
    ///
    /// Returns `true` if the tap caused a transition.
    pub fn backdrop_tapped(&mut self) -> bool {
        if !self.state.is_expanded() {
            return false;
        }
        self.toggle();
        true
    }

    /// The item at `index` was tapped.
    ///
    /// Runs the item's action with this menu. Items are only tappable while
    /// expanded. Returns `true` if an action ran.
    pub fn item_tapped(&mut self, index: usize) -> bool {
        if !self.state.is_expanded() {
            return false;
        }
        let revision = self.items_revision;
        let Some(mut action) = self.items.get_mut(index).and_then(|item| item.action.take())
        else {
            return false;
        };
        action(self);
        // The action may have replaced the item list; only hand the action back to its own item.
        if self.items_revision == revision
            && let Some(item) = self.items.get_mut(index)
        {
            item.action = Some(action);
        }
        true
    }

    // --- Internals ---

    fn tree(&mut self, op: TreeOp<V>) {
        self.commands.push(Command::Tree(op));
    }

    fn set(&mut self, change: Change<V>) {
        self.commands.push(Command::Set(change));
    }

    fn trigger_transform_change(&self) -> Change<V> {
        Change::Transform {
            view: self.views.trigger,
            transform: self.trigger_transform(),
        }
    }

    fn set_bottom_inset(&mut self, bottom: f64) {
        self.set(Change::ContentInsets {
            view: self.views.trigger,
            insets: Insets::new(0.0, 0.0, 0.0, bottom),
        });
    }

    fn install_trigger(&mut self) {
        let trigger = self.views.trigger;
        let metrics = self.config.metrics;
        self.tree(TreeOp::Append {
            parent: self.parent,
            view: trigger,
        });
        self.set(Change::Frame {
            view: trigger,
            frame: self.trigger_frame(),
        });
        self.set(Change::Chrome {
            view: trigger,
            corner_radius: metrics.trigger_diameter / 2.0,
            shadow: metrics.shadow,
            font_size: metrics.glyph_font_size,
        });
        self.set(Change::Title {
            view: trigger,
            state: ControlState::NORMAL,
            title: String::from(PLUS_GLYPH),
        });
        self.set_bottom_inset(metrics.glyph_inset);
        self.set(Change::Background {
            view: trigger,
            color: self.style.background(),
        });
        self.set(Change::Frame {
            view: self.views.content,
            frame: self.parent_bounds,
        });
        self.set(Change::Frame {
            view: self.views.backdrop,
            frame: self.parent_bounds,
        });
        self.set(Change::Opacity {
            view: self.views.backdrop,
            opacity: 0.0,
        });
    }

    /// Attaches every item to the content layer at the shared resting center.
    fn place_items(&mut self) {
        let center = self.item_center();
        let content = self.views.content;
        for index in 0..self.items.len() {
            let view = self.items[index].view;
            self.set(Change::Center { view, center });
            self.tree(TreeOp::Append {
                parent: content,
                view,
            });
        }
    }

    /// Changes that put items and the content layer into `state`.
    fn visual_changes(&self, state: MenuState) -> Vec<Change<V>> {
        let mut changes = Vec::with_capacity(self.items.len() * 2 + 1);
        changes.push(Change::Opacity {
            view: self.views.content,
            opacity: content_opacity(state),
        });
        let visuals = item_visuals(self.items.len(), state, &self.config.metrics);
        for (item, visual) in self.items.iter().zip(visuals) {
            changes.push(Change::Transform {
                view: item.view,
                transform: Affine::translate(visual.translation),
            });
            changes.push(Change::Opacity {
                view: item.view,
                opacity: visual.opacity,
            });
        }
        changes
    }

    /// Applies the visual of the current state without animation.
    fn show_current(&mut self) {
        let changes = self.visual_changes(self.state);
        self.commands.extend(changes.into_iter().map(Command::Set));
    }

    fn toggle(&mut self) {
        let from = self.state;
        let to = from.toggled();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        // Rotation eligibility is decided by what the trigger shows right now.
        let rotates = self.content.rotates(self.control_state());
        // A superseded transition may have left the glyph at its overshoot angle.
        let overshot = self
            .transition
            .is_some_and(|t| t.rotates && t.phase == Phase::Primary);
        let mut changes = self.visual_changes(to);
        if rotates {
            self.rotation = overshoot_rotation(to);
            changes.push(self.trigger_transform_change());
        } else if overshot {
            self.rotation = resting_rotation(from);
            changes.push(self.trigger_transform_change());
        }
        if from.is_expanded() {
            changes.push(Change::Opacity {
                view: self.views.backdrop,
                opacity: 0.0,
            });
        }
        if to.is_expanded() {
            self.attach_layer();
        }
        self.commands.push(Command::Animate(Animation {
            id: Some(AnimationId::new(generation, Phase::Primary)),
            curve: self.config.timings.primary,
            changes,
        }));

        self.state = to;
        self.transition = Some(Transition {
            generation,
            target: to,
            phase: Phase::Primary,
            rotates,
        });

        if to.is_expanded() {
            self.commands.push(Command::Animate(Animation {
                id: None,
                curve: self.config.timings.backdrop_fade,
                changes: alloc::vec![Change::Opacity {
                    view: self.views.backdrop,
                    opacity: self.config.metrics.backdrop_opacity,
                }],
            }));
        }
        self.set(Change::Background {
            view: self.views.trigger,
            color: self.style.background_for(to.is_expanded()),
        });
        self.set(Change::Selected {
            view: self.views.trigger,
            selected: to.is_expanded(),
        });
        tracing::debug!(generation, state = ?to, "action menu transition started");
    }

    fn attach_layer(&mut self) {
        self.set(Change::Frame {
            view: self.views.backdrop,
            frame: self.parent_bounds,
        });
        self.tree(TreeOp::InsertBelow {
            parent: self.parent,
            view: self.views.content,
            sibling: self.views.trigger,
        });
        self.tree(TreeOp::InsertBelow {
            parent: self.parent,
            view: self.views.backdrop,
            sibling: self.views.content,
        });
        self.layer_attached = true;
    }

    fn detach_layer(&mut self) {
        self.tree(TreeOp::Remove {
            view: self.views.backdrop,
        });
        self.tree(TreeOp::Remove {
            view: self.views.content,
        });
        self.layer_attached = false;
    }

    fn animate_press(&mut self) {
        let change = self.trigger_transform_change();
        self.commands.push(Command::Animate(Animation {
            id: None,
            curve: self.config.timings.press,
            changes: alloc::vec![change],
        }));
    }

    fn run_action(&mut self) {
        let revision = self.action_revision;
        let Some(mut action) = self.action.take() else {
            return;
        };
        action(self);
        // Keep a replacement or removal made by the action itself.
        if self.action_revision == revision {
            self.action = Some(action);
        }
    }
}
