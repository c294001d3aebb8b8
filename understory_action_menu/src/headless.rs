// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory host for tests, tools and headless embedding.
//!
//! [`HeadlessHost`] keeps a minimal view tree and per-view properties. Animated
//! changes jump straight to their target values; tracked animation ids are
//! queued until the caller completes them with [`HeadlessHost::complete_next`]
//! or [`HeadlessHost::settle`]. This makes transition ordering fully
//! deterministic.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_action_menu::{ActionMenu, MenuItem, MenuViews};
//! use understory_action_menu::headless::HeadlessHost;
//!
//! let views = MenuViews { trigger: 1_u32, content: 2, backdrop: 3 };
//! let items = vec![MenuItem::new(10), MenuItem::new(11)];
//! let mut menu = ActionMenu::new(0, views, Rect::new(0.0, 0.0, 320.0, 480.0), items);
//! let mut host = HeadlessHost::new(0);
//! menu.flush(&mut host);
//!
//! menu.toggle_menu();
//! host.settle(&mut menu);
//! assert!(menu.is_active());
//! assert!(host.is_attached(2));
//!
//! menu.toggle_menu();
//! host.settle(&mut menu);
//! assert!(!host.is_attached(2));
//! assert!(!host.is_attached(3));
//! ```

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Affine, Insets, Point, Rect};
use peniko::Color;

use crate::command::{Change, Command, MenuHost, TreeOp};
use crate::menu::ActionMenu;
use crate::state::AnimationId;
use crate::style::{ControlState, ImageId};

#[derive(Clone, Debug)]
struct Node<V> {
    parent: Option<V>,
    children: Vec<V>,
    frame: Option<Rect>,
    center: Option<Point>,
    transform: Affine,
    opacity: f64,
    hidden: bool,
    selected: bool,
    background: Option<Color>,
    titles: Vec<(ControlState, String)>,
    images: Vec<(ControlState, ImageId)>,
    insets: Insets,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            frame: None,
            center: None,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            hidden: false,
            selected: false,
            background: None,
            titles: Vec::new(),
            images: Vec::new(),
            insets: Insets::ZERO,
        }
    }
}

/// An in-memory view tree that applies menu commands.
#[derive(Clone, Debug)]
pub struct HeadlessHost<V> {
    root: V,
    nodes: HashMap<V, Node<V>>,
    pending: VecDeque<AnimationId>,
    applied: usize,
}

impl<V> HeadlessHost<V>
where
    V: Copy + Eq + Hash + Debug,
{
    /// Creates a host whose tree is rooted at `root`.
    ///
    /// Views count as attached when their parent chain reaches `root`.
    pub fn new(root: V) -> Self {
        Self {
            root,
            nodes: HashMap::new(),
            pending: VecDeque::new(),
            applied: 0,
        }
    }

    /// The root view.
    #[must_use]
    pub fn root(&self) -> V {
        self.root
    }

    /// Returns `true` if `view` is connected to the root.
    #[must_use]
    pub fn is_attached(&self, view: V) -> bool {
        let mut current = view;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Direct parent of `view`.
    #[must_use]
    pub fn parent(&self, view: V) -> Option<V> {
        self.nodes.get(&view).and_then(|n| n.parent)
    }

    /// Children of `view`, bottom-most first.
    #[must_use]
    pub fn children(&self, view: V) -> &[V] {
        self.nodes
            .get(&view)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    /// Current transform of `view`; identity if never set.
    #[must_use]
    pub fn transform(&self, view: V) -> Affine {
        self.nodes.get(&view).map_or(Affine::IDENTITY, |n| n.transform)
    }

    /// Current opacity of `view`; `1.0` if never set.
    #[must_use]
    pub fn opacity(&self, view: V) -> f64 {
        self.nodes.get(&view).map_or(1.0, |n| n.opacity)
    }

    /// Frame of `view`, if set.
    #[must_use]
    pub fn frame(&self, view: V) -> Option<Rect> {
        self.nodes.get(&view).and_then(|n| n.frame)
    }

    /// Center of `view`, if set.
    #[must_use]
    pub fn center(&self, view: V) -> Option<Point> {
        self.nodes.get(&view).and_then(|n| n.center)
    }

    /// Whether `view` is hidden.
    #[must_use]
    pub fn is_hidden(&self, view: V) -> bool {
        self.nodes.get(&view).is_some_and(|n| n.hidden)
    }

    /// Whether `view` is marked selected.
    #[must_use]
    pub fn is_selected(&self, view: V) -> bool {
        self.nodes.get(&view).is_some_and(|n| n.selected)
    }

    /// Background of `view`, if set.
    #[must_use]
    pub fn background(&self, view: V) -> Option<Color> {
        self.nodes.get(&view).and_then(|n| n.background)
    }

    /// Title of `view` stored for exactly `state`.
    #[must_use]
    pub fn title(&self, view: V, state: ControlState) -> Option<&str> {
        self.nodes.get(&view).and_then(|n| {
            n.titles
                .iter()
                .find(|(s, _)| *s == state)
                .map(|(_, t)| t.as_str())
        })
    }

    /// Image of `view` stored for exactly `state`.
    #[must_use]
    pub fn image(&self, view: V, state: ControlState) -> Option<ImageId> {
        self.nodes.get(&view).and_then(|n| {
            n.images
                .iter()
                .find(|(s, _)| *s == state)
                .map(|(_, i)| *i)
        })
    }

    /// Content insets of `view`.
    #[must_use]
    pub fn insets(&self, view: V) -> Insets {
        self.nodes.get(&view).map_or(Insets::ZERO, |n| n.insets)
    }

    /// Tracked animations waiting for completion, oldest first.
    pub fn pending_animations(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.pending.iter().copied()
    }

    /// Removes and returns all pending completions without delivering them.
    ///
    /// Useful to deliver completions late or out of order.
    pub fn take_pending(&mut self) -> Vec<AnimationId> {
        self.pending.drain(..).collect()
    }

    /// Total number of commands applied.
    #[must_use]
    pub fn applied_commands(&self) -> usize {
        self.applied
    }

    /// Delivers the oldest pending completion to `menu` and applies the
    /// commands it produces.
    pub fn complete_next(&mut self, menu: &mut ActionMenu<V>) -> Option<AnimationId> {
        let id = self.pending.pop_front()?;
        menu.animation_finished(id);
        menu.flush(&mut *self);
        Some(id)
    }

    /// Flushes `menu` and completes animations until none are pending.
    ///
    /// Returns the number of completions delivered.
    pub fn settle(&mut self, menu: &mut ActionMenu<V>) -> usize {
        menu.flush(&mut *self);
        let mut delivered = 0;
        while self.complete_next(menu).is_some() {
            delivered += 1;
        }
        delivered
    }

    fn node_mut(&mut self, view: V) -> &mut Node<V> {
        self.nodes.entry(view).or_default()
    }

    fn detach(&mut self, view: V) {
        let Some(parent) = self.nodes.get_mut(&view).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != view);
        }
    }

    fn apply_tree(&mut self, op: TreeOp<V>) {
        match op {
            TreeOp::Append { parent, view } => {
                self.detach(view);
                self.node_mut(parent).children.push(view);
                self.node_mut(view).parent = Some(parent);
            }
            TreeOp::InsertBelow {
                parent,
                view,
                sibling,
            } => {
                self.detach(view);
                let siblings = &mut self.node_mut(parent).children;
                match siblings.iter().position(|c| *c == sibling) {
                    Some(at) => siblings.insert(at, view),
                    None => {
                        tracing::warn!(
                            ?view,
                            ?sibling,
                            "sibling is not a child of parent; appending on top"
                        );
                        siblings.push(view);
                    }
                }
                self.node_mut(view).parent = Some(parent);
            }
            TreeOp::Remove { view } => self.detach(view),
        }
    }

    fn apply_change(&mut self, change: Change<V>) {
        let node = self.node_mut(change.view());
        match change {
            Change::Frame { frame, .. } => node.frame = Some(frame),
            Change::Center { center, .. } => node.center = Some(center),
            Change::Transform { transform, .. } => node.transform = transform,
            Change::Opacity { opacity, .. } => node.opacity = opacity,
            Change::Background { color, .. } => node.background = Some(color),
            Change::Hidden { hidden, .. } => node.hidden = hidden,
            Change::Selected { selected, .. } => node.selected = selected,
            Change::Title { state, title, .. } => {
                node.titles.retain(|(s, _)| *s != state);
                node.titles.push((state, title));
            }
            Change::Image { state, image, .. } => {
                node.images.retain(|(s, _)| *s != state);
                node.images.push((state, image));
            }
            Change::ContentInsets { insets, .. } => node.insets = insets,
            Change::Chrome { .. } => {}
        }
    }
}

impl<V> MenuHost<V> for HeadlessHost<V>
where
    V: Copy + Eq + Hash + Debug,
{
    fn apply(&mut self, command: Command<V>) {
        self.applied += 1;
        match command {
            Command::Tree(op) => self.apply_tree(op),
            Command::Set(change) => self.apply_change(change),
            Command::Animate(animation) => {
                for change in animation.changes {
                    self.apply_change(change);
                }
                if let Some(id) = animation.id {
                    self.pending.push_back(id);
                }
            }
        }
    }
}
