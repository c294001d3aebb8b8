// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger appearance: colors, visibility and per-state title/image content.
//!
//! Titles and images are keyed by [`ControlState`], the way platform buttons
//! store one value per interaction state. Lookups for a state without its own
//! entry fall back to the [`ControlState::NORMAL`] entry.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

bitflags::bitflags! {
    /// Interaction state of the trigger, used to key titles and images.
    ///
    /// The empty set is the normal state; see [`ControlState::NORMAL`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ControlState: u8 {
        /// The trigger is being pressed.
        const HIGHLIGHTED = 0b0000_0001;
        /// The trigger does not accept input.
        const DISABLED    = 0b0000_0010;
        /// The menu is expanded.
        const SELECTED    = 0b0000_0100;
    }
}

impl ControlState {
    /// The resting state with no flags set.
    pub const NORMAL: Self = Self::empty();
}

impl Default for ControlState {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Opaque handle to a host-owned image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// The glyph shown by a fresh trigger.
pub const PLUS_GLYPH: &str = "+";

/// Default trigger background, a warm orange.
#[must_use]
pub fn default_background() -> Color {
    Color::from_rgb8(238, 130, 34)
}

/// Titles and images of the trigger for each [`ControlState`].
#[derive(Clone, Debug, Default)]
pub struct TriggerContent {
    titles: Vec<(ControlState, String)>,
    images: Vec<(ControlState, ImageId)>,
}

impl TriggerContent {
    /// Content showing [`PLUS_GLYPH`] in the normal state and no image.
    #[must_use]
    pub fn plus() -> Self {
        let mut content = Self::default();
        content.set_title(ControlState::NORMAL, String::from(PLUS_GLYPH));
        content
    }

    /// Stores `title` for `state`, replacing any previous title for that state.
    pub fn set_title(&mut self, state: ControlState, title: String) {
        if let Some(slot) = self.titles.iter_mut().find(|(s, _)| *s == state) {
            slot.1 = title;
        } else {
            self.titles.push((state, title));
        }
    }

    /// Stores `image` for `state`, replacing any previous image for that state.
    pub fn set_image(&mut self, state: ControlState, image: ImageId) {
        if let Some(slot) = self.images.iter_mut().find(|(s, _)| *s == state) {
            slot.1 = image;
        } else {
            self.images.push((state, image));
        }
    }

    /// Title explicitly stored for `state`, without fallback.
    #[must_use]
    pub fn title_for(&self, state: ControlState) -> Option<&str> {
        self.titles
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, t)| t.as_str())
    }

    /// Image explicitly stored for `state`, without fallback.
    #[must_use]
    pub fn image_for(&self, state: ControlState) -> Option<ImageId> {
        self.images
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, i)| *i)
    }

    /// Title displayed in `state`, falling back to the normal title.
    #[must_use]
    pub fn current_title(&self, state: ControlState) -> Option<&str> {
        self.title_for(state)
            .or_else(|| self.title_for(ControlState::NORMAL))
    }

    /// Image displayed in `state`, falling back to the normal image.
    #[must_use]
    pub fn current_image(&self, state: ControlState) -> Option<ImageId> {
        self.image_for(state)
            .or_else(|| self.image_for(ControlState::NORMAL))
    }

    /// Returns `true` if the trigger displays a bare `+` glyph in `state`.
    ///
    /// Only such triggers rotate while the menu expands or collapses.
    #[must_use]
    pub fn rotates(&self, state: ControlState) -> bool {
        self.current_title(state) == Some(PLUS_GLYPH) && self.current_image(state).is_none()
    }
}

/// Colors and visibility of the trigger.
#[derive(Copy, Clone, Debug)]
pub struct TriggerStyle {
    background: Color,
    selected_background: Color,
    hidden: bool,
}

impl Default for TriggerStyle {
    fn default() -> Self {
        let background = default_background();
        Self {
            background,
            selected_background: background,
            hidden: false,
        }
    }
}

impl TriggerStyle {
    /// Background while collapsed.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Background while expanded.
    #[must_use]
    pub fn selected_background(&self) -> Color {
        self.selected_background
    }

    /// Whether the trigger is hidden.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Sets the collapsed background and resets the expanded background to match.
    ///
    /// Call [`TriggerStyle::set_selected_background`] afterwards to give the
    /// expanded state its own color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.selected_background = color;
    }

    /// Sets the expanded background only.
    pub fn set_selected_background(&mut self, color: Color) {
        self.selected_background = color;
    }

    /// Sets trigger visibility.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Background to display for the given expansion.
    #[must_use]
    pub fn background_for(&self, expanded: bool) -> Color {
        if expanded {
            self.selected_background
        } else {
            self.background
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_content_rotates() {
        let content = TriggerContent::plus();
        assert_eq!(content.current_title(ControlState::NORMAL), Some("+"));
        assert!(content.rotates(ControlState::NORMAL));
        // Falls back to the normal title when selected.
        assert!(content.rotates(ControlState::SELECTED));
    }

    #[test]
    fn image_stops_rotation() {
        let mut content = TriggerContent::plus();
        content.set_image(ControlState::NORMAL, ImageId(7));
        assert!(!content.rotates(ControlState::NORMAL));
        assert_eq!(content.current_image(ControlState::HIGHLIGHTED), Some(ImageId(7)));
    }

    #[test]
    fn custom_title_stops_rotation_only_where_it_applies() {
        let mut content = TriggerContent::plus();
        content.set_title(ControlState::SELECTED, String::from("x"));
        assert!(content.rotates(ControlState::NORMAL));
        assert!(!content.rotates(ControlState::SELECTED));
    }

    #[test]
    fn set_title_replaces_per_state() {
        let mut content = TriggerContent::plus();
        content.set_title(ControlState::NORMAL, String::from("Go"));
        assert_eq!(content.title_for(ControlState::NORMAL), Some("Go"));
        assert_eq!(content.title_for(ControlState::HIGHLIGHTED), None);
    }

    #[test]
    fn background_resets_selected() {
        let mut style = TriggerStyle::default();
        let blue = Color::from_rgb8(0, 0, 255);
        let red = Color::from_rgb8(255, 0, 0);

        style.set_selected_background(blue);
        style.set_background(red);
        assert_eq!(style.selected_background().to_rgba8(), red.to_rgba8());

        style.set_selected_background(blue);
        assert_eq!(style.background().to_rgba8(), red.to_rgba8());
        assert_eq!(style.background_for(true).to_rgba8(), blue.to_rgba8());
        assert_eq!(style.background_for(false).to_rgba8(), red.to_rgba8());
    }
}
