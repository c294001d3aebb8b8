// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for layout and toggling across arbitrary item counts.

use kurbo::{Rect, Vec2};
use peniko::Color;
use proptest::prelude::*;
use understory_action_menu::headless::HeadlessHost;
use understory_action_menu::layout::{item_visual, trigger_frame};
use understory_action_menu::{
    ActionMenu, MenuConfig, MenuItem, MenuMetrics, MenuState, MenuViews,
};

const PARENT: u32 = 0;
const VIEWS: MenuViews<u32> = MenuViews {
    trigger: 1,
    content: 2,
    backdrop: 3,
};
const FIRST_ITEM: u32 = 100;

fn build(count: u32, metrics: MenuMetrics) -> (ActionMenu<u32>, HeadlessHost<u32>) {
    let items = (FIRST_ITEM..FIRST_ITEM + count).map(MenuItem::new).collect();
    let config = MenuConfig {
        metrics,
        ..MenuConfig::default()
    };
    let bounds = Rect::new(0.0, 0.0, 1024.0, 768.0);
    let mut menu = ActionMenu::with_config(PARENT, VIEWS, bounds, items, config);
    let mut host = HeadlessHost::new(PARENT);
    menu.flush(&mut host);
    (menu, host)
}

proptest! {
    #[test]
    fn expanded_items_stack_at_fixed_steps(
        count in 0_u32..40,
        offset in -120.0_f64..-10.0,
        horizontal in -300.0_f64..300.0,
    ) {
        let metrics = MenuMetrics {
            item_offset: offset,
            horizontal_offset: horizontal,
            ..MenuMetrics::default()
        };
        let (mut menu, mut host) = build(count, metrics);
        menu.toggle_menu();
        host.settle(&mut menu);

        let trigger_center = trigger_frame(Rect::new(0.0, 0.0, 1024.0, 768.0), &metrics).center();
        for i in 0..count {
            let view = FIRST_ITEM + i;
            let center = host.center(view).unwrap();
            let translation = host.transform(view).translation();
            prop_assert!((center.x - trigger_center.x - horizontal).abs() < 1e-9);
            prop_assert_eq!(center.y, trigger_center.y);
            prop_assert_eq!(translation, Vec2::new(0.0, f64::from(i + 1) * offset));
            prop_assert_eq!(host.opacity(view), 1.0);
        }
    }

    #[test]
    fn layout_is_a_pure_function_of_index_and_state(index in 0_usize..1000) {
        let metrics = MenuMetrics::default();
        let expanded = item_visual(index, MenuState::Expanded, &metrics);
        prop_assert_eq!(expanded, item_visual(index, MenuState::Expanded, &metrics));
        prop_assert!(expanded.translation.y < 0.0);
        let collapsed = item_visual(index, MenuState::Collapsed, &metrics);
        prop_assert_eq!(collapsed.translation, Vec2::ZERO);
        prop_assert_eq!(collapsed.opacity, 0.0);
    }

    #[test]
    fn layer_attachment_follows_toggle_parity(count in 0_u32..8, toggles in 0_usize..12) {
        let (mut menu, mut host) = build(count, MenuMetrics::default());
        for _ in 0..toggles {
            menu.toggle_menu();
        }
        host.settle(&mut menu);

        let expanded = toggles % 2 == 1;
        prop_assert_eq!(menu.is_active(), expanded);
        prop_assert_eq!(host.is_attached(VIEWS.content), expanded);
        prop_assert_eq!(host.is_attached(VIEWS.backdrop), expanded);
        prop_assert!(!menu.is_transitioning());
    }

    #[test]
    fn background_color_always_resets_selected(r: u8, g: u8, b: u8) {
        let (mut menu, _host) = build(0, MenuMetrics::default());
        menu.set_selected_color(Color::from_rgb8(g, b, r));
        let color = Color::from_rgb8(r, g, b);
        menu.set_background_color(color);
        prop_assert_eq!(menu.style().selected_background().to_rgba8(), color.to_rgba8());
        prop_assert_eq!(menu.style().background().to_rgba8(), color.to_rgba8());
    }
}
