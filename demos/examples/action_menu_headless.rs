// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of an action menu.
//!
//! Builds a menu with three items, expands it with a simulated tap, taps an
//! item, and collapses through the backdrop, printing the host-side view tree
//! after each step.
//!
//! Run:
//! - `RUST_LOG=understory_action_menu=trace cargo run -p understory_action_menu_demos --example action_menu_headless`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use peniko::Color;
use tracing_subscriber::EnvFilter;
use understory_action_menu::headless::HeadlessHost;
use understory_action_menu::{ActionMenu, ControlState, MenuItem, MenuViews};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum View {
    Window,
    Trigger,
    Content,
    Backdrop,
    Item(u8),
}

fn dump(label: &str, menu: &ActionMenu<View>, host: &HeadlessHost<View>) {
    println!("== {label}");
    println!("  state: {:?}, transitioning: {}", menu.state(), menu.is_transitioning());
    println!("  window children: {:?}", host.children(View::Window));
    for item in menu.items() {
        let view = item.view();
        println!(
            "  {view:?}: attached={} offset={:?} opacity={}",
            host.is_attached(view),
            host.transform(view).translation(),
            host.opacity(view),
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let log = Rc::new(RefCell::new(Vec::new()));
    let items = ["Compose", "Photo", "Link"]
        .into_iter()
        .zip(0_u8..)
        .map(|(name, i)| {
            let log = log.clone();
            let view = View::Item(i);
            MenuItem::with_action(view, move |menu: &mut ActionMenu<View>| {
                log.borrow_mut().push(name);
                menu.toggle_menu();
            })
        })
        .collect();

    let views = MenuViews {
        trigger: View::Trigger,
        content: View::Content,
        backdrop: View::Backdrop,
    };
    let mut menu = ActionMenu::new(View::Window, views, Rect::new(0.0, 0.0, 390.0, 844.0), items);
    menu.set_background_color(Color::from_rgb8(30, 110, 220))
        .set_selected_color(Color::from_rgb8(200, 40, 60))
        .set_title(None, ControlState::SELECTED);

    let mut host = HeadlessHost::new(View::Window);
    menu.flush(&mut host);
    dump("initial", &menu, &host);

    menu.trigger_pressed();
    menu.trigger_released();
    menu.flush(&mut host);
    dump("tapped, animations in flight", &menu, &host);

    host.settle(&mut menu);
    dump("expanded", &menu, &host);

    menu.item_tapped(1);
    host.settle(&mut menu);
    dump("after item tap", &menu, &host);

    menu.toggle_menu();
    host.settle(&mut menu);
    menu.backdrop_tapped();
    host.settle(&mut menu);
    dump("collapsed through backdrop", &menu, &host);

    println!("item actions run: {:?}", log.borrow());
    println!("commands applied: {}", host.applied_commands());
}
