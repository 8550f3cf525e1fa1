use super::*;

use crate::headless::{portfolio_document, HeadlessHost};

fn setup() -> (HeadlessHost, CursorEffect) {
    let mut host = HeadlessHost::new(portfolio_document());
    let cursor = CursorEffect::new(&mut host.env(), &Settings::default()).expect("pointer device");
    (host, cursor)
}

#[test]
fn touch_devices_get_no_cursor() {
    let mut dom = portfolio_document();
    dom.set_touch_capable(true);
    let mut host = HeadlessHost::new(dom);

    assert!(CursorEffect::new(&mut host.env(), &Settings::default()).is_none());
    assert!(host.dom.find(".custom-cursor").is_none());
    assert_eq!(host.scheduler.pending(), 0);
}

#[test]
fn creates_dot_and_follower() {
    let (host, cursor) = setup();

    assert_eq!(host.dom.find(".custom-cursor"), Some(cursor.dot()));
    assert_eq!(host.dom.find(".cursor-follower"), Some(cursor.follower()));
    assert_eq!(host.dom.style(cursor.dot(), "width"), Some("8px"));
    assert_eq!(host.dom.style(cursor.follower(), "opacity"), Some("0.5"));
    assert_eq!(host.dom.style(cursor.follower(), "left"), Some("-15px"));
    assert_eq!(host.scheduler.pending(), 1);
}

#[test]
fn dot_tracks_pointer_exactly() {
    let (mut host, mut cursor) = setup();

    cursor.handle_pointer_move(&mut host.env(), 200.0, 100.0);

    assert_eq!(host.dom.style(cursor.dot(), "left"), Some("196px"));
    assert_eq!(host.dom.style(cursor.dot(), "top"), Some("96px"));
}

#[test]
fn follower_eases_a_tenth_of_the_way_each_frame() {
    let (mut host, mut cursor) = setup();
    cursor.handle_pointer_move(&mut host.env(), 200.0, 100.0);

    cursor.animate(&mut host.env());
    assert_eq!(host.dom.style(cursor.follower(), "left"), Some("5px"));
    assert_eq!(host.dom.style(cursor.follower(), "top"), Some("-5px"));

    for _ in 0..200 {
        cursor.animate(&mut host.env());
    }
    let trailing = cursor.trailing();
    assert!((trailing.x - 200.0).abs() < 0.01);
    assert!((trailing.y - 100.0).abs() < 0.01);
}

#[test]
fn hover_enlarges_and_leaving_restores() {
    let (mut host, mut cursor) = setup();
    let card = host.dom.find(".project-card").expect("card");
    let image = host.dom.find(".project-card img").expect("image");
    let footer = host.dom.find("footer").expect("footer");

    cursor.handle_pointer_over(&mut host.env(), image);
    assert_eq!(host.dom.style(cursor.dot(), "transform"), Some("scale(1.5)"));
    assert_eq!(host.dom.style(cursor.follower(), "opacity"), Some("0.2"));

    // Moving between children of the card keeps the hover.
    cursor.handle_pointer_out(&mut host.env(), image, Some(card));
    assert_eq!(host.dom.style(cursor.dot(), "transform"), Some("scale(1.5)"));

    cursor.handle_pointer_out(&mut host.env(), card, Some(footer));
    assert_eq!(host.dom.style(cursor.dot(), "transform"), Some("scale(1)"));
    assert_eq!(host.dom.style(cursor.follower(), "transform"), Some("scale(1)"));
    assert_eq!(host.dom.style(cursor.follower(), "opacity"), Some("0.5"));
}

#[test]
fn non_interactive_hover_is_ignored() {
    let (mut host, mut cursor) = setup();
    let footer = host.dom.find("footer").expect("footer");

    cursor.handle_pointer_over(&mut host.env(), footer);

    assert_eq!(host.dom.style(cursor.dot(), "transform"), None);
}

#[test]
fn window_leave_hides_and_enter_restores() {
    let (mut host, mut cursor) = setup();

    cursor.handle_leave_window(&mut host.env());
    assert_eq!(host.dom.style(cursor.dot(), "opacity"), Some("0"));
    assert_eq!(host.dom.style(cursor.follower(), "opacity"), Some("0"));

    cursor.handle_enter_window(&mut host.env());
    assert_eq!(host.dom.style(cursor.dot(), "opacity"), Some("1"));
    assert_eq!(host.dom.style(cursor.follower(), "opacity"), Some("0.5"));
}

#[test]
fn stop_ends_frame_loop() {
    let (mut host, mut cursor) = setup();
    cursor.stop(&mut host.env());
    assert_eq!(host.scheduler.pending(), 0);
}
