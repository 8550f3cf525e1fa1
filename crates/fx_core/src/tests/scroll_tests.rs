use super::*;

use crate::headless::{fixture::NAVBAR_HEIGHT, portfolio_document, HeadlessHost};

fn setup() -> (HeadlessHost, ScrollManager) {
    let mut host = HeadlessHost::new(portfolio_document());
    let manager = ScrollManager::new(&mut host.env());
    (host, manager)
}

#[test]
fn nav_link_scrolls_below_the_navbar() {
    let (mut host, scroll) = setup();
    let about = host.dom.find(r##".nav-link[href="#about"]"##).expect("link");

    assert!(scroll.handle_click(&mut host.env(), about));

    assert_eq!(
        host.dom.scroll_requests(),
        &[(800.0 - NAVBAR_HEIGHT, ScrollBehavior::Smooth)]
    );
}

#[test]
fn call_to_action_anchor_uses_same_path() {
    let (mut host, scroll) = setup();
    let cta = host.dom.find(".btn-secondary").expect("cta");

    assert!(scroll.handle_click(&mut host.env(), cta));

    assert_eq!(host.dom.scroll_requests().len(), 1);
    assert_eq!(host.dom.scroll_requests()[0].0, 3800.0 - NAVBAR_HEIGHT);
}

#[test]
fn unresolved_target_is_prevented_but_does_not_scroll() {
    let (mut host, scroll) = setup();
    let link = host.dom.find(".project-link").expect("project link");

    assert!(scroll.handle_click(&mut host.env(), link));
    assert!(host.dom.scroll_requests().is_empty());
}

#[test]
fn clicks_elsewhere_are_ignored() {
    let (mut host, scroll) = setup();
    let footer = host.dom.find("footer").expect("footer");

    assert!(!scroll.handle_click(&mut host.env(), footer));
    assert!(host.dom.scroll_requests().is_empty());
}

#[test]
fn bare_hash_is_a_no_op() {
    let mut dom = portfolio_document();
    let body = crate::platform::Dom::body(&dom);
    let top = dom.append_element(body, "a", &[("href", "#")]);
    let mut host = HeadlessHost::new(dom);
    let scroll = ScrollManager::new(&mut host.env());

    assert!(scroll.handle_click(&mut host.env(), top));
    assert!(host.dom.scroll_requests().is_empty());
}
