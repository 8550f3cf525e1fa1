use super::*;

use crate::headless::{portfolio_document, HeadlessHost};

#[test]
fn observes_every_fade_in_target_with_reveal_options() {
    let mut host = HeadlessHost::new(portfolio_document());
    let manager = AnimationManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.observed(), 12);
    let observation = &host.dom.observations()[0];
    assert_eq!(observation.observer, ObserverId::FadeIn);
    assert_eq!(observation.options.threshold, 0.1);
    assert_eq!(observation.options.root_margin, "0px 0px -50px 0px");
}

#[test]
fn intersecting_entries_fade_in_and_stay_observed() {
    let mut host = HeadlessHost::new(portfolio_document());
    let mut manager = AnimationManager::new(&mut host.env(), &Settings::default());
    let card = host.dom.find(".project-card").expect("card");
    let category = host.dom.find(".skill-category").expect("category");

    manager.handle_intersection(
        &mut host.env(),
        &[
            IntersectionEntry { node: card, is_intersecting: true },
            IntersectionEntry { node: category, is_intersecting: false },
        ],
    );

    assert!(host.dom.has_class(card, FADE_IN_CLASS));
    assert!(!host.dom.has_class(category, FADE_IN_CLASS));
    assert_eq!(host.dom.observers_of(card), vec![ObserverId::FadeIn]);

    manager.handle_intersection(
        &mut host.env(),
        &[IntersectionEntry { node: card, is_intersecting: true }],
    );
    assert_eq!(
        host.dom.classes(card).iter().filter(|c| *c == FADE_IN_CLASS).count(),
        1
    );
}

#[test]
fn parallax_speed_grows_per_shape() {
    assert_eq!(parallax_transform(0, 100.0), "translateY(-50px) rotate(10deg)");
    assert_eq!(parallax_transform(2, 0.0), "translateY(0px) rotate(0deg)");
    assert!(parallax_speed(2) > parallax_speed(1));
}

#[test]
fn scroll_moves_every_shape() {
    let mut host = HeadlessHost::new(portfolio_document());
    let mut manager = AnimationManager::new(&mut host.env(), &Settings::default());

    manager.handle_scroll(&mut host.env(), 100.0);

    let shapes = host.dom.find_all(PARALLAX_SHAPES);
    assert_eq!(shapes.len(), 3);
    assert_eq!(
        host.dom.style(shapes[0], "transform"),
        Some("translateY(-50px) rotate(10deg)")
    );
    assert!(shapes
        .iter()
        .all(|shape| host.dom.style(*shape, "transform").is_some()));
}
