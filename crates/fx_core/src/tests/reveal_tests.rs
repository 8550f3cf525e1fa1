use super::*;

use crate::{
    headless::{portfolio_document, HeadlessHost},
    platform::Dom,
};

fn setup() -> (HeadlessHost, EnhancedScrollReveal) {
    let mut host = HeadlessHost::new(portfolio_document());
    let reveal = EnhancedScrollReveal::new(&mut host.env(), &Settings::default());
    (host, reveal)
}

fn entry(node: NodeId) -> IntersectionEntry {
    IntersectionEntry {
        node,
        is_intersecting: true,
    }
}

#[test]
fn arms_every_rule_match_hidden_in_starting_pose() {
    let (host, reveal) = setup();

    assert_eq!(reveal.records().len(), 21);
    assert!(reveal.records().iter().all(|r| !r.revealed));

    let card = host.dom.find(".profile-card").expect("card");
    assert_eq!(host.dom.style(card, "opacity"), Some("0"));
    assert_eq!(host.dom.style(card, "transform"), Some("translateX(50px)"));
    assert_eq!(host.dom.style(card, "transition"), Some(REVEAL_TRANSITION));
    assert_eq!(host.dom.observers_of(card), vec![ObserverId::ScrollReveal]);
}

#[test]
fn stagger_grows_with_index_within_a_rule() {
    let (host, _reveal) = setup();
    let skills = host.dom.find_all(".skill-item");

    let delays: Vec<_> = skills
        .iter()
        .map(|node| host.dom.style(*node, "transition-delay").map(str::to_string))
        .collect();

    assert_eq!(delays[0].as_deref(), Some("0ms"));
    assert_eq!(delays[1].as_deref(), Some("50ms"));
    assert_eq!(delays[4].as_deref(), Some("200ms"));
    assert_eq!(host.dom.style(skills[0], "transform"), Some("scale(0.8)"));
}

#[test]
fn reveal_sets_final_pose_per_direction() {
    let (mut host, mut reveal) = setup();
    let timeline = host.dom.find(".timeline-item").expect("timeline");
    let hobby = host.dom.find(".hobby-item").expect("hobby");

    reveal.handle_intersection(&mut host.env(), &[entry(timeline), entry(hobby)]);

    assert_eq!(host.dom.style(timeline, "opacity"), Some("1"));
    assert_eq!(host.dom.style(timeline, "transform"), Some("translate(0, 0)"));
    assert_eq!(host.dom.style(hobby, "transform"), Some("scale(1)"));
}

#[test]
fn each_element_reveals_at_most_once() {
    let (mut host, mut reveal) = setup();
    let card = host.dom.find(".project-card").expect("card");

    reveal.handle_intersection(&mut host.env(), &[entry(card)]);
    host.dom.set_style(card, "opacity", "0.5");
    reveal.handle_intersection(&mut host.env(), &[entry(card)]);

    assert_eq!(host.dom.style(card, "opacity"), Some("0.5"));
    let revealed = reveal.records().iter().filter(|r| r.revealed).count();
    assert_eq!(revealed, 1);
}

#[test]
fn non_intersecting_entries_are_ignored() {
    let (mut host, mut reveal) = setup();
    let card = host.dom.find(".project-card").expect("card");

    reveal.handle_intersection(
        &mut host.env(),
        &[IntersectionEntry {
            node: card,
            is_intersecting: false,
        }],
    );

    assert_eq!(host.dom.style(card, "opacity"), Some("0"));
}
