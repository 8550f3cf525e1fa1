use super::*;

use std::time::Duration;

use shared::{
    domain::{ObserverId, ObserverOptions, TaskHandle},
    error::ErrorCode,
    event::Task,
};

use crate::platform::{Dom, Scheduler};
use selector::SelectorList;

#[test]
fn selector_list_parses_compounds_and_combinators() {
    let list = SelectorList::parse(r##".about-content > *, a[href^="#"], #theme-toggle i"##)
        .expect("parse");
    assert_eq!(list.selectors.len(), 3);
    assert_eq!(list.selectors[0].parts.len(), 2);
    assert_eq!(list.selectors[0].parts[1].0, selector::Combinator::Child);
    assert_eq!(list.selectors[2].parts[1].0, selector::Combinator::Descendant);
}

#[test]
fn malformed_selectors_report_invalid_selector() {
    for raw in ["", "a >", ".", "[href", "a[href~=x]", "a,,b", "a,", r#"a[title="x,y]"#] {
        let err = SelectorList::parse(raw).expect_err(raw);
        assert_eq!(err.code(), ErrorCode::InvalidSelector, "{raw}");
    }
}

#[test]
fn comma_inside_quoted_value_does_not_split_the_list() {
    let list = SelectorList::parse(r#"a[title="a,b"], .x"#).expect("parse");
    assert_eq!(list.selectors.len(), 2);
    assert_eq!(
        list.selectors[0].parts[0].1.attributes,
        vec![selector::AttributeMatch::Equals("title".into(), "a,b".into())]
    );

    let mut dom = portfolio_document();
    let body = dom.body();
    let tagged = dom.append_element(body, "a", &[("title", "a,b")]);
    let other = dom.append_element(body, "a", &[("title", "a")]);
    let found = dom.find_all(r#"a[title="a,b"]"#);
    assert_eq!(found, vec![tagged]);
    assert!(!found.contains(&other));
}

#[test]
fn fixture_matches_expected_selectors() {
    let dom = portfolio_document();

    assert_eq!(dom.find_all(".hamburger .bar").len(), 3);
    assert_eq!(dom.find_all(".nav-link").len(), 6);
    assert_eq!(dom.find_all("section").len(), 6);
    assert_eq!(dom.find_all(".stat h3").len(), 3);
    assert_eq!(dom.find_all(".hero-text > *").len(), 4);
    assert_eq!(dom.find_all(r##"a[href^="#"]"##).len(), 12);
    assert!(dom.find(".hero-subtitle").is_some());
    assert!(dom.find(".contact-form").is_some());
}

#[test]
fn child_combinator_does_not_match_grandchildren() {
    let dom = portfolio_document();
    let direct = dom.find_all(".about-content > *");
    let nested = dom.find_all(".about-content *");

    assert_eq!(direct.len(), 3);
    assert!(nested.len() > direct.len());
}

#[test]
fn invalid_selector_matches_nothing() {
    let mut dom = portfolio_document();
    assert!(dom.query("a[").is_none());
    assert!(dom.query_all("").is_empty());
}

#[test]
fn class_attribute_and_class_list_agree() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let node = dom.append_element(body, "div", &[("class", "a b")]);

    dom.add_class(node, "c");
    dom.remove_class(node, "a");

    assert_eq!(dom.attribute(node, "class").as_deref(), Some("b c"));
    assert_eq!(dom.find(".b.c"), Some(node));
}

#[test]
fn text_concatenates_and_set_text_replaces_children() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let parent = dom.append_text_element(body, "p", &[], "a");
    dom.append_text_element(parent, "span", &[], "b");

    assert_eq!(dom.text(parent), "ab");

    dom.set_text(parent, "z");
    assert_eq!(dom.text(parent), "z");
    assert!(dom.children(parent).is_empty());
}

#[test]
fn removed_nodes_are_detached_and_unqueryable() {
    let mut dom = portfolio_document();
    let footer = dom.find("footer").expect("footer");

    dom.remove(footer);

    assert!(!dom.is_attached(footer));
    assert!(dom.find("footer").is_none());
}

#[test]
fn closest_walks_up_including_self() {
    let mut dom = portfolio_document();
    let bar = dom.find(".bar").expect("bar");
    let hamburger = dom.find(".hamburger").expect("hamburger");

    assert_eq!(dom.closest(bar, ".hamburger"), Some(hamburger));
    assert_eq!(dom.closest(hamburger, ".hamburger"), Some(hamburger));
    assert_eq!(dom.closest(bar, ".contact-form"), None);
    assert!(dom.contains(hamburger, bar));
    assert!(!dom.contains(bar, hamburger));
}

#[test]
fn observe_is_idempotent_per_observer() {
    let mut dom = portfolio_document();
    let card = dom.find(".project-card").expect("card");
    let options = ObserverOptions {
        threshold: 0.1,
        root_margin: "0px".into(),
    };

    dom.observe(ObserverId::FadeIn, &options, card);
    dom.observe(ObserverId::FadeIn, &options, card);
    dom.observe(ObserverId::ScrollReveal, &options, card);
    assert_eq!(dom.observations().len(), 2);

    dom.unobserve(ObserverId::FadeIn, card);
    assert_eq!(dom.observers_of(card), vec![ObserverId::ScrollReveal]);
}

#[test]
fn scheduler_runs_in_due_then_submission_order() {
    let mut scheduler = VirtualScheduler::new();
    scheduler.schedule(Duration::from_millis(20), Task::TypeTick);
    scheduler.schedule(Duration::from_millis(10), Task::ParticleFrame);
    scheduler.schedule(Duration::from_millis(10), Task::CursorFrame);

    let deadline = Duration::from_millis(100);
    let order: Vec<Task> = std::iter::from_fn(|| scheduler.pop_due(deadline).map(|(_, t)| t)).collect();

    assert_eq!(order, vec![Task::ParticleFrame, Task::CursorFrame, Task::TypeTick]);
    assert_eq!(scheduler.now(), Duration::from_millis(20));
}

#[test]
fn cancelled_and_unknown_handles_are_no_ops() {
    let mut scheduler = VirtualScheduler::new();
    let handle = scheduler.schedule(Duration::from_millis(5), Task::TypeTick);

    scheduler.cancel(handle);
    scheduler.cancel(handle);
    scheduler.cancel(TaskHandle(999));

    assert!(!scheduler.is_pending(handle));
    assert!(scheduler.pop_due(Duration::from_secs(1)).is_none());
}

#[test]
fn frames_are_one_interval_out() {
    let mut scheduler = VirtualScheduler::new();
    scheduler.request_frame(Task::ParticleFrame);

    assert!(scheduler.pop_due(scheduler::FRAME_INTERVAL - Duration::from_millis(1)).is_none());
    assert!(scheduler.pop_due(scheduler::FRAME_INTERVAL).is_some());
}

#[test]
fn headless_page_reveal_notifies_each_watching_observer() {
    let mut page = HeadlessPage::new(portfolio_document(), crate::Settings::default());
    page.boot();
    page.advance_ms(100);
    let card = page.dom().find(".project-card").expect("card");

    page.reveal(card);

    assert!(page.dom().has_class(card, crate::animation::FADE_IN_CLASS));
    assert_eq!(page.dom().style(card, "opacity"), Some("1"));
}
