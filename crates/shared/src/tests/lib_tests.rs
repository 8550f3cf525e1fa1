use crate::{
    domain::{NodeId, ObserverId, RevealDirection, Theme},
    error::{ErrorCode, FxError},
    event::{PageEvent, Task},
};

#[test]
fn theme_parses_and_toggles() {
    assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
    assert_eq!(" dark ".parse::<Theme>(), Ok(Theme::Dark));
    assert!("sepia".parse::<Theme>().is_err());
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    assert_eq!(Theme::default(), Theme::Dark);
}

#[test]
fn reveal_direction_transforms() {
    assert_eq!(RevealDirection::Up.initial_transform(), "translateY(50px)");
    assert_eq!(RevealDirection::Right.initial_transform(), "translateX(50px)");
    assert_eq!(RevealDirection::Scale.revealed_transform(), "scale(1)");
    assert_eq!(RevealDirection::Left.revealed_transform(), "translate(0, 0)");
}

#[test]
fn page_events_use_tagged_snake_case_encoding() {
    let event = PageEvent::Click { target: NodeId(4) };
    let json = serde_json::to_value(&event).expect("encode");
    assert_eq!(json["type"], "click");
    assert_eq!(json["payload"]["target"], 4);

    let decoded: PageEvent = serde_json::from_str(
        r#"{"type":"intersection","payload":{"observer":"stats_counter","entries":[{"node":2,"is_intersecting":true}]}}"#,
    )
    .expect("decode");
    match decoded {
        PageEvent::Intersection { observer, entries } => {
            assert_eq!(observer, ObserverId::StatsCounter);
            assert_eq!(entries.len(), 1);
            assert!(entries[0].is_intersecting);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn pointer_out_omits_missing_related_target() {
    let json = serde_json::to_string(&PageEvent::PointerOut {
        target: NodeId(1),
        related: None,
    })
    .expect("encode");
    assert!(!json.contains("related"));
}

#[test]
fn tasks_round_trip_through_json() {
    let task = Task::CounterTick { node: NodeId(9) };
    let raw = serde_json::to_string(&task).expect("encode");
    assert_eq!(raw, r#"{"type":"counter_tick","payload":{"node":9}}"#);
}

#[test]
fn unknown_theme_names_the_value() {
    let err = "sepia".parse::<Theme>().expect_err("unknown");
    assert_eq!(err.to_string(), "unknown theme 'sepia'");
}

#[test]
fn errors_carry_codes() {
    let err = FxError::invalid_selector("a[", "unterminated attribute");
    assert_eq!(err.code(), ErrorCode::InvalidSelector);
    assert!(err.to_string().contains("a["));
    assert_eq!(FxError::Platform("setTimeout".into()).code(), ErrorCode::Platform);
}
