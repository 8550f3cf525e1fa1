use super::*;

use storage::{MemoryPreferences, PreferenceStore};

use crate::{
    headless::{portfolio_document, HeadlessHost},
    platform::Dom,
};

fn root_theme<P>(host: &HeadlessHost<P>) -> Option<String> {
    host.dom.attribute(host.dom.document_element(), THEME_ATTRIBUTE)
}

fn icon_classes<P>(host: &HeadlessHost<P>) -> Vec<String> {
    let icon = host.dom.find("#theme-toggle i").expect("toggle icon");
    host.dom.classes(icon)
}

#[test]
fn defaults_to_dark_when_nothing_is_persisted() {
    let mut host = HeadlessHost::new(portfolio_document());
    let manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.theme(), Theme::Dark);
    assert_eq!(root_theme(&host).as_deref(), Some("dark"));
    assert_eq!(host.prefs.get("theme").expect("get").as_deref(), Some("dark"));
    assert_eq!(icon_classes(&host), vec!["fas", "fa-sun"]);
}

#[test]
fn restores_persisted_light_theme() {
    let prefs = MemoryPreferences::with_value("theme", "light");
    let mut host = HeadlessHost::with_prefs(portfolio_document(), prefs, 1);
    let manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.theme(), Theme::Light);
    assert_eq!(root_theme(&host).as_deref(), Some("light"));
    assert_eq!(icon_classes(&host), vec!["fas", "fa-moon"]);
}

#[test]
fn toggling_twice_restores_theme_and_persisted_value() {
    let mut host = HeadlessHost::new(portfolio_document());
    let mut manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.toggle_theme(&mut host.env()), Theme::Light);
    assert_eq!(host.prefs.get("theme").expect("get").as_deref(), Some("light"));
    assert_eq!(root_theme(&host).as_deref(), Some("light"));

    assert_eq!(manager.toggle_theme(&mut host.env()), Theme::Dark);
    assert_eq!(host.prefs.get("theme").expect("get").as_deref(), Some("dark"));
    assert_eq!(root_theme(&host).as_deref(), Some("dark"));
    assert_eq!(icon_classes(&host), vec!["fas", "fa-sun"]);
}

#[test]
fn click_inside_toggle_flips_theme() {
    let mut host = HeadlessHost::new(portfolio_document());
    let mut manager = ThemeManager::new(&mut host.env(), &Settings::default());
    let icon = host.dom.find("#theme-toggle i").expect("icon");
    let unrelated = host.dom.find(".nav-logo").expect("logo");

    manager.handle_click(&mut host.env(), unrelated);
    assert_eq!(manager.theme(), Theme::Dark);

    manager.handle_click(&mut host.env(), icon);
    assert_eq!(manager.theme(), Theme::Light);
}

#[test]
fn unrecognised_persisted_value_falls_back_to_default() {
    let prefs = MemoryPreferences::with_value("theme", "sepia");
    let mut host = HeadlessHost::with_prefs(portfolio_document(), prefs, 1);
    let manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.theme(), Theme::Dark);
    assert_eq!(host.prefs.get("theme").expect("get").as_deref(), Some("dark"));
}

#[test]
fn read_only_store_keeps_theme_in_memory() {
    let mut host = HeadlessHost::with_prefs(portfolio_document(), MemoryPreferences::read_only(), 1);
    let mut manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.toggle_theme(&mut host.env()), Theme::Light);
    assert_eq!(root_theme(&host).as_deref(), Some("light"));
    assert!(host.prefs.is_empty());
}

#[test]
fn custom_storage_key_is_honoured() {
    let settings = Settings {
        theme_storage_key: "portfolio.theme".into(),
        default_theme: Theme::Light,
        ..Settings::default()
    };
    let mut host = HeadlessHost::new(portfolio_document());
    ThemeManager::new(&mut host.env(), &settings);

    assert_eq!(host.prefs.get("portfolio.theme").expect("get").as_deref(), Some("light"));
    assert_eq!(host.prefs.get("theme").expect("get"), None);
}

#[test]
fn missing_toggle_is_tolerated() {
    let mut host = HeadlessHost::new(crate::headless::MemoryDom::new());
    let mut manager = ThemeManager::new(&mut host.env(), &Settings::default());

    assert_eq!(manager.toggle_theme(&mut host.env()), Theme::Light);
    assert_eq!(root_theme(&host).as_deref(), Some("light"));
}
