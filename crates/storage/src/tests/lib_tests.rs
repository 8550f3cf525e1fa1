use super::*;

#[test]
fn memory_store_round_trips_values() {
    let mut prefs = MemoryPreferences::new();
    assert_eq!(prefs.get("theme").expect("get"), None);

    prefs.set("theme", "light").expect("set");
    assert_eq!(prefs.get("theme").expect("get").as_deref(), Some("light"));
    assert_eq!(prefs.len(), 1);
}

#[test]
fn read_only_store_rejects_writes() {
    let mut prefs = MemoryPreferences::read_only();
    let err = prefs.set("theme", "dark").expect_err("read only");
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(prefs.is_empty());
}

#[test]
fn storage_errors_convert_into_fx_errors() {
    let err: FxError = StorageError::Unavailable("quota".into()).into();
    assert_eq!(err.code(), shared::error::ErrorCode::Storage);
    assert!(err.to_string().contains("quota"));
}

#[test]
fn boxed_store_delegates() {
    let mut prefs: Box<dyn PreferenceStore> = Box::new(MemoryPreferences::new());
    prefs.set("k", "v").expect("set");
    assert_eq!(prefs.get("k").expect("get").as_deref(), Some("v"));
}

#[test]
fn file_store_creates_parent_dir_on_first_write() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("nested").join("prefs.json");

    let mut prefs = FilePreferences::open(&path).expect("open missing file");
    assert_eq!(prefs.get("theme").expect("get"), None);

    prefs.set("theme", "light").expect("set");
    assert!(path.exists(), "preference file should exist: {}", path.display());
}

#[test]
fn file_store_reports_malformed_json() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("prefs.json");
    fs::write(&path, "not json").expect("write");

    let err = FilePreferences::open(&path).expect_err("malformed");
    assert!(matches!(err, StorageError::Serde { .. }));
}
