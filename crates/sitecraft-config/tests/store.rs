//! Integration tests for loading, updating and resetting the store.

use proptest::prelude::*;
use proptest::sample::select;
use serde_json::json;
use sitecraft_config::{
    AppConfig, ColorScheme, ConfigPatch, ConfigStorage, ConfigStore, DesignPackage, FileStorage,
    MemoryStorage, STORAGE_KEY, SiteMode, Spacing, StyleConfig, get_path,
};
use tempfile::tempdir;

#[test]
fn reset_then_reload_returns_defaults() {
    let mut store = ConfigStore::load(MemoryStorage::new());
    store.update_with(|config| {
        config.layout.mode = SiteMode::Multipage;
        config.theme.color_scheme = ColorScheme::Sunset;
    });
    assert_ne!(store.config(), &AppConfig::default());

    store.reset_to_defaults();
    assert_eq!(store.config(), &AppConfig::default());

    let storage = store.into_storage();
    assert_eq!(storage.get(STORAGE_KEY), None);
    let reloaded = ConfigStore::load(storage);
    assert_eq!(reloaded.config(), &AppConfig::default());
}

#[test]
fn updates_survive_a_restart_on_disk() {
    let dir = tempdir().unwrap();

    let mut store = ConfigStore::load(FileStorage::new(dir.path()));
    let current = store.config().clone();
    store.update_config(ConfigPatch::new().style(StyleConfig {
        package: DesignPackage::Minimal,
        ..current.style
    }));
    store
        .update_path(&["theme", "colorScheme"], json!("berry"))
        .unwrap();
    let expected = store.config().clone();
    drop(store);

    let reloaded = ConfigStore::load(FileStorage::new(dir.path()));
    assert_eq!(reloaded.config(), &expected);
    assert_eq!(reloaded.config().style.package, DesignPackage::Minimal);
    assert_eq!(reloaded.config().theme.color_scheme, ColorScheme::Berry);
}

#[test]
fn corrupted_file_loads_defaults_and_is_overwritten() {
    let dir = tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.write(STORAGE_KEY, "{\"layout\": [").unwrap();

    let mut store = ConfigStore::load(storage);
    assert_eq!(store.config(), &AppConfig::default());

    store.update_with(|config| config.system.is_first_visit = false);
    let raw = store.storage().read(STORAGE_KEY).unwrap().unwrap();
    let persisted: AppConfig = serde_json::from_str(&raw).unwrap();
    assert!(!persisted.system.is_first_visit);
}

#[test]
fn older_persisted_shape_is_completed_with_defaults() {
    let storage = MemoryStorage::new().with_entry(
        STORAGE_KEY,
        r#"{"layout":{"mode":"multipage"},"style":{"package":"modern","badgeStyle":"pill"}}"#,
    );
    let store = ConfigStore::load(storage);
    let config = store.config();

    assert_eq!(config.layout.mode, SiteMode::Multipage);
    assert_eq!(config.style.package, DesignPackage::Modern);
    assert_eq!(config.style.badge_style.map(|b| b.as_str()), Some("pill"));
    assert_eq!(config.headings, AppConfig::default().headings);
    assert_eq!(config.system, AppConfig::default().system);
}

proptest! {
    #[test]
    fn path_updates_touch_only_their_leaf(
        scheme in select(ColorScheme::ALL),
        spacing in select(Spacing::ALL),
        dark in any::<bool>(),
    ) {
        let mut store = ConfigStore::load(MemoryStorage::new());
        let before = store.config().clone();

        store.update_path(&["theme", "colorScheme"], json!(scheme.as_str())).unwrap();
        store.update_path(&["style", "spacing"], json!(spacing.as_str())).unwrap();
        store.update_path(&["theme", "darkMode"], json!(dark)).unwrap();

        let after = store.config();
        prop_assert_eq!(after.theme.color_scheme, scheme);
        prop_assert_eq!(after.theme.dark_mode, dark);
        prop_assert_eq!(after.style.spacing, spacing);
        prop_assert_eq!(after.style.package, before.style.package);
        prop_assert_eq!(&after.layout, &before.layout);
        prop_assert_eq!(&after.headings, &before.headings);
        prop_assert_eq!(
            get_path(after, &["style", "spacing"]).unwrap(),
            json!(spacing.as_str())
        );
    }
}
