//! The configuration store.
//!
//! `ConfigStore` owns the canonical [`AppConfig`]. Every mutation
//! synchronously writes the new configuration to storage and then notifies
//! subscribers in registration order, so by the time an update call returns
//! all subscribers have seen the new value.
//!
//! Storage failures never reach the caller. A failed read means defaults; a
//! failed write is logged and the in-memory configuration stays
//! authoritative.

use serde_json::Value;
use sitecraft_events::{DispatchReport, Listener, ListenerResult, ListenerSet, Subscription, listener};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::merge::parse_persisted;
use crate::model::AppConfig;
use crate::patch::ConfigPatch;
use crate::path::set_path;
use crate::storage::ConfigStorage;

/// Storage key the configuration is persisted under.
pub const STORAGE_KEY: &str = "sitecraft-config";

/// Owner of the site configuration.
#[derive(Debug)]
pub struct ConfigStore<S> {
    config: AppConfig,
    storage: S,
    listeners: ListenerSet<AppConfig>,
    persistence_healthy: bool,
}

impl<S: ConfigStorage> ConfigStore<S> {
    /// Load the persisted configuration, merged over the defaults.
    pub fn load(storage: S) -> Self {
        let config = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => parse_persisted(&raw),
            Ok(None) => {
                debug!("no persisted configuration, using defaults");
                AppConfig::default()
            }
            Err(error) => {
                warn!(%error, "persisted configuration unreadable, using defaults");
                AppConfig::default()
            }
        };
        Self {
            config,
            storage,
            listeners: ListenerSet::new(),
            persistence_healthy: true,
        }
    }

    /// The current configuration.
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace every section present in `patch`, persist, notify.
    ///
    /// Sections are replaced wholesale; see [`ConfigPatch`].
    pub fn update_config(&mut self, patch: ConfigPatch) -> DispatchReport {
        let sections = patch.sections();
        self.config.apply_patch(patch);
        info!(?sections, "configuration updated");
        self.commit()
    }

    /// Replace the single value at `path`, keeping its siblings.
    ///
    /// On error nothing is persisted and no subscriber is notified.
    pub fn update_path(&mut self, path: &[&str], value: Value) -> Result<DispatchReport> {
        self.config = set_path(&self.config, path, value)?;
        info!(path = %path.join("."), "configuration updated");
        Ok(self.commit())
    }

    /// Edit the configuration in place, then persist and notify.
    pub fn update_with<F>(&mut self, edit: F) -> DispatchReport
    where
        F: FnOnce(&mut AppConfig),
    {
        edit(&mut self.config);
        info!("configuration updated");
        self.commit()
    }

    /// Restore the defaults and clear the persisted state.
    pub fn reset_to_defaults(&mut self) -> DispatchReport {
        self.config = AppConfig::default();
        match self.storage.remove(STORAGE_KEY) {
            Ok(()) => self.persistence_healthy = true,
            Err(error) => {
                self.persistence_healthy = false;
                warn!(%error, "failed to clear persisted configuration");
            }
        }
        info!("configuration reset to defaults");
        self.notify()
    }

    /// Register a listener called after every update and reset.
    pub fn subscribe(&self, listener: Listener<AppConfig>) -> Subscription {
        self.listeners.insert(listener)
    }

    /// Register a closure called after every update and reset.
    pub fn on_change<F>(&self, f: F) -> Subscription
    where
        F: Fn(&AppConfig) -> ListenerResult + 'static,
    {
        self.subscribe(listener(f))
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the last persistence attempt succeeded.
    pub fn persistence_healthy(&self) -> bool {
        self.persistence_healthy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back, e.g. to load it again.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self) -> DispatchReport {
        match self.persist() {
            Ok(()) => self.persistence_healthy = true,
            Err(error) => {
                self.persistence_healthy = false;
                warn!(%error, "failed to persist configuration, continuing in memory");
            }
        }
        self.notify()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.config).map_err(ConfigError::Serialization)?;
        self.storage.write(STORAGE_KEY, &raw)?;
        Ok(())
    }

    fn notify(&self) -> DispatchReport {
        self.listeners.notify("config-changed", &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorScheme, DesignPackage, ThemeConfig};
    use crate::storage::MemoryStorage;
    use sitecraft_events::ListenerError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> ConfigStore<MemoryStorage> {
        ConfigStore::load(MemoryStorage::new())
    }

    #[test]
    fn test_update_writes_through() {
        let mut store = store();
        store.update_config(ConfigPatch::new().theme(ThemeConfig {
            color_scheme: ColorScheme::Forest,
            dark_mode: true,
        }));

        let raw = store.storage().get(STORAGE_KEY).unwrap();
        let persisted: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(&persisted, store.config());
        assert!(store.persistence_healthy());
    }

    #[test]
    fn test_subscribers_run_in_order_before_return() {
        let mut store = store();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            let _ = store.on_change(move |config| {
                log.borrow_mut().push((name, config.style.package));
                Ok(())
            });
        }

        store.update_with(|config| config.style.package = DesignPackage::Elegant);
        assert_eq!(
            log.borrow().as_slice(),
            [
                ("first", DesignPackage::Elegant),
                ("second", DesignPackage::Elegant)
            ]
        );
    }

    #[test]
    fn test_broken_subscriber_is_isolated() {
        let mut store = store();
        let hits = Rc::new(RefCell::new(0));
        let _bad = store.on_change(|_| Err(ListenerError::msg("render failed")));
        let _good = {
            let hits = Rc::clone(&hits);
            store.on_change(move |_| {
                *hits.borrow_mut() += 1;
                Ok(())
            })
        };

        let report = store.update_with(|config| config.system.quick_edit_mode = true);
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 1);

        store.update_with(|config| config.system.quick_edit_mode = false);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut store = ConfigStore::load(storage);

        store.update_with(|config| config.theme.dark_mode = true);
        assert!(store.config().theme.dark_mode);
        assert!(!store.persistence_healthy());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_failed_path_update_changes_nothing() {
        let mut store = store();
        let hits = Rc::new(RefCell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            store.on_change(move |_| {
                *hits.borrow_mut() += 1;
                Ok(())
            })
        };

        let result = store.update_path(&["style", "package"], Value::from("brutalist"));
        assert!(result.is_err());
        assert_eq!(store.config(), &AppConfig::default());
        assert_eq!(*hits.borrow(), 0);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = store();
        let hits = Rc::new(RefCell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            store.on_change(move |_| {
                *hits.borrow_mut() += 1;
                Ok(())
            })
        };
        store.update_config(ConfigPatch::new());
        sub.unsubscribe();
        store.update_config(ConfigPatch::new());
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }
}
