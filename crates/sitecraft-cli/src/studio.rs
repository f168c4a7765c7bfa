//! Runtime wiring: one store, one orchestrator, one event bus.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sitecraft_config::{AppConfig, ConfigStorage, ConfigStore, FileStorage, HeroType};
use sitecraft_events::{EventBus, Subscription};
use sitecraft_theme::{
    ApplyReport, MemorySurface, StyleOrchestrator, StyleSnapshot, ThemeEvent, connect,
};
use sitecraft_tier::{ContentCatalog, NavigationItem, Tier, navigation_items, resolve_tier};
use tracing::{debug, info};

use crate::settings::Settings;

/// A running engine instance.
///
/// The orchestrator is initialized from the loaded configuration and then
/// follows the store. Call [`Studio::settle`] after updates to let the
/// pending style pass run.
pub struct Studio<S> {
    store: ConfigStore<S>,
    orchestrator: Rc<RefCell<StyleOrchestrator<MemorySurface>>>,
    bus: EventBus<ThemeEvent>,
    catalog: ContentCatalog,
    link: Option<Subscription>,
}

impl Studio<FileStorage> {
    /// Open the engine described by `settings`.
    pub fn open(settings: &Settings) -> Result<Self> {
        let storage = FileStorage::new(settings.storage_dir());
        info!(dir = %storage.dir().display(), "opening configuration storage");
        let catalog = match &settings.content.catalog {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read content catalog {}", path.display()))?;
                ContentCatalog::from_json(&text)
                    .with_context(|| format!("parse content catalog {}", path.display()))?
            }
            None => ContentCatalog::new(),
        };
        Ok(Self::new(storage, settings.debounce(), catalog))
    }
}

impl<S: ConfigStorage> Studio<S> {
    pub fn new(storage: S, debounce: Duration, catalog: ContentCatalog) -> Self {
        let store = ConfigStore::load(storage);
        let bus = EventBus::new();
        let orchestrator = Rc::new(RefCell::new(StyleOrchestrator::with_delay(
            MemorySurface::new(),
            bus.clone(),
            debounce,
        )));
        orchestrator
            .borrow_mut()
            .initialize(store.config().clone());
        let link = connect(&store, &orchestrator);
        Self {
            store,
            orchestrator,
            bus,
            catalog,
            link: Some(link),
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.store.config()
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore<S> {
        &mut self.store
    }

    pub fn bus(&self) -> &EventBus<ThemeEvent> {
        &self.bus
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Run the host loop until no style pass is pending.
    ///
    /// Returns the report of the last pass that ran, if any.
    pub fn settle(&self) -> Option<ApplyReport> {
        let mut last = None;
        loop {
            let styles = self.orchestrator.borrow().next_deadline();
            let Some(deadline) = styles.into_iter().chain(self.bus.next_deadline()).min() else {
                break;
            };
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            let now = Instant::now();
            if let Some(report) = self.orchestrator.borrow_mut().tick_at(now) {
                last = Some(report);
            }
            self.bus.poll_debounced(now);
        }
        if let Some(report) = &last {
            debug!(pass = report.pass, writes = report.writes, "styles settled");
        }
        last
    }

    /// Apply the current configuration immediately.
    pub fn flush(&self) -> Option<ApplyReport> {
        self.orchestrator.borrow_mut().flush()
    }

    pub fn snapshot(&self) -> StyleSnapshot {
        self.orchestrator.borrow().snapshot()
    }

    /// Tier in effect for the current configuration.
    pub fn tier(&self, tier_override: Option<Tier>) -> Tier {
        resolve_tier(self.config().layout.mode, tier_override)
    }

    /// Navigation for the current configuration, optionally previewing a
    /// different tier or hero type.
    pub fn navigation(
        &self,
        tier_override: Option<Tier>,
        hero: Option<HeroType>,
    ) -> Vec<NavigationItem> {
        let config = self.config();
        navigation_items(
            config.layout.mode,
            tier_override,
            hero.unwrap_or(config.hero.hero_type),
            &self.catalog,
        )
    }

    /// Stop forwarding store changes to the orchestrator.
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            link.unsubscribe();
        }
    }
}
