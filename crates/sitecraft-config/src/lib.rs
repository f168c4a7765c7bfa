//! Site configuration for Sitecraft.
//!
//! This crate owns the canonical [`AppConfig`] and everything needed to
//! change and keep it:
//!
//! - `model` - the fixed-shape configuration record and its enums
//! - `patch` - shallow, section-replacing updates ([`ConfigPatch`])
//! - `path` - leaf-addressed reads and writes (`["style", "package"]`)
//! - `merge` - loading persisted JSON over the defaults, with recovery
//! - `storage` - the [`ConfigStorage`] trait, in-memory and file backends
//! - `store` - [`ConfigStore`]: write-through persistence and notifications
//! - `checkout` - the request body sent to the checkout endpoint
//!
//! # Example
//!
//! ```
//! use sitecraft_config::{ConfigStore, MemoryStorage, DesignPackage};
//!
//! let mut store = ConfigStore::load(MemoryStorage::new());
//! let _sub = store.on_change(|config| {
//!     println!("package is now {}", config.style.package);
//!     Ok(())
//! });
//! store.update_with(|config| config.style.package = DesignPackage::Modern);
//! assert_eq!(store.config().style.package, DesignPackage::Modern);
//! ```

mod checkout;
mod error;
mod merge;
mod model;
mod patch;
mod path;
mod storage;
mod store;

pub use checkout::CheckoutRequest;
pub use error::{ConfigError, ParseEnumError, Result, StorageError};
pub use merge::{deep_merge, merge_over_defaults, parse_persisted};
pub use model::{
    AppConfig, BadgeStyle, BorderRadius, BorderWeight, ColorScheme, ConfigTab, DesignPackage,
    FeatureToggles, FontFamily, HeaderBehavior, HeaderConfig, HeaderVariant, HeadingColor,
    HeadingStyle, HeadingsConfig, HeroConfig, HeroType, LayoutConfig, LayoutDesign,
    LayoutVariant, NavigationStyle, SiteMode, Spacing, StyleConfig, SystemConfig, ThemeConfig,
};
pub use patch::ConfigPatch;
pub use path::{get_path, parse_path, set_path};
pub use storage::{ConfigStorage, FileStorage, MemoryStorage, StorageResult};
pub use store::{ConfigStore, STORAGE_KEY};
