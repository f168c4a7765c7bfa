//! Tier resolution, feature gating and navigation for Sitecraft.
//!
//! Everything here is a pure function of its inputs. The tier is derived
//! from the site mode (or an explicit override) every time it is needed and
//! is never stored.

mod content;
mod error;
mod features;
mod navigation;
mod tier;

pub use content::{ContentCatalog, ContentEntry, ContentProvider};
pub use error::{Result, TierError};
pub use features::{
    FeatureConfig, FeatureKey, available_features, has_feature, has_feature_access,
    missing_features,
};
pub use navigation::{
    DropdownEntry, HeroModifier, NavItemId, NavigationItem, hero_modifier, navigation_ids,
    navigation_items, resolve_navigation, variant_items,
};
pub use tier::{Tier, resolve_tier, site_variant};
