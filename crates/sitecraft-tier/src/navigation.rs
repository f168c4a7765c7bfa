//! Navigation derivation.
//!
//! The item list is a function of tier, site mode, hero type and content:
//!
//! 1. the tier's variant table gives the ordered base ids
//! 2. the hero modifier's additions are appended
//! 3. the hero modifier's removals are applied
//! 4. duplicates are dropped, first occurrence wins
//! 5. each id becomes a [`NavigationItem`]

use std::fmt;

use serde::Serialize;
use sitecraft_config::{HeroType, SiteMode};
use tracing::trace;

use crate::content::{ContentEntry, ContentProvider};
use crate::features::{FeatureKey, has_feature};
use crate::tier::{Tier, resolve_tier};

/// Navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavItemId {
    Home,
    About,
    Services,
    Projects,
    Team,
    Testimonials,
    Blog,
    Faq,
    Contact,
    Gallery,
}

impl NavItemId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NavItemId::Home => "home",
            NavItemId::About => "about",
            NavItemId::Services => "services",
            NavItemId::Projects => "projects",
            NavItemId::Team => "team",
            NavItemId::Testimonials => "testimonials",
            NavItemId::Blog => "blog",
            NavItemId::Faq => "faq",
            NavItemId::Contact => "contact",
            NavItemId::Gallery => "gallery",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            NavItemId::Home => "Home",
            NavItemId::About => "About",
            NavItemId::Services => "Services",
            NavItemId::Projects => "Projects",
            NavItemId::Team => "Team",
            NavItemId::Testimonials => "Testimonials",
            NavItemId::Blog => "Blog",
            NavItemId::Faq => "FAQ",
            NavItemId::Contact => "Contact",
            NavItemId::Gallery => "Gallery",
        }
    }

    /// Link target: a page path in multipage mode, an anchor in onepage mode.
    pub fn href(&self, mode: SiteMode) -> String {
        match (mode, self) {
            (SiteMode::Multipage, NavItemId::Home) => "/".to_owned(),
            (SiteMode::Onepage, NavItemId::Home) => "#top".to_owned(),
            (SiteMode::Multipage, id) => format!("/{}", id.as_str()),
            (SiteMode::Onepage, id) => format!("#{}", id.as_str()),
        }
    }

    /// Detail-page feature and path prefix for ids that can own a dropdown.
    const fn detail_pages(&self) -> Option<(FeatureKey, &'static str)> {
        match self {
            NavItemId::Services => Some((FeatureKey::ServicesDetailPages, "/services")),
            NavItemId::Projects => Some((FeatureKey::ProjectsDetailPages, "/projects")),
            _ => None,
        }
    }
}

impl fmt::Display for NavItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered base items for a tier.
pub const fn variant_items(tier: Tier) -> &'static [NavItemId] {
    match tier {
        Tier::Starter => &[
            NavItemId::Home,
            NavItemId::Services,
            NavItemId::About,
            NavItemId::Contact,
        ],
        Tier::Professional => &[
            NavItemId::Home,
            NavItemId::About,
            NavItemId::Services,
            NavItemId::Projects,
            NavItemId::Testimonials,
            NavItemId::Contact,
        ],
        Tier::Premium => &[
            NavItemId::Home,
            NavItemId::About,
            NavItemId::Services,
            NavItemId::Projects,
            NavItemId::Team,
            NavItemId::Blog,
            NavItemId::Faq,
            NavItemId::Contact,
        ],
    }
}

/// Items a hero type adds to and removes from the base list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroModifier {
    pub add: &'static [NavItemId],
    pub remove: &'static [NavItemId],
}

impl HeroModifier {
    const NONE: HeroModifier = HeroModifier {
        add: &[],
        remove: &[],
    };
}

pub const fn hero_modifier(hero: HeroType) -> HeroModifier {
    match hero {
        HeroType::Gallery => HeroModifier {
            add: &[NavItemId::Gallery],
            remove: &[],
        },
        HeroType::Minimal => HeroModifier {
            add: &[],
            remove: &[NavItemId::Testimonials, NavItemId::Faq],
        },
        HeroType::Fullscreen | HeroType::Split | HeroType::Slider | HeroType::Video => {
            HeroModifier::NONE
        }
    }
}

/// One dropdown link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownEntry {
    pub label: String,
    pub href: String,
}

/// A concrete navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: NavItemId,
    pub label: String,
    pub href: String,
    pub has_dropdown: bool,
    pub dropdown: Vec<DropdownEntry>,
}

/// Ordered, duplicate-free ids for a tier and hero type.
pub fn navigation_ids(tier: Tier, hero: HeroType) -> Vec<NavItemId> {
    let modifier = hero_modifier(hero);
    let mut ids: Vec<NavItemId> = Vec::new();
    for id in variant_items(tier).iter().chain(modifier.add) {
        if !modifier.remove.contains(id) && !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids
}

/// Navigation for a site, resolving the tier from the mode and override.
pub fn navigation_items<C>(
    mode: SiteMode,
    tier_override: Option<Tier>,
    hero: HeroType,
    content: &C,
) -> Vec<NavigationItem>
where
    C: ContentProvider + ?Sized,
{
    let tier = resolve_tier(mode, tier_override);
    resolve_navigation(tier, mode, hero, content)
}

/// Navigation for an already-resolved tier.
pub fn resolve_navigation<C>(
    tier: Tier,
    mode: SiteMode,
    hero: HeroType,
    content: &C,
) -> Vec<NavigationItem>
where
    C: ContentProvider + ?Sized,
{
    let items: Vec<NavigationItem> = navigation_ids(tier, hero)
        .into_iter()
        .map(|id| build_item(id, tier, mode, content))
        .collect();
    trace!(%tier, %mode, %hero, count = items.len(), "resolved navigation");
    items
}

fn build_item<C>(id: NavItemId, tier: Tier, mode: SiteMode, content: &C) -> NavigationItem
where
    C: ContentProvider + ?Sized,
{
    let dropdown = match id.detail_pages() {
        Some((feature, prefix)) if has_feature(tier, feature) => {
            let entries = match id {
                NavItemId::Projects => content.projects(),
                _ => content.services(),
            };
            dropdown_entries(entries, prefix)
        }
        _ => Vec::new(),
    };

    NavigationItem {
        id,
        label: id.label().to_owned(),
        href: id.href(mode),
        has_dropdown: !dropdown.is_empty(),
        dropdown,
    }
}

fn dropdown_entries(entries: &[ContentEntry], prefix: &str) -> Vec<DropdownEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            entry.linkable_slug().map(|slug| DropdownEntry {
                label: entry.title.clone(),
                href: format!("{prefix}/{slug}"),
            })
        })
        .collect()
}
