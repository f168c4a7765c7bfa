//! Subscription tiers and site-variant resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sitecraft_config::{ParseEnumError, SiteMode};

/// Subscription tier. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Starter,
    Professional,
    Premium,
}

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Tier; 3] = [Tier::Starter, Tier::Professional, Tier::Premium];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Tier::Starter => "starter",
            Tier::Professional => "professional",
            Tier::Premium => "premium",
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Tier::Starter => "Starter",
            Tier::Professional => "Professional",
            Tier::Premium => "Premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseEnumError {
                kind: "Tier",
                value: value.to_owned(),
            })
    }
}

/// Tier implied by the site mode alone.
///
/// Multipage sites are premium and onepage sites are starter. This never
/// yields [`Tier::Professional`]; that tier is only reachable through an
/// explicit override, see [`resolve_tier`].
pub const fn site_variant(mode: SiteMode) -> Tier {
    match mode {
        SiteMode::Multipage => Tier::Premium,
        SiteMode::Onepage => Tier::Starter,
    }
}

/// Effective tier: the override when given, otherwise the site variant.
pub fn resolve_tier(mode: SiteMode, tier_override: Option<Tier>) -> Tier {
    tier_override.unwrap_or_else(|| site_variant(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_variant() {
        assert_eq!(site_variant(SiteMode::Multipage), Tier::Premium);
        assert_eq!(site_variant(SiteMode::Onepage), Tier::Starter);
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(resolve_tier(SiteMode::Onepage, None), Tier::Starter);
        assert_eq!(
            resolve_tier(SiteMode::Multipage, Some(Tier::Professional)),
            Tier::Professional
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("premium".parse(), Ok(Tier::Premium));
        assert_eq!("Professional".parse(), Ok(Tier::Professional));
        assert!("enterprise".parse::<Tier>().is_err());
        assert_eq!(Tier::Starter.to_string(), "Starter");
    }
}
