//! Static per-tier feature table.
//!
//! Every lookup here is a constant read: the tables are compiled in and
//! nothing is computed from configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sitecraft_config::ParseEnumError;

use crate::tier::Tier;

/// A capability that may or may not be included in a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    ServicesDetailPages,
    ProjectsDetailPages,
    TeamPage,
    BlogPage,
    TestimonialsPage,
    FaqPage,
    GalleryLightbox,
    ContactForm,
    ContactMap,
    ContactPhone,
    ContactWhatsapp,
    ContactLiveChat,
    MultiLanguage,
    CustomDomain,
    Analytics,
    SeoAdvanced,
    Newsletter,
    OnlineBooking,
    RemoveBranding,
    PrioritySupport,
}

impl FeatureKey {
    /// Every key, in table order.
    pub const ALL: [FeatureKey; 20] = [
        FeatureKey::ServicesDetailPages,
        FeatureKey::ProjectsDetailPages,
        FeatureKey::TeamPage,
        FeatureKey::BlogPage,
        FeatureKey::TestimonialsPage,
        FeatureKey::FaqPage,
        FeatureKey::GalleryLightbox,
        FeatureKey::ContactForm,
        FeatureKey::ContactMap,
        FeatureKey::ContactPhone,
        FeatureKey::ContactWhatsapp,
        FeatureKey::ContactLiveChat,
        FeatureKey::MultiLanguage,
        FeatureKey::CustomDomain,
        FeatureKey::Analytics,
        FeatureKey::SeoAdvanced,
        FeatureKey::Newsletter,
        FeatureKey::OnlineBooking,
        FeatureKey::RemoveBranding,
        FeatureKey::PrioritySupport,
    ];

    /// The camelCase key used by presentation code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::ServicesDetailPages => "servicesDetailPages",
            FeatureKey::ProjectsDetailPages => "projectsDetailPages",
            FeatureKey::TeamPage => "teamPage",
            FeatureKey::BlogPage => "blogPage",
            FeatureKey::TestimonialsPage => "testimonialsPage",
            FeatureKey::FaqPage => "faqPage",
            FeatureKey::GalleryLightbox => "galleryLightbox",
            FeatureKey::ContactForm => "contactForm",
            FeatureKey::ContactMap => "contactMap",
            FeatureKey::ContactPhone => "contactPhone",
            FeatureKey::ContactWhatsapp => "contactWhatsapp",
            FeatureKey::ContactLiveChat => "contactLiveChat",
            FeatureKey::MultiLanguage => "multiLanguage",
            FeatureKey::CustomDomain => "customDomain",
            FeatureKey::Analytics => "analytics",
            FeatureKey::SeoAdvanced => "seoAdvanced",
            FeatureKey::Newsletter => "newsletter",
            FeatureKey::OnlineBooking => "onlineBooking",
            FeatureKey::RemoveBranding => "removeBranding",
            FeatureKey::PrioritySupport => "prioritySupport",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FeatureKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| ParseEnumError {
                kind: "FeatureKey",
                value: value.to_owned(),
            })
    }
}

// =============================================================================
// TABLE
// =============================================================================

/// What one tier includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureConfig {
    pub services_detail_pages: bool,
    pub projects_detail_pages: bool,
    pub team_page: bool,
    pub blog_page: bool,
    pub testimonials_page: bool,
    pub faq_page: bool,
    pub gallery_lightbox: bool,
    pub contact_form: bool,
    pub contact_map: bool,
    pub contact_phone: bool,
    pub contact_whatsapp: bool,
    pub contact_live_chat: bool,
    pub multi_language: bool,
    pub custom_domain: bool,
    pub analytics: bool,
    pub seo_advanced: bool,
    pub newsletter: bool,
    pub online_booking: bool,
    pub remove_branding: bool,
    pub priority_support: bool,
}

impl FeatureConfig {
    pub const STARTER: FeatureConfig = FeatureConfig {
        services_detail_pages: false,
        projects_detail_pages: false,
        team_page: false,
        blog_page: false,
        testimonials_page: false,
        faq_page: false,
        gallery_lightbox: true,
        contact_form: true,
        contact_map: true,
        contact_phone: true,
        contact_whatsapp: false,
        contact_live_chat: false,
        multi_language: false,
        custom_domain: false,
        analytics: false,
        seo_advanced: false,
        newsletter: false,
        online_booking: false,
        remove_branding: false,
        priority_support: false,
    };

    pub const PROFESSIONAL: FeatureConfig = FeatureConfig {
        services_detail_pages: true,
        projects_detail_pages: true,
        team_page: true,
        blog_page: false,
        testimonials_page: true,
        faq_page: true,
        gallery_lightbox: true,
        contact_form: true,
        contact_map: true,
        contact_phone: true,
        contact_whatsapp: true,
        contact_live_chat: false,
        multi_language: false,
        custom_domain: true,
        analytics: true,
        seo_advanced: false,
        newsletter: true,
        online_booking: false,
        remove_branding: false,
        priority_support: false,
    };

    pub const PREMIUM: FeatureConfig = FeatureConfig {
        services_detail_pages: true,
        projects_detail_pages: true,
        team_page: true,
        blog_page: true,
        testimonials_page: true,
        faq_page: true,
        gallery_lightbox: true,
        contact_form: true,
        contact_map: true,
        contact_phone: true,
        contact_whatsapp: true,
        contact_live_chat: true,
        multi_language: true,
        custom_domain: true,
        analytics: true,
        seo_advanced: true,
        newsletter: true,
        online_booking: true,
        remove_branding: true,
        priority_support: true,
    };

    /// The table for `tier`.
    pub const fn for_tier(tier: Tier) -> &'static FeatureConfig {
        match tier {
            Tier::Starter => &Self::STARTER,
            Tier::Professional => &Self::PROFESSIONAL,
            Tier::Premium => &Self::PREMIUM,
        }
    }

    pub const fn get(&self, key: FeatureKey) -> bool {
        match key {
            FeatureKey::ServicesDetailPages => self.services_detail_pages,
            FeatureKey::ProjectsDetailPages => self.projects_detail_pages,
            FeatureKey::TeamPage => self.team_page,
            FeatureKey::BlogPage => self.blog_page,
            FeatureKey::TestimonialsPage => self.testimonials_page,
            FeatureKey::FaqPage => self.faq_page,
            FeatureKey::GalleryLightbox => self.gallery_lightbox,
            FeatureKey::ContactForm => self.contact_form,
            FeatureKey::ContactMap => self.contact_map,
            FeatureKey::ContactPhone => self.contact_phone,
            FeatureKey::ContactWhatsapp => self.contact_whatsapp,
            FeatureKey::ContactLiveChat => self.contact_live_chat,
            FeatureKey::MultiLanguage => self.multi_language,
            FeatureKey::CustomDomain => self.custom_domain,
            FeatureKey::Analytics => self.analytics,
            FeatureKey::SeoAdvanced => self.seo_advanced,
            FeatureKey::Newsletter => self.newsletter,
            FeatureKey::OnlineBooking => self.online_booking,
            FeatureKey::RemoveBranding => self.remove_branding,
            FeatureKey::PrioritySupport => self.priority_support,
        }
    }
}

// =============================================================================
// LOOKUPS
// =============================================================================

/// Whether `tier` includes `key`.
pub const fn has_feature(tier: Tier, key: FeatureKey) -> bool {
    FeatureConfig::for_tier(tier).get(key)
}

/// String-keyed lookup for presentation code. Unknown keys are not granted.
pub fn has_feature_access(tier: Tier, key: &str) -> bool {
    key.parse::<FeatureKey>()
        .is_ok_and(|key| has_feature(tier, key))
}

/// Keys `tier` includes, in table order.
pub fn available_features(tier: Tier) -> Vec<FeatureKey> {
    FeatureKey::ALL
        .into_iter()
        .filter(|key| has_feature(tier, *key))
        .collect()
}

/// Keys `tier` lacks, in table order.
pub fn missing_features(tier: Tier) -> Vec<FeatureKey> {
    FeatureKey::ALL
        .into_iter()
        .filter(|key| !has_feature(tier, *key))
        .collect()
}
