//! Applying a color scheme to the surface.

use serde::Serialize;
use sitecraft_config::ColorScheme;
use sitecraft_events::EventBus;
use tracing::debug;

use crate::palette::Palette;
use crate::surface::StyleSurface;
use crate::variables::VariableWriter;

/// Event published when the applied color scheme changes.
pub const COLOR_SCHEME_CHANGED: &str = "color-scheme-changed";

/// Event published after every application pass.
pub const STYLES_APPLIED: &str = "styles-applied";

/// Payloads published on the theme event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ThemeEvent {
    ColorSchemeChanged { scheme: ColorScheme },
    StylesApplied { pass: u64, writes: usize },
}

/// What one [`ColorSchemeApplier::apply`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemeOutcome {
    pub writes: usize,
    /// The palette was looked up rather than served from the cache.
    pub recomputed: bool,
    /// A [`COLOR_SCHEME_CHANGED`] event was published.
    pub published: bool,
}

/// Writes palettes and announces scheme changes.
///
/// Keeps the last palette it built, so repeated applications of one scheme
/// skip the lookup. The writer still filters unchanged values.
#[derive(Debug)]
pub struct ColorSchemeApplier {
    bus: EventBus<ThemeEvent>,
    cached: Option<Palette>,
    last_published: Option<ColorScheme>,
}

impl ColorSchemeApplier {
    pub fn new(bus: EventBus<ThemeEvent>) -> Self {
        Self {
            bus,
            cached: None,
            last_published: None,
        }
    }

    pub fn apply<S: StyleSurface>(
        &mut self,
        scheme: ColorScheme,
        writer: &mut VariableWriter<S>,
    ) -> SchemeOutcome {
        let recomputed = self.cached.is_none_or(|palette| palette.scheme != scheme);
        if recomputed {
            debug!(%scheme, "building palette");
            self.cached = Some(Palette::for_scheme(scheme));
        }
        let palette = self.cached.unwrap_or_else(|| Palette::for_scheme(scheme));
        let writes = writer.set_color_scheme(&palette);

        let published = self.last_published != Some(scheme);
        if published {
            self.last_published = Some(scheme);
            self.bus
                .dispatch_event(COLOR_SCHEME_CHANGED, &ThemeEvent::ColorSchemeChanged { scheme });
        }

        SchemeOutcome {
            writes,
            recomputed,
            published,
        }
    }

    /// Drop the cached palette and the published-scheme memory.
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.last_published = None;
    }

    pub fn bus(&self) -> &EventBus<ThemeEvent> {
        &self.bus
    }
}
