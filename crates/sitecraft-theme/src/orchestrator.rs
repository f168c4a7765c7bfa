//! Turning configurations into style surface writes.
//!
//! The orchestrator receives every configuration the store produces but only
//! applies the last one of a burst: each [`StyleOrchestrator::update_config`]
//! resets a one-frame trailing debounce, and the host loop calls
//! [`StyleOrchestrator::tick`] to fire it.
//!
//! An application pass runs four steps:
//!
//! 1. design-style variables, spacing and the body markers, on every pass
//! 2. the color scheme, through [`ColorSchemeApplier`]
//! 3. a cache check on the style-relevant fields; on a hit, step 4 is skipped
//! 4. each style family, isolated from the others' failures
//!
//! All writes go through the [`VariableWriter`], so a pass that changes
//! nothing writes nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use serde::Serialize;
use sitecraft_config::{
    AppConfig, BadgeStyle, BorderRadius, BorderWeight, ConfigStorage, ConfigStore, DesignPackage,
    FontFamily, HeadingsConfig,
};
use sitecraft_events::{Debouncer, EventBus, FRAME_INTERVAL, ListenerError, Subscription};
use tracing::{debug, info, warn};

use crate::computers::{
    BadgeStyleComputer, BorderComputer, BorderRadiusComputer, HeadingDecorationComputer,
    StyleComputer, StyleFamily,
};
use crate::error::Result;
use crate::packages::ResolvedStyle;
use crate::scheme::{ColorSchemeApplier, STYLES_APPLIED, ThemeEvent};
use crate::surface::{DESIGN_STYLE_MARKER, StyleSnapshot, StyleSurface, THEME_MARKER};
use crate::values::ValueTable;
use crate::variables::VariableWriter;

/// What one application pass did.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Sequence number, starting at 1.
    pub pass: u64,
    /// Property writes that reached the surface.
    pub writes: usize,
    /// Step 4 was skipped because the style-relevant fields were unchanged.
    pub style_cache_hit: bool,
    pub palette_recomputed: bool,
    /// Families that failed and kept their previous values.
    pub failed: Vec<StyleFamily>,
}

/// The fields step 4 depends on. Its JSON form is the cache key.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StyleKey<'a> {
    package: DesignPackage,
    font_family: Option<FontFamily>,
    badge_style: Option<BadgeStyle>,
    border_radius: Option<BorderRadius>,
    borders: Option<BorderWeight>,
    headings: &'a HeadingsConfig,
}

impl<'a> StyleKey<'a> {
    fn of(config: &'a AppConfig) -> Self {
        let style = &config.style;
        Self {
            package: style.package,
            font_family: style.font_family,
            badge_style: style.badge_style,
            border_radius: style.border_radius,
            borders: style.borders,
            headings: &config.headings,
        }
    }
}

/// Applies configurations to a style surface.
#[derive(Debug)]
pub struct StyleOrchestrator<S> {
    writer: VariableWriter<S>,
    schemes: ColorSchemeApplier,
    bus: EventBus<ThemeEvent>,
    config: Option<AppConfig>,
    initialized: bool,
    debouncer: Debouncer<()>,
    style_key: Option<String>,
    passes: u64,
}

impl<S: StyleSurface> StyleOrchestrator<S> {
    /// An orchestrator with the default one-frame debounce.
    pub fn new(surface: S, bus: EventBus<ThemeEvent>) -> Self {
        Self::with_delay(surface, bus, FRAME_INTERVAL)
    }

    pub fn with_delay(surface: S, bus: EventBus<ThemeEvent>, delay: Duration) -> Self {
        Self {
            writer: VariableWriter::new(surface),
            schemes: ColorSchemeApplier::new(bus.clone()),
            bus,
            config: None,
            initialized: false,
            debouncer: Debouncer::new(delay),
            style_key: None,
            passes: 0,
        }
    }

    /// Apply `config` immediately. Only the first call does anything.
    pub fn initialize(&mut self, config: AppConfig) -> Option<ApplyReport> {
        if self.initialized {
            debug!("style orchestrator already initialized");
            return None;
        }
        self.initialized = true;
        self.debouncer.cancel();
        self.config = Some(config);
        info!("style orchestrator initialized");
        self.run_pass()
    }

    pub fn update_config(&mut self, config: AppConfig) {
        self.update_config_at(config, Instant::now());
    }

    /// Store `config` and restart the debounce window from `now`.
    ///
    /// A configuration superseded before the window closes is never applied.
    pub fn update_config_at(&mut self, config: AppConfig, now: Instant) {
        self.config = Some(config);
        if self.debouncer.schedule((), now) {
            debug!("pending style application superseded");
        }
    }

    pub fn tick(&mut self) -> Option<ApplyReport> {
        self.tick_at(Instant::now())
    }

    /// Run the pending pass if its window has closed by `now`.
    pub fn tick_at(&mut self, now: Instant) -> Option<ApplyReport> {
        self.debouncer.poll(now)?;
        self.run_pass()
    }

    /// Apply the current configuration now, cancelling any pending pass.
    pub fn flush(&mut self) -> Option<ApplyReport> {
        self.debouncer.cancel();
        self.run_pass()
    }

    /// Forget every cache so the next pass rewrites the whole surface.
    pub fn invalidate(&mut self) {
        self.writer.invalidate();
        self.schemes.invalidate();
        self.style_key = None;
    }

    pub fn snapshot(&self) -> StyleSnapshot {
        self.writer.surface().snapshot()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// The most recently received configuration, applied or not.
    pub fn config(&self) -> Option<&AppConfig> {
        self.config.as_ref()
    }

    pub fn surface(&self) -> &S {
        self.writer.surface()
    }

    pub fn bus(&self) -> &EventBus<ThemeEvent> {
        &self.bus
    }

    fn run_pass(&mut self) -> Option<ApplyReport> {
        let config = self.config.clone()?;
        Some(self.apply(&config))
    }

    fn apply(&mut self, config: &AppConfig) -> ApplyReport {
        self.passes += 1;
        let resolved = ResolvedStyle::from_config(&config.style);
        let mut report = ApplyReport {
            pass: self.passes,
            ..ApplyReport::default()
        };

        // 1. Never skipped.
        report.writes += self.writer.set_design_style(resolved.package);
        report.writes += self.writer.set_spacing(resolved.spacing);
        self.writer
            .set_marker(DESIGN_STYLE_MARKER, resolved.package.as_str());
        let theme = if config.theme.dark_mode { "dark" } else { "light" };
        self.writer.set_marker(THEME_MARKER, theme);

        // 2.
        let scheme = self
            .schemes
            .apply(config.theme.color_scheme, &mut self.writer);
        report.writes += scheme.writes;
        report.palette_recomputed = scheme.recomputed;

        // 3.
        let key = match serde_json::to_string(&StyleKey::of(config)) {
            Ok(key) => Some(key),
            Err(error) => {
                warn!(%error, "failed to build style cache key");
                None
            }
        };
        report.style_cache_hit = key.is_some() && key == self.style_key;

        // 4.
        if !report.style_cache_hit {
            let families = [
                compute::<BorderRadiusComputer>(&resolved.border_radius),
                compute::<BorderComputer>(&resolved.borders),
                compute::<HeadingDecorationComputer>(&config.headings),
                compute::<BadgeStyleComputer>(&resolved.badge_style),
            ];
            for (family, result) in families {
                match result {
                    Ok(table) => report.writes += self.writer.set_table(&table),
                    Err(error) => {
                        warn!(%family, %error, "style family failed, keeping previous values");
                        report.failed.push(family);
                    }
                }
            }
            report.writes += self.writer.set_font_family(resolved.font_family);
            // A failed family must be retried by the next pass.
            self.style_key = if report.failed.is_empty() { key } else { None };
        }

        debug!(
            pass = report.pass,
            writes = report.writes,
            style_cache_hit = report.style_cache_hit,
            palette_recomputed = report.palette_recomputed,
            failed = report.failed.len(),
            "style pass applied"
        );
        self.bus.dispatch_event(
            STYLES_APPLIED,
            &ThemeEvent::StylesApplied {
                pass: report.pass,
                writes: report.writes,
            },
        );
        report
    }
}

fn compute<C: StyleComputer>(input: &C::Input) -> (StyleFamily, Result<ValueTable>) {
    (C::FAMILY, C::compute(input))
}

/// Forward every store change to `orchestrator`.
///
/// The subscription holds the orchestrator weakly. A change delivered while
/// the orchestrator is already borrowed is reported as a listener failure.
pub fn connect<St, S>(
    store: &ConfigStore<St>,
    orchestrator: &Rc<RefCell<StyleOrchestrator<S>>>,
) -> Subscription
where
    St: ConfigStorage,
    S: StyleSurface + 'static,
{
    let weak: Weak<RefCell<StyleOrchestrator<S>>> = Rc::downgrade(orchestrator);
    store.on_change(move |config| {
        let Some(orchestrator) = weak.upgrade() else {
            return Ok(());
        };
        let mut orchestrator = orchestrator
            .try_borrow_mut()
            .map_err(|_| ListenerError::msg("style orchestrator is busy"))?;
        orchestrator.update_config(config.clone());
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use sitecraft_config::{ColorScheme, HeadingColor, Spacing};

    fn orchestrator() -> StyleOrchestrator<MemorySurface> {
        StyleOrchestrator::new(MemorySurface::new(), EventBus::new())
    }

    #[test]
    fn test_initialize_once() {
        let mut orch = orchestrator();
        let first = orch.initialize(AppConfig::default()).unwrap();
        assert_eq!(first.pass, 1);
        assert!(first.writes > 0);
        assert!(!first.style_cache_hit);
        assert!(orch.initialize(AppConfig::default()).is_none());
        assert_eq!(orch.surface().marker(DESIGN_STYLE_MARKER), Some("classic"));
        assert_eq!(orch.surface().marker(THEME_MARKER), Some("light"));
    }

    #[test]
    fn test_second_pass_writes_nothing() {
        let mut orch = orchestrator();
        orch.initialize(AppConfig::default());
        orch.update_config(AppConfig::default());
        let report = orch.flush().unwrap();
        assert_eq!(report.writes, 0);
        assert!(report.style_cache_hit);
        assert!(!report.palette_recomputed);
    }

    #[test]
    fn test_unrelated_change_hits_cache() {
        let mut orch = orchestrator();
        orch.initialize(AppConfig::default());

        let mut config = AppConfig::default();
        config.system.quick_edit_mode = true;
        config.features.blog = true;
        config.style.spacing = Spacing::Compact;
        orch.update_config(config);
        let report = orch.flush().unwrap();

        assert!(report.style_cache_hit);
        // Only the spacing variables moved.
        assert_eq!(report.writes, 4);
    }

    #[test]
    fn test_failed_family_keeps_previous_values() {
        let mut orch = orchestrator();
        orch.initialize(AppConfig::default());
        let before = orch.snapshot();

        let mut config = AppConfig::default();
        config.headings.color = HeadingColor::Custom;
        config.headings.custom_color = Some("not-a-color".into());
        config.style.border_radius = Some(BorderRadius::Pronounced);
        orch.update_config(config.clone());
        let report = orch.flush().unwrap();

        assert_eq!(report.failed, [StyleFamily::Heading]);
        let after = orch.snapshot();
        assert_eq!(
            after.property("--heading-underline-color"),
            before.property("--heading-underline-color")
        );
        assert_eq!(after.property("--radius-card"), Some("1.75rem"));

        // The failure is retried on the next pass instead of being cached.
        orch.update_config(config);
        let retry = orch.flush().unwrap();
        assert!(!retry.style_cache_hit);
        assert_eq!(retry.failed, [StyleFamily::Heading]);
    }

    #[test]
    fn test_compute_tags_result_with_family() {
        let (family, table) = compute::<BorderComputer>(&BorderWeight::Bold);
        assert_eq!(family, StyleFamily::Border);
        assert!(table.is_ok());
        let (family, _) = compute::<BorderRadiusComputer>(&BorderRadius::None);
        assert_eq!(family, StyleFamily::Radius);
        let (family, _) = compute::<BadgeStyleComputer>(&BadgeStyle::Pill);
        assert_eq!(family, StyleFamily::Badge);
        let (family, _) = compute::<HeadingDecorationComputer>(&HeadingsConfig::default());
        assert_eq!(family, StyleFamily::Heading);
    }

    #[test]
    fn test_font_override_is_applied() {
        let mut orch = orchestrator();
        orch.initialize(AppConfig::default());
        assert_eq!(
            orch.surface().property("--current-font-family"),
            Some("system")
        );

        let mut config = AppConfig::default();
        config.style.font_family = Some(FontFamily::Playfair);
        orch.update_config(config);
        let report = orch.flush().unwrap();

        assert!(!report.style_cache_hit);
        assert!(report.failed.is_empty());
        assert_eq!(
            orch.surface().property("--current-font-family"),
            Some("playfair")
        );
        // Only the three font variables changed.
        assert_eq!(report.writes, 3);
    }

    #[test]
    fn test_tick_respects_window() {
        let mut orch = orchestrator();
        let start = Instant::now();
        orch.update_config_at(AppConfig::default(), start);
        assert!(orch.tick_at(start).is_none());
        assert!(orch.tick_at(start + FRAME_INTERVAL / 2).is_none());
        assert!(orch.tick_at(start + FRAME_INTERVAL).is_some());
        assert!(!orch.is_pending());
        assert!(orch.tick_at(start + FRAME_INTERVAL * 3).is_none());
    }

    #[test]
    fn test_flush_without_config_is_noop() {
        let mut orch = orchestrator();
        assert!(orch.flush().is_none());
    }

    #[test]
    fn test_dark_mode_marker_and_scheme() {
        let mut orch = orchestrator();
        let mut config = AppConfig::default();
        config.theme.dark_mode = true;
        config.theme.color_scheme = ColorScheme::Forest;
        orch.initialize(config);
        assert_eq!(orch.surface().marker(THEME_MARKER), Some("dark"));
        assert_eq!(
            orch.surface().property("--current-color-scheme"),
            Some("forest")
        );
    }

    #[test]
    fn test_invalidate_rewrites_everything() {
        let mut orch = orchestrator();
        let first = orch.initialize(AppConfig::default()).unwrap();
        orch.invalidate();
        orch.update_config(AppConfig::default());
        let report = orch.flush().unwrap();
        assert_eq!(report.writes, first.writes);
        assert!(report.palette_recomputed);
    }
}
