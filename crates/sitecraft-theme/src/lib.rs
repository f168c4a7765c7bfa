//! Style computation and application for Sitecraft.
//!
//! Configuration flows one way: [`StyleOrchestrator`] receives
//! configurations, runs the pure [`computers`] and the
//! [`ColorSchemeApplier`], and writes the results through a deduplicating
//! [`VariableWriter`] into a [`StyleSurface`]. Presentation code reads the
//! surface, or a [`StyleSnapshot`] of it.
//!
//! # Example
//!
//! ```
//! use sitecraft_config::{AppConfig, DesignPackage};
//! use sitecraft_events::EventBus;
//! use sitecraft_theme::{MemorySurface, StyleOrchestrator, StyleSurface};
//!
//! let mut orchestrator = StyleOrchestrator::new(MemorySurface::new(), EventBus::new());
//! orchestrator.initialize(AppConfig::default());
//!
//! let mut config = AppConfig::default();
//! config.style.package = DesignPackage::Modern;
//! orchestrator.update_config(config);
//! orchestrator.flush();
//!
//! let snapshot = orchestrator.snapshot();
//! assert_eq!(snapshot.marker("data-design-style"), Some("modern"));
//! assert_eq!(orchestrator.surface().property("--radius-card"), Some("1.75rem"));
//! ```

pub mod computers;
mod error;
mod orchestrator;
mod packages;
mod palette;
mod scheme;
mod surface;
mod values;
mod variables;

pub use computers::{
    BadgeStyleComputer, BorderComputer, BorderRadiusComputer, HeadingDecorationComputer,
    StyleComputer, StyleFamily,
};
pub use error::{Result, StyleError};
pub use orchestrator::{ApplyReport, StyleOrchestrator, connect};
pub use packages::{
    PackageDefaults, ResolvedStyle, design_style_variables, font_variables, package_defaults,
    spacing_variables,
};
pub use palette::{Palette, PaletteRole, Rgb};
pub use scheme::{COLOR_SCHEME_CHANGED, ColorSchemeApplier, STYLES_APPLIED, SchemeOutcome, ThemeEvent};
pub use surface::{DESIGN_STYLE_MARKER, MemorySurface, StyleSnapshot, StyleSurface, THEME_MARKER};
pub use values::ValueTable;
pub use variables::VariableWriter;
