//! Deduplicating writes to a style surface.

use std::collections::HashMap;

use sitecraft_config::{DesignPackage, FontFamily, Spacing};
use tracing::trace;

use crate::packages::{design_style_variables, font_variables, spacing_variables};
use crate::palette::Palette;
use crate::surface::StyleSurface;
use crate::values::ValueTable;

/// Writes style variables, skipping any whose value has not changed.
///
/// The writer remembers the last value it wrote for every name. It assumes
/// it is the surface's only writer; after anything else touches the
/// surface, call [`VariableWriter::invalidate`].
#[derive(Debug)]
pub struct VariableWriter<S> {
    surface: S,
    written: HashMap<String, String>,
}

impl<S: StyleSurface> VariableWriter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            written: HashMap::new(),
        }
    }

    /// Write `value` unless it is what was last written under `name`.
    ///
    /// Returns whether the surface was written.
    pub fn set_if_changed(&mut self, name: &str, value: &str) -> bool {
        if self.written.get(name).is_some_and(|last| last == value) {
            return false;
        }
        self.surface.set_property(name, value);
        self.written.insert(name.to_owned(), value.to_owned());
        trace!(name, value, "style variable written");
        true
    }

    /// [`VariableWriter::set_if_changed`] for each entry, in order.
    ///
    /// Returns the number of entries written. Entries are independent:
    /// there is no rollback.
    pub fn set_many<I, N, V>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        batch
            .into_iter()
            .filter(|(name, value)| self.set_if_changed(name.as_ref(), value.as_ref()))
            .count()
    }

    /// Write every entry of `table`.
    pub fn set_table(&mut self, table: &ValueTable) -> usize {
        self.set_many(table.iter())
    }

    /// Set a body-level marker. Markers are always written.
    pub fn set_marker(&mut self, name: &str, value: &str) {
        self.surface.set_marker(name, value);
    }

    /// Package-driven variables.
    pub fn set_design_style(&mut self, package: DesignPackage) -> usize {
        self.set_table(&design_style_variables(package))
    }

    /// Every palette entry.
    pub fn set_color_scheme(&mut self, palette: &Palette) -> usize {
        let written = self.set_table(&palette.variables());
        written + usize::from(self.set_if_changed("--current-color-scheme", palette.scheme.as_str()))
    }

    /// Base and heading font stacks.
    pub fn set_font_family(&mut self, font: FontFamily) -> usize {
        self.set_table(&font_variables(font))
    }

    pub fn set_spacing(&mut self, spacing: Spacing) -> usize {
        self.set_table(&spacing_variables(spacing))
    }

    /// Forget what was written, so the next write of each name goes through.
    pub fn invalidate(&mut self) {
        self.written.clear();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use sitecraft_config::ColorScheme;

    #[test]
    fn test_set_if_changed_dedups() {
        let mut writer = VariableWriter::new(MemorySurface::new());
        assert!(writer.set_if_changed("--a", "1"));
        assert!(!writer.set_if_changed("--a", "1"));
        assert!(writer.set_if_changed("--a", "2"));
        assert_eq!(writer.surface().property_writes(), 2);
        assert_eq!(writer.surface().property("--a"), Some("2"));
    }

    #[test]
    fn test_set_many_counts_only_changes() {
        let mut writer = VariableWriter::new(MemorySurface::new());
        writer.set_if_changed("--a", "1");
        let written = writer.set_many([("--a", "1"), ("--b", "2"), ("--c", "3")]);
        assert_eq!(written, 2);
    }

    #[test]
    fn test_invalidate_rewrites() {
        let mut writer = VariableWriter::new(MemorySurface::new());
        let first = writer.set_design_style(DesignPackage::Elegant);
        assert!(first > 0);
        assert_eq!(writer.set_design_style(DesignPackage::Elegant), 0);
        writer.invalidate();
        assert_eq!(writer.set_design_style(DesignPackage::Elegant), first);
    }

    #[test]
    fn test_set_font_family_dedups() {
        let mut writer = VariableWriter::new(MemorySurface::new());
        let first = writer.set_font_family(FontFamily::Playfair);
        assert_eq!(first, font_variables(FontFamily::Playfair).len());
        assert_eq!(writer.set_font_family(FontFamily::Playfair), 0);
        assert_eq!(writer.surface().property("--current-font-family"), Some("playfair"));

        let switched = writer.set_font_family(FontFamily::Inter);
        assert!(switched > 0);
        assert_eq!(writer.surface().property("--current-font-family"), Some("inter"));
        assert_eq!(writer.surface().property_writes(), first + switched);
    }

    #[test]
    fn test_color_scheme_switch_writes_changed_entries_only() {
        let mut writer = VariableWriter::new(MemorySurface::new());
        writer.set_color_scheme(&Palette::for_scheme(ColorScheme::Ocean));
        let written = writer.set_color_scheme(&Palette::for_scheme(ColorScheme::Slate));
        // Both palettes share white backgrounds and the same text colors.
        let total = Palette::for_scheme(ColorScheme::Slate).variables().len() + 1;
        assert!(written < total);
        assert_eq!(writer.surface().property("--current-color-scheme"), Some("slate"));
    }
}
