//! Ordered name/value tables produced by the style tables and computers.

/// An ordered list of style variables.
///
/// Names are compile-time constants; values are computed. Order is the
/// order entries were pushed, which is also the order they are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueTable {
    entries: Vec<(&'static str, String)>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry. A repeated name is appended again, not replaced.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    /// Builder form of [`ValueTable::push`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Value of the last entry named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}
