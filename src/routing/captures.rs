//! Capture lookup used by template rendering.

/// Read-only view over the groups of a successful match.
pub trait CaptureLookup {
    /// Value of a named group, `None` if the group does not exist or did
    /// not participate in the match.
    fn named(&self, name: &str) -> Option<&str>;

    /// Value of a group by index, `0` being the whole match.
    fn positional(&self, index: usize) -> Option<&str>;
}

impl CaptureLookup for regex::Captures<'_> {
    fn named(&self, name: &str) -> Option<&str> {
        self.name(name).map(|m| m.as_str())
    }

    fn positional(&self, index: usize) -> Option<&str> {
        self.get(index).map(|m| m.as_str())
    }
}
