use std::borrow::Borrow;
use std::fmt;

/// Stable identifier of an interactive element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Anchor; only focusable with an `href`.
    Link { href: bool },
    Button,
    Input,
    Select,
    TextArea,
    /// Anything else; focusable only through a tab index.
    Generic,
}

/// An element inside an overlay panel, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub disabled: bool,
    pub tab_index: Option<i32>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            disabled: false,
            tab_index: None,
        }
    }

    pub fn button(id: impl Into<ElementId>) -> Self {
        Self::new(id, ElementKind::Button)
    }

    pub fn input(id: impl Into<ElementId>) -> Self {
        Self::new(id, ElementKind::Input)
    }

    pub fn link(id: impl Into<ElementId>) -> Self {
        Self::new(id, ElementKind::Link { href: true })
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Mirrors the selector
    /// `a[href], button:not([disabled]), input, select, textarea, [tabindex]:not([tabindex="-1"])`.
    pub fn is_focusable(&self) -> bool {
        let by_kind = match self.kind {
            ElementKind::Link { href } => href,
            ElementKind::Button => !self.disabled,
            ElementKind::Input | ElementKind::Select | ElementKind::TextArea => true,
            ElementKind::Generic => false,
        };
        by_kind || matches!(self.tab_index, Some(index) if index != -1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focusability_follows_selector() {
        assert!(Element::button("save").is_focusable());
        assert!(!Element::button("save").disabled().is_focusable());
        assert!(!Element::new("a", ElementKind::Link { href: false }).is_focusable());
        assert!(Element::new("div", ElementKind::Generic)
            .with_tab_index(0)
            .is_focusable());
        assert!(!Element::new("div", ElementKind::Generic)
            .with_tab_index(-1)
            .is_focusable());
        // A disabled button with an explicit tab index still matches the tabindex clause.
        assert!(Element::button("b").disabled().with_tab_index(0).is_focusable());
    }
}
