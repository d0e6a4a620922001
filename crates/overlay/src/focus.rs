use crate::element::{Element, ElementId};

/// Result of a Tab press inside a trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusMove {
    /// Nothing focusable; the key is ignored.
    None,
    /// Ordinary move to the adjacent element.
    Next(ElementId),
    /// Moved past an edge and wrapped to the other end.
    Wrapped(ElementId),
}

impl FocusMove {
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            FocusMove::None => None,
            FocusMove::Next(id) | FocusMove::Wrapped(id) => Some(id),
        }
    }
}

/// Tab cycling restricted to the focusable elements of one panel.
#[derive(Debug, Clone, Default)]
pub struct FocusTrap {
    order: Vec<ElementId>,
}

impl FocusTrap {
    pub fn new(elements: &[Element]) -> Self {
        Self {
            order: elements
                .iter()
                .filter(|e| e.is_focusable())
                .map(|e| e.id.clone())
                .collect(),
        }
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.order.contains(id)
    }

    pub fn first(&self) -> Option<&ElementId> {
        self.order.first()
    }

    pub fn last(&self) -> Option<&ElementId> {
        self.order.last()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Where focus goes when Tab (or Shift+Tab with `backwards`) is pressed
    /// while `active` has focus. Focus outside the trap enters at the
    /// nearest edge.
    pub fn step(&self, active: Option<&ElementId>, backwards: bool) -> FocusMove {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return FocusMove::None;
        };

        let position = active.and_then(|id| self.order.iter().position(|o| o == id));
        let Some(position) = position else {
            let entry = if backwards { last } else { first };
            return FocusMove::Next(entry.clone());
        };

        if backwards {
            if position == 0 {
                FocusMove::Wrapped(last.clone())
            } else {
                FocusMove::Next(self.order[position - 1].clone())
            }
        } else if position + 1 == self.order.len() {
            FocusMove::Wrapped(first.clone())
        } else {
            FocusMove::Next(self.order[position + 1].clone())
        }
    }
}
