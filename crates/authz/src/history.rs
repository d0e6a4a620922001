use std::sync::Mutex;

/// How a navigation affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
    /// Append a new entry.
    Push,
    /// Overwrite the current entry, so back-navigation skips it.
    Replace,
}

/// Something that can move the console to another location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, kind: NavigationType);

    fn current(&self) -> String;
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

/// In-process navigation history.
#[derive(Debug)]
pub struct History {
    state: Mutex<HistoryState>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial.into()],
                index: 0,
            }),
        }
    }

    pub fn push(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(path.to_string());
        state.index = keep;
    }

    pub fn replace(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        let index = state.index;
        state.entries[index] = path.to_string();
    }

    /// Step back one entry; `None` at the start of history.
    pub fn back(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if state.index == 0 {
            return None;
        }
        state.index -= 1;
        Some(state.entries[state.index].clone())
    }

    /// Entries up to and including the current one.
    pub fn entries(&self) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.entries[..=state.index].to_vec()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str, kind: NavigationType) {
        tracing::debug!(path, ?kind, "navigating");
        match kind {
            NavigationType::Push => self.push(path),
            NavigationType::Replace => self.replace(path),
        }
    }

    fn current(&self) -> String {
        let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.entries[state.index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_hides_entry_from_back() {
        let history = History::new("/admin/users");
        history.navigate("/login", NavigationType::Replace);
        history.navigate("/admin", NavigationType::Replace);

        assert_eq!(history.current(), "/admin");
        assert_eq!(history.back(), None);
    }

    #[test]
    fn push_after_back_discards_forward_entries() {
        let history = History::new("/admin");
        history.push("/admin/users");
        history.push("/admin/tags");
        assert_eq!(history.back().as_deref(), Some("/admin/users"));

        history.push("/admin/media");
        assert_eq!(history.entries(), vec!["/admin", "/admin/users", "/admin/media"]);
    }
}
