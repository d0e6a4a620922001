use std::time::Duration;

use crate::element::{Element, ElementId};
use crate::focus::{FocusMove, FocusTrap};
use crate::scroll_lock::{ScrollLock, ScrollLockGuard};

/// Delay before the close control receives focus after opening.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Centered dialog used by create/edit forms and the media library.
    Modal,
    /// Right-hand editor panel.
    SidePanel,
    /// Mobile navigation drawer.
    Drawer,
}

impl OverlayKind {
    pub fn close_label(self) -> &'static str {
        match self {
            OverlayKind::Modal => "Close",
            OverlayKind::SidePanel => "Close panel",
            OverlayKind::Drawer => "Close menu",
        }
    }

    fn close_control_id(self) -> &'static str {
        match self {
            OverlayKind::Modal => "modal-close",
            OverlayKind::SidePanel => "panel-close",
            OverlayKind::Drawer => "drawer-close",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
    Enter,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    Key(Key),
    /// Click on the dimmed area outside the panel.
    BackdropClick,
    /// Click anywhere inside the panel.
    PanelClick,
    CloseClick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Ignored,
    Focus(FocusMove),
    /// The overlay closed; focus should return to `restore_focus`.
    Closed { restore_focus: Option<ElementId> },
}

#[derive(Debug)]
struct OpenState {
    previous_focus: Option<ElementId>,
    initial_focus_pending: bool,
    _lock: ScrollLockGuard,
}

/// A focus-trapped container rendered above the page.
///
/// The panel always starts with its close control, followed by the
/// caller-supplied content elements in document order.
#[derive(Debug)]
pub struct Overlay {
    kind: OverlayKind,
    title: String,
    close_control: Element,
    content: Vec<Element>,
    lock: ScrollLock,
    focus_delay: Duration,
    open: Option<OpenState>,
    active: Option<ElementId>,
}

impl Overlay {
    pub fn new(kind: OverlayKind, title: impl Into<String>, lock: ScrollLock) -> Self {
        Self {
            kind,
            title: title.into(),
            close_control: Element::button(kind.close_control_id()),
            content: Vec::new(),
            lock,
            focus_delay: DEFAULT_FOCUS_DELAY,
            open: None,
            active: None,
        }
    }

    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    pub fn with_content(mut self, content: Vec<Element>) -> Self {
        self.content = content;
        self
    }

    pub fn set_content(&mut self, content: Vec<Element>) {
        self.content = content;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn close_control(&self) -> &ElementId {
        &self.close_control.id
    }

    /// Panel elements in document order.
    pub fn elements(&self) -> Vec<Element> {
        std::iter::once(self.close_control.clone())
            .chain(self.content.iter().cloned())
            .collect()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.active.as_ref()
    }

    /// Open the overlay, remembering `previously_focused` for restoration.
    /// Opening an open overlay changes nothing.
    pub fn open(&mut self, previously_focused: Option<ElementId>) {
        if self.open.is_some() {
            return;
        }
        tracing::debug!(kind = ?self.kind, title = %self.title, "overlay opened");
        self.open = Some(OpenState {
            previous_focus: previously_focused,
            initial_focus_pending: true,
            _lock: self.lock.acquire(),
        });
        self.active = None;
    }

    /// Apply the pending initial focus to the close control.
    pub fn paint(&mut self) {
        if let Some(state) = self.open.as_mut() {
            if state.initial_focus_pending {
                state.initial_focus_pending = false;
                self.active = Some(self.close_control.id.clone());
            }
        }
    }

    /// Wait out the focus delay, then paint.
    pub async fn settle(&mut self) {
        let pending = self
            .open
            .as_ref()
            .is_some_and(|state| state.initial_focus_pending);
        if pending {
            tokio::time::sleep(self.focus_delay).await;
            self.paint();
        }
    }

    /// Move focus to a focusable element inside the panel.
    pub fn focus(&mut self, id: &ElementId) -> bool {
        if !FocusTrap::new(&self.elements()).contains(id) {
            return false;
        }
        let Some(state) = self.open.as_mut() else {
            return false;
        };
        state.initial_focus_pending = false;
        self.active = Some(id.clone());
        true
    }

    /// Close the overlay, releasing its scroll lock hold. Returns the
    /// element that had focus before opening.
    pub fn close(&mut self) -> Option<ElementId> {
        let state = self.open.take()?;
        self.active = None;
        tracing::debug!(kind = ?self.kind, title = %self.title, "overlay closed");
        state.previous_focus
    }

    pub fn handle(&mut self, input: OverlayInput) -> OverlayEvent {
        if self.open.is_none() {
            return OverlayEvent::Ignored;
        }

        match input {
            OverlayInput::Key(Key::Escape)
            | OverlayInput::BackdropClick
            | OverlayInput::CloseClick => OverlayEvent::Closed {
                restore_focus: self.close(),
            },
            OverlayInput::Key(Key::Tab { shift }) => {
                let step = FocusTrap::new(&self.elements()).step(self.active.as_ref(), shift);
                if let Some(target) = step.target() {
                    self.active = Some(target.clone());
                    if let Some(state) = self.open.as_mut() {
                        state.initial_focus_pending = false;
                    }
                }
                OverlayEvent::Focus(step)
            }
            OverlayInput::Key(_) | OverlayInput::PanelClick => OverlayEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn modal(lock: &ScrollLock) -> Overlay {
        Overlay::new(OverlayKind::Modal, "Edit User", lock.clone())
            .with_content(vec![Element::input("email")])
    }

    #[test]
    fn open_locks_and_close_restores_focus() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock);

        overlay.open(Some("add-user".into()));
        assert!(lock.is_locked());
        assert_eq!(overlay.focused(), None);

        overlay.paint();
        assert_eq!(overlay.focused(), Some(&ElementId::from("modal-close")));

        assert_eq!(overlay.close(), Some(ElementId::from("add-user")));
        assert!(!lock.is_locked());
    }

    #[test]
    fn double_open_and_double_close_release_once() {
        let lock = ScrollLock::new();
        let mut a = modal(&lock);
        let mut b = modal(&lock);

        a.open(None);
        a.open(None);
        b.open(None);
        assert_eq!(lock.holders(), 2);

        a.close();
        a.close();
        assert_eq!(lock.holders(), 1);

        b.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn dropping_open_overlay_releases_lock() {
        let lock = ScrollLock::new();
        {
            let mut overlay = modal(&lock);
            overlay.open(None);
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn two_controls_wrap_both_ways() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock);
        overlay.open(None);
        overlay.paint();

        let first = overlay.close_control().clone();
        let second = ElementId::from("email");

        let event = overlay.handle(OverlayInput::Key(Key::Tab { shift: true }));
        assert_eq!(event, OverlayEvent::Focus(FocusMove::Wrapped(second.clone())));
        assert_eq!(overlay.focused(), Some(&second));

        let event = overlay.handle(OverlayInput::Key(Key::Tab { shift: false }));
        assert_eq!(event, OverlayEvent::Focus(FocusMove::Wrapped(first.clone())));
        assert_eq!(overlay.focused(), Some(&first));
    }

    #[test]
    fn close_triggers() {
        let lock = ScrollLock::new();
        for trigger in [
            OverlayInput::Key(Key::Escape),
            OverlayInput::BackdropClick,
            OverlayInput::CloseClick,
        ] {
            let mut overlay = modal(&lock);
            overlay.open(Some("opener".into()));
            assert_eq!(
                overlay.handle(trigger),
                OverlayEvent::Closed {
                    restore_focus: Some("opener".into())
                }
            );
            assert!(!overlay.is_open());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn panel_click_and_other_keys_are_ignored() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock);
        overlay.open(None);

        assert_eq!(overlay.handle(OverlayInput::PanelClick), OverlayEvent::Ignored);
        assert_eq!(
            overlay.handle(OverlayInput::Key(Key::Character('a'))),
            OverlayEvent::Ignored
        );
        assert!(overlay.is_open());
    }

    #[test]
    fn closed_overlay_ignores_input() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock);
        assert_eq!(
            overlay.handle(OverlayInput::Key(Key::Escape)),
            OverlayEvent::Ignored
        );
    }

    #[test]
    fn focus_rejects_elements_outside_panel() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock).with_content(vec![
            Element::input("email"),
            Element::new("hint", ElementKind::Generic),
        ]);
        overlay.open(None);

        assert!(overlay.focus(&"email".into()));
        assert!(!overlay.focus(&"hint".into()));
        assert!(!overlay.focus(&"page-search".into()));
        assert_eq!(overlay.focused(), Some(&ElementId::from("email")));
    }

    #[tokio::test]
    async fn settle_focuses_close_control_after_delay() {
        let lock = ScrollLock::new();
        let mut overlay = modal(&lock).with_focus_delay(Duration::from_millis(5));
        overlay.open(None);
        overlay.settle().await;
        assert_eq!(overlay.focused(), Some(&ElementId::from("modal-close")));
    }
}
