//! Transient notices (toasts and alerts) shared by every page.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    #[serde(skip)]
    posted_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= ttl
    }
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    items: Vec<Notice>,
}

/// Handle to the notice board. Clones post to the same board.
#[derive(Debug, Clone)]
pub struct Notices {
    ttl: Duration,
    board: Arc<Mutex<Board>>,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            board: Arc::new(Mutex::new(Board::default())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn post(&self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match level {
            NoticeLevel::Error => tracing::warn!(%message, "notice"),
            _ => tracing::debug!(%message, ?level, "notice"),
        }
        let mut board = self.board();
        board.next_id += 1;
        let id = board.next_id;
        board.items.push(Notice {
            id,
            level,
            message,
            posted_at: Instant::now(),
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Info, message)
    }

    /// Remove a notice before it expires. Returns whether it was present.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut board = self.board();
        let before = board.items.len();
        board.items.retain(|notice| notice.id != id);
        board.items.len() != before
    }

    /// Notices still visible at `now`; expired ones are dropped.
    pub fn active_at(&self, now: Instant) -> Vec<Notice> {
        let ttl = self.ttl;
        let mut board = self.board();
        board.items.retain(|notice| !notice.is_expired(ttl, now));
        board.items.clone()
    }

    pub fn active(&self) -> Vec<Notice> {
        self.active_at(Instant::now())
    }

    /// Most recent visible notice.
    pub fn latest(&self) -> Option<Notice> {
        self.active().pop()
    }

    pub fn clear(&self) {
        self.board().items.clear();
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}
