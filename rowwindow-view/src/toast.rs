//! A bounded notification queue with FIFO eviction and tick-driven expiry.
//!
//! The queue is an ordinary value: construct one, hand `&mut ToastQueue` to whatever raises
//! notifications, and call [`ToastQueue::tick`] from the host's frame or timer loop.
//!
//! ```
//! use rowwindow_view::{ToastConfig, ToastKind, ToastQueue};
//!
//! let mut toasts = ToastQueue::new(ToastConfig::new().with_capacity(2));
//! let saved = toasts.push(ToastKind::Success, "Folio split saved", 0).id;
//! toasts.push(ToastKind::Info, "Room 204 checked in", 10);
//! let out = toasts.push(ToastKind::Warning, "Rate plan expires soon", 20);
//! assert_eq!(out.evicted, Some(saved));
//! assert_eq!(toasts.len(), 2);
//! ```

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

pub const DEFAULT_TOAST_CAPACITY: usize = 5;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5_000;

/// Identifies a toast for the lifetime of its queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToastKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

/// How long a toast stays up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastDuration {
    /// The queue's default for the toast's kind.
    #[default]
    Default,
    Millis(u64),
    /// Stays until dismissed or evicted.
    Sticky,
}

/// A notification waiting to be pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: Option<String>,
    pub message: String,
    pub duration: ToastDuration,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            duration: ToastDuration::Default,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration = ToastDuration::Millis(duration_ms);
        self
    }

    pub fn sticky(mut self) -> Self {
        self.duration = ToastDuration::Sticky;
        self
    }
}

/// A toast that is currently in the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedToast {
    pub id: ToastId,
    pub toast: Toast,
    pub created_ms: u64,
    /// `None` for sticky toasts.
    pub expires_at_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToastConfig {
    /// Maximum number of toasts held at once. Zero is treated as one.
    pub capacity: usize,
    /// Lifetime of non-error toasts. Error toasts stay up twice as long.
    pub default_duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TOAST_CAPACITY,
            default_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl ToastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_default_duration_ms(mut self, duration_ms: u64) -> Self {
        self.default_duration_ms = duration_ms;
        self
    }

    fn duration_for(&self, toast: &Toast) -> Option<u64> {
        match toast.duration {
            ToastDuration::Millis(ms) => Some(ms),
            ToastDuration::Sticky => None,
            ToastDuration::Default if toast.kind == ToastKind::Error => {
                Some(self.default_duration_ms.saturating_mul(2))
            }
            ToastDuration::Default => Some(self.default_duration_ms),
        }
    }
}

/// Result of [`ToastQueue::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushOutcome {
    pub id: ToastId,
    /// The oldest toast, if it had to make room.
    pub evicted: Option<ToastId>,
}

/// Counters for monitoring and debugging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToastStats {
    pub pushed: u64,
    pub evicted: u64,
    pub expired: u64,
    pub dismissed: u64,
}

#[derive(Clone, Debug)]
pub struct ToastQueue {
    config: ToastConfig,
    entries: VecDeque<QueuedToast>,
    next_id: u64,
    stats: ToastStats,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl ToastQueue {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            entries: VecDeque::with_capacity(config.capacity.max(1)),
            next_id: 1,
            stats: ToastStats::default(),
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity.max(1)
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now_ms: u64) -> PushOutcome {
        self.push_toast(Toast::new(kind, message), now_ms)
    }

    /// Adds a toast at the back, evicting the oldest one when the queue is full.
    pub fn push_toast(&mut self, toast: Toast, now_ms: u64) -> PushOutcome {
        let evicted = if self.entries.len() >= self.capacity() {
            self.stats.evicted += 1;
            self.entries.pop_front().map(|e| e.id)
        } else {
            None
        };

        let id = ToastId(self.next_id);
        self.next_id += 1;
        let expires_at_ms = self
            .config
            .duration_for(&toast)
            .map(|d| now_ms.saturating_add(d));
        wdebug!(id = id.get(), kind = ?toast.kind, ?evicted, "ToastQueue::push");
        self.entries.push_back(QueuedToast {
            id,
            toast,
            created_ms: now_ms,
            expires_at_ms,
        });
        self.stats.pushed += 1;

        PushOutcome { id, evicted }
    }

    /// Removes a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries.remove(pos);
        self.stats.dismissed += 1;
        true
    }

    pub fn clear(&mut self) {
        self.stats.dismissed += self.entries.len() as u64;
        self.entries.clear();
    }

    /// Drops every toast whose lifetime has elapsed and returns their ids, oldest first.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.entries.retain(|e| match e.expires_at_ms {
            Some(at) if now_ms >= at => {
                expired.push(e.id);
                false
            }
            _ => true,
        });
        if !expired.is_empty() {
            self.stats.expired += expired.len() as u64;
            wtrace!(count = expired.len(), now_ms, "ToastQueue::tick expired");
        }
        expired
    }

    /// Toasts in arrival order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &QueuedToast> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn get(&self, id: ToastId) -> Option<&QueuedToast> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> ToastStats {
        self.stats
    }
}
