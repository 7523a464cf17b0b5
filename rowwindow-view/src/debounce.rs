/// Quiet period before a search keystroke is applied.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// A single-slot, cancellable timer that holds the latest value until input goes quiet.
///
/// Time is supplied by the caller (`now_ms`), so the timer needs no runtime and is fully
/// deterministic. Starting while a value is pending replaces the value and restarts the timer.
///
/// ```
/// use rowwindow_view::Debouncer;
///
/// let mut d = Debouncer::new(300);
/// d.start("ro", 0);
/// d.start("roo", 120);
/// assert_eq!(d.poll(400), None);
/// assert_eq!(d.poll(420), Some("roo"));
/// assert!(!d.is_pending());
/// ```
#[derive(Clone, Debug)]
pub struct Debouncer<V> {
    delay_ms: u64,
    pending: Option<Pending<V>>,
    disposed: bool,
}

#[derive(Clone, Debug)]
struct Pending<V> {
    value: V,
    deadline_ms: u64,
}

impl<V> Debouncer<V> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
            disposed: false,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the quiet period. A pending value keeps its current deadline.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Arms (or re-arms) the timer with `value`.
    ///
    /// Returns `false` once the debouncer has been disposed.
    pub fn start(&mut self, value: V, now_ms: u64) -> bool {
        if self.disposed {
            return false;
        }
        self.pending = Some(Pending {
            value,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
        true
    }

    /// Disarms the timer, handing back the value that would have fired.
    pub fn cancel(&mut self) -> Option<V> {
        self.pending.take().map(|p| p.value)
    }

    /// Cancels any pending value and refuses further starts.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }

    pub fn pending_value(&self) -> Option<&V> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Fires once the deadline has passed, returning the latest value.
    pub fn poll(&mut self, now_ms: u64) -> Option<V> {
        match &self.pending {
            Some(p) if now_ms >= p.deadline_ms => self.cancel(),
            _ => None,
        }
    }

    /// Fires immediately if anything is pending (e.g. the user pressed Enter).
    pub fn flush(&mut self) -> Option<V> {
        self.cancel()
    }
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}
