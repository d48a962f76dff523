//! Transient notifications shown in the corner of the page.
//!
//! The queue only tracks membership and order. Expiry belongs to the view:
//! every rendered toast holds a [`ToastExpiry`] that schedules one timer of
//! [`TOAST_LIFETIME_MS`] and cancels it when the toast leaves the page first.

pub const TOAST_LIFETIME_MS: u32 = 4_500;

pub type ToastId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✕",
        }
    }
}

/// A toast before it has been queued and given an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastDraft {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

impl ToastDraft {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    last_id: ToastId,
}

impl ToastQueue {
    /// Appends `draft` and returns its id.
    ///
    /// Ids come from the creation time in milliseconds, bumped past the last
    /// issued id so two toasts created in the same millisecond stay distinct.
    pub fn add(&mut self, draft: ToastDraft, now_ms: u64) -> ToastId {
        let id = now_ms.max(self.last_id.saturating_add(1));
        self.last_id = id;
        self.toasts.push(Toast {
            id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
        });
        id
    }

    /// Removes the toast with `id`. Returns false when it was already gone.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// One-shot timer backend for toast expiry.
pub trait ExpiryTimer {
    /// Arms the timer; when it fires the toast `id` should be removed.
    fn schedule(&mut self, id: ToastId, delay_ms: u32);
    /// Disarms the timer for `id`. Must be a no-op once it has fired.
    fn cancel(&mut self, id: ToastId);
}

/// Expiry timer for a single rendered toast, armed on creation and cancelled
/// on `Drop`.
pub struct ToastExpiry<T: ExpiryTimer> {
    timer: T,
    id: ToastId,
}

impl<T: ExpiryTimer> ToastExpiry<T> {
    pub fn start(mut timer: T, id: ToastId) -> Self {
        timer.schedule(id, TOAST_LIFETIME_MS);
        Self { timer, id }
    }

    #[cfg(test)]
    pub fn id(&self) -> ToastId {
        self.id
    }
}

impl<T: ExpiryTimer> Drop for ToastExpiry<T> {
    fn drop(&mut self) {
        self.timer.cancel(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug)]
    struct Scheduled {
        id: ToastId,
        delay_ms: u32,
        due_at: u64,
        live: bool,
    }

    /// Manual clock standing in for the browser's timer queue.
    #[derive(Default)]
    struct ManualClock {
        now: u64,
        timers: Vec<Scheduled>,
    }

    impl ManualClock {
        /// Moves time forward and returns the ids whose timers fired.
        fn advance(&mut self, ms: u64) -> Vec<ToastId> {
            self.now += ms;
            let now = self.now;
            self.timers
                .iter_mut()
                .filter(|timer| timer.live && timer.due_at <= now)
                .map(|timer| {
                    timer.live = false;
                    timer.id
                })
                .collect()
        }

        fn live_timers(&self) -> usize {
            self.timers.iter().filter(|timer| timer.live).count()
        }
    }

    struct ManualTimer {
        clock: Rc<RefCell<ManualClock>>,
        slot: Option<usize>,
    }

    impl ManualTimer {
        fn new(clock: &Rc<RefCell<ManualClock>>) -> Self {
            Self {
                clock: Rc::clone(clock),
                slot: None,
            }
        }
    }

    impl ExpiryTimer for ManualTimer {
        fn schedule(&mut self, id: ToastId, delay_ms: u32) {
            let mut clock = self.clock.borrow_mut();
            let due_at = clock.now + u64::from(delay_ms);
            clock.timers.push(Scheduled {
                id,
                delay_ms,
                due_at,
                live: true,
            });
            self.slot = Some(clock.timers.len() - 1);
        }

        fn cancel(&mut self, id: ToastId) {
            if let Some(slot) = self.slot.take() {
                let mut clock = self.clock.borrow_mut();
                assert_eq!(clock.timers[slot].id, id);
                clock.timers[slot].live = false;
            }
        }
    }

    #[test]
    fn add_then_remove_leaves_queue_empty() {
        let mut queue = ToastQueue::default();
        let id = queue.add(ToastDraft::success("Message Sent!", "Thanks."), 1_700_000_000_000);

        assert_eq!(queue.len(), 1);
        assert!(queue.remove(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut queue = ToastQueue::default();
        let id = queue.add(ToastDraft::error("Send Failed", "Try again."), 10);

        assert!(queue.remove(id));
        assert!(!queue.remove(id));
        assert!(!queue.remove(9_999));
        assert!(queue.is_empty());
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut queue = ToastQueue::default();
        let first = queue.add(ToastDraft::error("a", "a"), 500);
        let second = queue.add(ToastDraft::error("b", "b"), 500);
        let third = queue.add(ToastDraft::error("c", "c"), 499);

        assert_eq!(first, 500);
        assert_eq!(second, 501);
        assert_eq!(third, 502);
    }

    #[test]
    fn duplicates_are_kept_in_insertion_order() {
        let mut queue = ToastQueue::default();
        queue.add(ToastDraft::error("Send Failed", "x"), 1);
        queue.add(ToastDraft::error("Send Failed", "x"), 2);
        queue.add(ToastDraft::success("Message Sent!", "y"), 3);

        let titles: Vec<&str> = queue.iter().map(|toast| toast.title.as_str()).collect();
        assert_eq!(titles, ["Send Failed", "Send Failed", "Message Sent!"]);
    }

    #[test]
    fn every_toast_expiring_empties_the_queue() {
        let mut queue = ToastQueue::default();
        let ids: Vec<ToastId> = (0..5)
            .map(|index| queue.add(ToastDraft::success("ok", "ok"), 1_000 + index))
            .collect();

        // Timers fire in arbitrary order.
        for id in ids.iter().rev() {
            assert!(queue.remove(*id));
        }

        assert!(queue.is_empty());
    }

    #[test]
    fn manual_dismiss_before_expiry_makes_the_timer_a_no_op() {
        let mut queue = ToastQueue::default();
        let dismissed = queue.add(ToastDraft::success("a", "a"), 1);
        let kept = queue.add(ToastDraft::success("b", "b"), 2);

        assert!(queue.remove(dismissed));
        // Stale expiry for the dismissed toast.
        assert!(!queue.remove(dismissed));

        assert_eq!(queue.iter().map(|toast| toast.id).collect::<Vec<_>>(), [kept]);
    }

    #[test]
    fn expiry_timer_removes_the_toast_after_its_lifetime() {
        let clock = Rc::new(RefCell::new(ManualClock::default()));
        let mut queue = ToastQueue::default();
        let id = queue.add(ToastDraft::success("Message Sent!", "Thanks."), 1);
        let expiry = ToastExpiry::start(ManualTimer::new(&clock), id);

        assert_eq!(clock.borrow().timers[0].delay_ms, 4_500);
        assert!(clock.borrow_mut().advance(4_499).is_empty());

        let fired = clock.borrow_mut().advance(1);
        assert_eq!(fired, [expiry.id()]);
        for id in fired {
            assert!(queue.remove(id));
        }
        // The view unmounts once the toast is gone.
        drop(expiry);

        assert!(queue.is_empty());
        assert_eq!(clock.borrow().live_timers(), 0);
    }

    #[test]
    fn dismissing_first_cancels_the_expiry_timer() {
        let clock = Rc::new(RefCell::new(ManualClock::default()));
        let mut queue = ToastQueue::default();
        let id = queue.add(ToastDraft::error("Send Failed", "Try again."), 1);
        let expiry = ToastExpiry::start(ManualTimer::new(&clock), id);
        assert_eq!(clock.borrow().live_timers(), 1);

        assert!(queue.remove(id));
        drop(expiry);

        assert_eq!(clock.borrow().live_timers(), 0);
        assert!(clock.borrow_mut().advance(10_000).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn many_toasts_leave_no_live_timers() {
        let clock = Rc::new(RefCell::new(ManualClock::default()));
        let mut queue = ToastQueue::default();
        let mut expiries: Vec<ToastExpiry<ManualTimer>> = (0..5)
            .map(|index| {
                let id = queue.add(ToastDraft::success("ok", "ok"), 100 + index);
                ToastExpiry::start(ManualTimer::new(&clock), id)
            })
            .collect();
        assert_eq!(clock.borrow().live_timers(), 5);

        let dismissed = expiries.remove(2);
        assert!(queue.remove(dismissed.id()));
        drop(dismissed);
        assert_eq!(clock.borrow().live_timers(), 4);

        let fired = clock.borrow_mut().advance(u64::from(TOAST_LIFETIME_MS));
        assert_eq!(fired.len(), 4);
        for id in fired {
            assert!(queue.remove(id));
            expiries.retain(|expiry| expiry.id() != id);
        }

        assert!(expiries.is_empty());
        assert!(queue.is_empty());
        assert_eq!(clock.borrow().live_timers(), 0);
        assert!(clock
            .borrow()
            .timers
            .iter()
            .all(|timer| timer.delay_ms == TOAST_LIFETIME_MS));
    }
}
