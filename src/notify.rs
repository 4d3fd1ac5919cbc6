// SPDX-License-Identifier: MPL-2.0
//! Local notification scheduling.
//!
//! The scheduler queues notifications for future delivery and hands the due
//! ones back on each tick; presentation is the toast system's job. There is
//! no background thread: pending deliveries are plain data compared against
//! the tick timestamp, so dropping the scheduler cancels everything.

use crate::app::Screen;
use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Shortest allowed delivery delay. Sub-second requests are rounded up.
pub const MIN_DELAY_SECS: u64 = 1;

/// Unique identifier for a scheduled delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryId(u64);

impl DeliveryId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A notification waiting for its delivery time.
#[derive(Debug, Clone)]
pub struct Pending {
    pub id: DeliveryId,
    pub title: String,
    pub body: String,
    pub deliver_at: Instant,
    /// Screen to open when the delivered notification is tapped.
    pub target: Option<Screen>,
}

/// A notification whose delivery time has arrived.
#[derive(Debug, Clone)]
pub struct Delivered {
    pub id: DeliveryId,
    pub title: String,
    pub body: String,
    pub target: Option<Screen>,
}

/// Queues local notifications for delayed delivery.
#[derive(Debug)]
pub struct Scheduler {
    enabled: bool,
    pending: Vec<Pending>,
}

impl Scheduler {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: Vec::new(),
        }
    }

    /// Whether scheduling is currently permitted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the permission gate. Disabling does not drop already-scheduled
    /// deliveries; it only refuses new ones.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Schedules a notification `delay_secs` from `now`.
    ///
    /// Fails when notifications are disabled. The delay is clamped to at
    /// least [`MIN_DELAY_SECS`].
    pub fn schedule(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        delay_secs: u64,
        target: Option<Screen>,
        now: Instant,
    ) -> Result<DeliveryId> {
        if !self.enabled {
            return Err(Error::NotificationsDisabled);
        }
        let delay = delay_secs.max(MIN_DELAY_SECS);
        let id = DeliveryId::next();
        self.pending.push(Pending {
            id,
            title: title.into(),
            body: body.into(),
            deliver_at: now + Duration::from_secs(delay),
            target,
        });
        Ok(id)
    }

    /// Removes and returns every delivery due at `now`, oldest first.
    pub fn tick(&mut self, now: Instant) -> Vec<Delivered> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|pending| {
            if pending.deliver_at <= now {
                due.push(pending.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|pending| pending.deliver_at);
        due.into_iter()
            .map(|pending| Delivered {
                id: pending.id,
                title: pending.title,
                body: pending.body,
                target: pending.target,
            })
            .collect()
    }

    /// Cancels one scheduled delivery. Returns whether it was found.
    pub fn cancel(&mut self, id: DeliveryId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.id != id);
        self.pending.len() != before
    }

    /// Cancels every scheduled delivery.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Currently scheduled deliveries, in scheduling order.
    #[must_use]
    pub fn pending(&self) -> &[Pending] {
        &self.pending
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn delivers_only_after_the_delay() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler
            .schedule("Title", "Body", 3, None, t0)
            .expect("scheduling should succeed");

        assert!(scheduler.tick(t0 + secs(2)).is_empty());

        let delivered = scheduler.tick(t0 + secs(3));
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Title");
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn delivery_preserves_target_screen() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler
            .schedule("Video Loaded", "Ready", 1, Some(Screen::Video), t0)
            .unwrap();

        let delivered = scheduler.tick(t0 + secs(1));
        assert_eq!(delivered[0].target, Some(Screen::Video));
    }

    #[test]
    fn due_deliveries_come_out_oldest_first() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler.schedule("Second", "", 5, None, t0).unwrap();
        scheduler.schedule("First", "", 2, None, t0).unwrap();

        let delivered = scheduler.tick(t0 + secs(10));
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].title, "First");
        assert_eq!(delivered[1].title, "Second");
    }

    #[test]
    fn schedule_fails_while_disabled() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(false);
        assert!(matches!(
            scheduler.schedule("Title", "Body", 1, None, t0),
            Err(Error::NotificationsDisabled)
        ));
    }

    #[test]
    fn disabling_keeps_existing_deliveries() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler.schedule("Title", "Body", 1, None, t0).unwrap();

        scheduler.set_enabled(false);
        assert_eq!(scheduler.tick(t0 + secs(1)).len(), 1);
    }

    #[test]
    fn zero_delay_is_clamped_to_minimum() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler.schedule("Title", "Body", 0, None, t0).unwrap();

        assert!(scheduler.tick(t0).is_empty());
        assert_eq!(scheduler.tick(t0 + secs(1)).len(), 1);
    }

    #[test]
    fn cancel_removes_a_single_delivery() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        let keep = scheduler.schedule("Keep", "", 1, None, t0).unwrap();
        let drop = scheduler.schedule("Drop", "", 1, None, t0).unwrap();

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));

        let delivered = scheduler.tick(t0 + secs(1));
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].id, keep);
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(true);
        scheduler.schedule("A", "", 1, None, t0).unwrap();
        scheduler.schedule("B", "", 2, None, t0).unwrap();

        scheduler.cancel_all();
        assert!(!scheduler.has_pending());
        assert!(scheduler.tick(t0 + secs(5)).is_empty());
    }
}
