//! One-shot scheduled events
//!
//! Delayed effects (getting up after a fall, invincibility expiry, the yeti's
//! bite animation) are queued against a tick deadline and fired by the tick
//! driver. They cannot be cancelled; every handler re-checks state instead.

/// Payload of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Fallen skier stands back up
    GetUp,
    /// Post-fall invincibility window closes
    EndInvincibility,
    /// Yeti switches from the eating pose to the picking pose
    YetiPick { yeti_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub due_tick: u64,
    pub event: TimerEvent,
}

/// Pending events in scheduling order
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<ScheduledEvent>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once `delay_ticks` ticks have passed since `now`
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, event: TimerEvent) {
        self.pending.push(ScheduledEvent {
            due_tick: now + delay_ticks,
            event,
        });
    }

    /// Remove and return every event due at or before `now`, oldest first
    pub fn take_due(&mut self, now: u64) -> Vec<TimerEvent> {
        let mut due = Vec::new();
        self.pending.retain(|scheduled| {
            if scheduled.due_tick <= now {
                due.push(scheduled.event);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_scheduled(&self, event: TimerEvent) -> bool {
        self.pending.iter().any(|s| s.event == event)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_deadline_in_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(10, 5, TimerEvent::GetUp);
        timers.schedule(11, 4, TimerEvent::YetiPick { yeti_id: 3 });
        timers.schedule(10, 60, TimerEvent::EndInvincibility);

        assert!(timers.take_due(14).is_empty());
        assert_eq!(
            timers.take_due(15),
            vec![TimerEvent::GetUp, TimerEvent::YetiPick { yeti_id: 3 }]
        );
        assert_eq!(timers.len(), 1);
        assert!(timers.is_scheduled(TimerEvent::EndInvincibility));
        assert!(timers.take_due(69).is_empty());
        assert_eq!(timers.take_due(70), vec![TimerEvent::EndInvincibility]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_zero_delay_fires_same_tick() {
        let mut timers = TimerQueue::new();
        timers.schedule(3, 0, TimerEvent::GetUp);
        assert_eq!(timers.take_due(3), vec![TimerEvent::GetUp]);
    }
}
