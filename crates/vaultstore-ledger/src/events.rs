

use tokio::sync::broadcast;
use tracing::{trace, warn};
use vaultstore_types::LedgerEvent;

/// Consumer of store notifications, called in emission order
pub trait EventSink {
    fn emit(&mut self, event: &LedgerEvent);
}

/// In-memory event recorder keeping at most `retention` of the newest events
#[derive(Debug, Clone)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
    retention: usize,
}

impl EventLog {
    /// Unbounded log
    pub fn new() -> Self {
        Self::with_retention(usize::MAX)
    }

    pub fn with_retention(retention: usize) -> Self {
        EventLog {
            events: Vec::new(),
            retention,
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.as_slice().iter()
    }

    pub fn last(&self) -> Option<&LedgerEvent> {
        self.as_slice().last()
    }

    /// Retained events, oldest first
    pub fn as_slice(&self) -> &[LedgerEvent] {
        let start = self.events.len().saturating_sub(self.retention);
        &self.events[start..]
    }

    /// Take all retained events, leaving the log empty
    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        let start = self.events.len().saturating_sub(self.retention);
        let mut events = std::mem::take(&mut self.events);
        events.split_off(start)
    }

    // Storage holds fewer than 2 * retention entries; older ones are
    // compacted away in bulk so each emit stays amortized O(1).
    fn compact(&mut self) {
        let len = self.events.len();
        if len > self.retention && len - self.retention >= self.retention {
            self.events.drain(..len - self.retention);
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &LedgerEvent) {
        self.events.push(event.clone());
        self.compact();
    }
}

/// Publishes events on a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<LedgerEvent>,
}

impl BroadcastSink {
    pub fn new(sender: broadcast::Sender<LedgerEvent>) -> Self {
        BroadcastSink { sender }
    }
}

impl EventSink for BroadcastSink {
    fn emit(&mut self, event: &LedgerEvent) {
        // send only fails when nobody is subscribed
        if self.sender.send(event.clone()).is_err() {
            trace!(event = %event, "no subscribers");
        }
    }
}

/// Feed every received event to `on_event` until all senders are gone.
/// A lagging receiver skips the overwritten events and keeps going.
/// Returns how many events were skipped.
pub async fn monitor<F>(mut receiver: broadcast::Receiver<LedgerEvent>, mut on_event: F) -> u64
where
    F: FnMut(LedgerEvent),
{
    let mut skipped = 0;
    loop {
        match receiver.recv().await {
            Ok(event) => on_event(event),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "subscriber lagged, events skipped");
                skipped += missed;
            }
            Err(broadcast::error::RecvError::Closed) => return skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultstore_types::{AccountId, Amount};

    fn deposited(units: u64) -> LedgerEvent {
        LedgerEvent::Deposited {
            account: AccountId::new("alice"),
            amount: Amount::from_units(units),
        }
    }

    #[test]
    fn test_event_log_order_and_drain() {
        let mut log = EventLog::new();
        log.emit(&deposited(1));
        log.emit(&deposited(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some(&deposited(2)));
        assert_eq!(log.iter().next(), Some(&deposited(1)));

        let drained = log.drain();
        assert_eq!(drained, vec![deposited(1), deposited(2)]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_broadcast_sink() {
        let (sender, mut receiver) = broadcast::channel(8);
        let mut sink = BroadcastSink::new(sender);

        sink.emit(&deposited(3));
        assert_eq!(receiver.try_recv().unwrap(), deposited(3));
    }

    #[test]
    fn test_broadcast_sink_without_subscribers() {
        let (sender, receiver) = broadcast::channel(8);
        drop(receiver);
        let mut sink = BroadcastSink::new(sender);

        sink.emit(&deposited(1));
    }

    #[test]
    fn test_event_log_retention_bound() {
        let mut log = EventLog::with_retention(3);
        for units in 1..=100 {
            log.emit(&deposited(units));
            assert!(log.events.len() < 6);
        }

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.iter().cloned().collect::<Vec<_>>(),
            vec![deposited(98), deposited(99), deposited(100)]
        );
        assert_eq!(log.drain(), vec![deposited(98), deposited(99), deposited(100)]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_zero_retention_keeps_nothing() {
        let mut log = EventLog::with_retention(0);
        log.emit(&deposited(1));
        assert!(log.is_empty());
        assert!(log.events.is_empty());
    }

    #[tokio::test]
    async fn test_monitor_survives_lag() {
        let (sender, receiver) = broadcast::channel(2);
        let mut sink = BroadcastSink::new(sender);
        for units in 1..=5 {
            sink.emit(&deposited(units));
        }
        drop(sink);

        let mut seen = Vec::new();
        let skipped = monitor(receiver, |event| seen.push(event)).await;

        assert_eq!(skipped, 3);
        assert_eq!(seen, vec![deposited(4), deposited(5)]);
    }
}
