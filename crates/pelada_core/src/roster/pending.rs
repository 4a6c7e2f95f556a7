use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// A payment announcement waiting for its method follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPayment {
    /// Validated 1-based main-roster position.
    pub position: usize,
    /// Cycle date the payment will be recorded under.
    pub date: NaiveDate,
    /// When the request was registered; entries expire after the TTL.
    pub requested_at: DateTime<Utc>,
}

/// Correlation table for the two-step payment flow.
///
/// A `/pg <position>` without a method registers an entry keyed by the
/// requester; the next bare method word from the same requester resolves
/// it. Entries older than the TTL are dropped on every touch, so an
/// abandoned prompt never leaks. A second request from the same requester
/// replaces the first.
#[derive(Debug, Clone)]
pub struct PendingPayments {
    ttl: Duration,
    entries: HashMap<String, PendingPayment>,
}

impl PendingPayments {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(Duration::seconds(secs as i64))
    }

    pub fn register(
        &mut self,
        requester: &str,
        position: usize,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) {
        self.purge_expired(now);
        self.entries.insert(
            requester.to_string(),
            PendingPayment { position, date, requested_at: now },
        );
    }

    /// Claim the requester's pending entry, if one is registered and still
    /// within the TTL. Claiming removes it; a follow-up can fire only once.
    pub fn take(&mut self, requester: &str, now: DateTime<Utc>) -> Option<PendingPayment> {
        self.purge_expired(now);
        self.entries.remove(requester)
    }

    pub fn contains(&self, requester: &str) -> bool {
        self.entries.contains_key(requester)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.requested_at <= ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
    }

    #[test]
    fn test_take_within_ttl() {
        let mut pending = PendingPayments::with_ttl_secs(120);
        pending.register("Rafael", 4, day(), at(0));

        let entry = pending.take("Rafael", at(60)).unwrap();
        assert_eq!(entry.position, 4);
        assert_eq!(entry.date, day());

        assert!(pending.take("Rafael", at(61)).is_none(), "claims are one-shot");
    }

    #[test]
    fn test_expired_entry_is_gone() {
        let mut pending = PendingPayments::with_ttl_secs(120);
        pending.register("Rafael", 4, day(), at(0));

        assert!(pending.take("Rafael", at(121)).is_none());
        assert!(pending.is_empty());
    }

    #[test]
    fn test_register_purges_other_stale_entries() {
        let mut pending = PendingPayments::with_ttl_secs(120);
        pending.register("Rafael", 4, day(), at(0));
        pending.register("Bruno", 7, day(), at(300));

        assert_eq!(pending.len(), 1);
        assert!(!pending.contains("Rafael"));
        assert!(pending.contains("Bruno"));
    }

    #[test]
    fn test_second_request_replaces_first() {
        let mut pending = PendingPayments::with_ttl_secs(120);
        pending.register("Rafael", 4, day(), at(0));
        pending.register("Rafael", 9, day(), at(10));

        let entry = pending.take("Rafael", at(20)).unwrap();
        assert_eq!(entry.position, 9);
    }
}
