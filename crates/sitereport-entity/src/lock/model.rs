//! Page-lock entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a page lock.
///
/// `Editing` is a reserved sub-state for fine-grained editor signaling;
/// no current operation transitions into it and it counts as live,
/// exactly like `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    /// No live lock on the page.
    Unlocked,
    /// The page is exclusively held by one user.
    Locked,
    /// Reserved: the holder is actively typing.
    Editing,
}

/// Exclusive editing intent on one page of one report, bounded by a lease.
///
/// A lock whose deadline has passed is logically dead even while still
/// physically stored; every read path must compute liveness from
/// `expires_at` instead of relying on storage absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLock {
    /// Unique lock identifier.
    pub id: Uuid,
    /// The locked page.
    pub page_id: Uuid,
    /// The report the page belongs to.
    pub report_id: Uuid,
    /// The lock holder.
    pub user_id: Uuid,
    /// Display name of the holder, for conflict messages.
    pub user_name: String,
    /// Lifecycle state.
    pub status: LockStatus,
    /// When the lock was acquired.
    pub locked_at: DateTime<Utc>,
    /// Lease deadline.
    pub expires_at: DateTime<Utc>,
    /// Free-text reason given by the holder.
    pub reason: Option<String>,
}

impl PageLock {
    /// Whether the lease deadline has passed.
    ///
    /// Strict comparison: a lock observed exactly at its deadline is still
    /// live. This is the single liveness convention used everywhere.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time left on the lease, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.expires_at - now;
        if remaining < Duration::zero() {
            Duration::zero()
        } else {
            remaining
        }
    }

    /// Whether the lock is live but within the given warning threshold.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        let remaining = self.remaining(now);
        remaining > Duration::zero() && remaining <= threshold
    }
}

/// Human-readable rendering of a remaining lease duration: `"Nm Ss"`,
/// or just `"Ss"` under a minute.
pub fn format_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Filter for listing live locks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LockFilter {
    /// Restrict to one page.
    pub page_id: Option<Uuid>,
    /// Restrict to one report.
    pub report_id: Option<Uuid>,
    /// Restrict to one holder.
    pub user_id: Option<Uuid>,
}

impl LockFilter {
    /// Whether the given lock matches every set field.
    pub fn matches(&self, lock: &PageLock) -> bool {
        self.page_id.is_none_or(|p| lock.page_id == p)
            && self.report_id.is_none_or(|r| lock.report_id == r)
            && self.user_id.is_none_or(|u| lock.user_id == u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lock(expires_at: DateTime<Utc>) -> PageLock {
        PageLock {
            id: Uuid::new_v4(),
            page_id: Uuid::new_v4(),
            report_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Tanaka".to_string(),
            status: LockStatus::Locked,
            locked_at: expires_at - Duration::minutes(30),
            expires_at,
            reason: None,
        }
    }

    #[test]
    fn test_exactly_at_deadline_is_still_live() {
        let now = Utc::now();
        let lock = sample_lock(now);
        assert!(!lock.is_expired(now));
        assert!(lock.is_expired(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let now = Utc::now();
        let lock = sample_lock(now - Duration::seconds(10));
        assert_eq!(lock.remaining(now), Duration::zero());
    }

    #[test]
    fn test_expiring_soon_window() {
        let now = Utc::now();
        let threshold = Duration::minutes(5);
        assert!(sample_lock(now + Duration::minutes(4)).is_expiring_soon(now, threshold));
        assert!(!sample_lock(now + Duration::minutes(6)).is_expiring_soon(now, threshold));
        // An already-expired lock is dead, not "expiring soon".
        assert!(!sample_lock(now - Duration::seconds(1)).is_expiring_soon(now, threshold));
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::seconds(150)), "2m 30s");
        assert_eq!(format_remaining(Duration::seconds(45)), "45s");
        assert_eq!(format_remaining(Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_filter_matches() {
        let now = Utc::now();
        let lock = sample_lock(now + Duration::minutes(10));
        let filter = LockFilter {
            page_id: Some(lock.page_id),
            ..Default::default()
        };
        assert!(filter.matches(&lock));
        let other = LockFilter {
            page_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!other.matches(&lock));
    }
}
