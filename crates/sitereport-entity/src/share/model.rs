//! Report-share entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::Permission;

/// A grant of access to a report beyond its owner.
///
/// Invariant: `share_token` is present if and only if `is_public` is true.
/// Toggling a share private clears the token so old links die immediately;
/// toggling public mints a fresh one. An expired share is logically inert
/// and is evicted the next time it is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared report.
    pub report_id: Uuid,
    /// The grantor.
    pub shared_by: Uuid,
    /// Users the report is shared with; empty for public shares.
    pub shared_with: HashSet<Uuid>,
    /// Permissions granted on the report (capped by the grantor's rights).
    pub permissions: HashSet<Permission>,
    /// Optional expiry; `None` means the share never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether anyone holding the token may access the share.
    pub is_public: bool,
    /// Unguessable credential for public access; present iff `is_public`.
    pub share_token: Option<String>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ShareSettings {
    /// Whether the share deadline has passed.
    ///
    /// Same strict convention as page locks: exactly at the deadline is
    /// still live.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }

    /// Whether the given user may access the shared report right now.
    pub fn grants_access(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && (self.is_public || self.shared_with.contains(&user_id))
    }

    /// Whether the user is visible on the share record: the grantor or a
    /// direct recipient.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.shared_by == user_id || self.shared_with.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_share(is_public: bool, expires_at: Option<DateTime<Utc>>) -> ShareSettings {
        let now = Utc::now();
        ShareSettings {
            id: Uuid::new_v4(),
            report_id: Uuid::new_v4(),
            shared_by: Uuid::new_v4(),
            shared_with: HashSet::new(),
            permissions: [Permission::ReadReports].into_iter().collect(),
            expires_at,
            is_public,
            share_token: is_public.then(|| "token".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_expiry_means_never_expired() {
        let share = sample_share(true, None);
        assert!(!share.is_expired(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn test_public_share_grants_access_to_anyone() {
        let now = Utc::now();
        let share = sample_share(true, Some(now + Duration::hours(1)));
        assert!(share.grants_access(Uuid::new_v4(), now));
    }

    #[test]
    fn test_expired_share_grants_nothing() {
        let now = Utc::now();
        let mut share = sample_share(true, Some(now - Duration::seconds(1)));
        let member = Uuid::new_v4();
        share.shared_with.insert(member);
        assert!(!share.grants_access(member, now));
    }

    #[test]
    fn test_private_share_limited_to_members() {
        let now = Utc::now();
        let mut share = sample_share(false, None);
        let member = Uuid::new_v4();
        share.shared_with.insert(member);
        assert!(share.grants_access(member, now));
        assert!(!share.grants_access(Uuid::new_v4(), now));
    }
}
