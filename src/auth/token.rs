//! The session token carried inside the private auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::UserID;

/// The payload of a logged-in user's session cookie.
///
/// The expiry is serialised as a unix timestamp, which keeps the cookie
/// payload short and avoids any dependence on a datetime string format.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct AuthToken {
    pub user_id: UserID,

    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl AuthToken {
    /// Whether the token's expiry has passed.
    pub fn has_expired(&self) -> bool {
        self.expires_at < OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
mod auth_token_tests {
    use time::{Duration, OffsetDateTime, UtcOffset, macros::datetime};

    use crate::auth::{AuthToken, UserID};

    #[test]
    fn serialises_expiry_as_unix_timestamp() {
        let token = AuthToken {
            user_id: UserID::new(42),
            expires_at: datetime!(2025-08-30 17:00:00).assume_offset(UtcOffset::UTC),
        };

        let serialised = serde_json::to_string(&token).unwrap();

        assert_eq!(
            serialised,
            r#"{"user_id":42,"expires_at":1756573200}"#
        );
    }

    #[test]
    fn round_trip_preserves_the_instant() {
        let token = AuthToken {
            user_id: UserID::new(7),
            // A non-UTC offset round-trips to the same instant in UTC.
            expires_at: datetime!(2025-08-31 00:00:00)
                .assume_offset(UtcOffset::from_hms(7, 0, 0).unwrap()),
        };

        let serialised = serde_json::to_string(&token).unwrap();
        let deserialised: AuthToken = serde_json::from_str(&serialised).unwrap();

        assert_eq!(deserialised, token);
    }

    #[test]
    fn rejects_token_with_non_numeric_expiry() {
        let result = serde_json::from_str::<AuthToken>(
            r#"{"user_id":1,"expires_at":"2025-08-30 17:00:00"}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn has_expired_for_past_expiry() {
        let token = AuthToken {
            user_id: UserID::new(1),
            expires_at: OffsetDateTime::now_utc() - Duration::minutes(1),
        };

        assert!(token.has_expired());
    }

    #[test]
    fn has_not_expired_for_future_expiry() {
        let token = AuthToken {
            user_id: UserID::new(1),
            expires_at: OffsetDateTime::now_utc() + Duration::minutes(1),
        };

        assert!(!token.has_expired());
    }
}
