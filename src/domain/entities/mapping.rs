//! Mapping entity linking a short URL to its original long URL.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short URL mapping.
///
/// Created once and never modified. Expired mappings stay in storage and are
/// reported as expired at lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mapping {
    pub id: String,
    pub long_url: String,
    pub short_url: String,
    pub expiration_at: DateTime<Utc>,
}

impl Mapping {
    /// Assembles a mapping, deriving `short_url` as `base_url + id`.
    ///
    /// `expiration_at` is truncated to microseconds, the resolution of a
    /// PostgreSQL `TIMESTAMPTZ`.
    pub fn new(
        id: String,
        long_url: String,
        base_url: &str,
        expiration_at: DateTime<Utc>,
    ) -> Self {
        let short_url = format!("{}{}", base_url, id);
        Self {
            id,
            long_url,
            short_url,
            expiration_at: expiration_at.trunc_subsecs(6),
        }
    }

    /// Returns true if the mapping expired strictly before `now`.
    ///
    /// A lookup at exactly `expiration_at` is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_mapping_derives_short_url() {
        let mapping = Mapping::new(
            "1a2b3c4d".to_string(),
            "https://example.com/a".to_string(),
            "http://short.io/",
            t0(),
        );

        assert_eq!(mapping.id, "1a2b3c4d");
        assert_eq!(mapping.long_url, "https://example.com/a");
        assert_eq!(mapping.short_url, "http://short.io/1a2b3c4d");
        assert_eq!(mapping.expiration_at, t0());
    }

    #[test]
    fn test_base_url_is_used_verbatim() {
        let mapping = Mapping::new(
            "abcd1234".to_string(),
            "x".to_string(),
            "http://short.io",
            t0(),
        );
        assert_eq!(mapping.short_url, "http://short.ioabcd1234");
    }

    #[test]
    fn test_expiration_truncated_to_micros() {
        let precise = t0() + Duration::nanoseconds(1_234_567);
        let mapping = Mapping::new("id".to_string(), "x".to_string(), "p/", precise);

        assert_eq!(mapping.expiration_at, t0() + Duration::microseconds(1_234));
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let mapping = Mapping::new("id".to_string(), "x".to_string(), "p/", t0());
        assert!(!mapping.is_expired_at(t0() - Duration::hours(1)));
    }

    #[test]
    fn test_not_expired_at_exact_deadline() {
        let mapping = Mapping::new("id".to_string(), "x".to_string(), "p/", t0());
        assert!(!mapping.is_expired_at(t0()));
    }

    #[test]
    fn test_expired_one_microsecond_after_deadline() {
        let mapping = Mapping::new("id".to_string(), "x".to_string(), "p/", t0());
        assert!(mapping.is_expired_at(t0() + Duration::microseconds(1)));
    }

    #[test]
    fn test_expired_in_the_past() {
        let mapping = Mapping::new(
            "id".to_string(),
            "x".to_string(),
            "p/",
            Utc::now() - Duration::seconds(1),
        );
        assert!(mapping.is_expired_at(Utc::now()));
    }
}
