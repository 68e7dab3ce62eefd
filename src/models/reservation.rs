use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::residence::ResidenceSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Parse a client-supplied status value; anything outside the enum is
    /// invalid input, never coerced.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub residence_id: i64,
    /// Identity reference of the booking actor; immutable.
    pub user_id: String,
    pub status: ReservationStatus,
    /// Fixed at creation; status transitions never touch it.
    pub total_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A reservation with its residence reference resolved, as returned to
/// callers. The residence is `None` when it has been deleted since the
/// reservation was made.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub residence: Option<ResidenceSummary>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservation {
    pub residence_id: i64,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct TransitionReservation {
    pub status: String,
}

/// Per-owner reservation aggregates over all residences they own.
#[derive(Debug, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct OwnerStats {
    pub total_reservations: i64,
    pub confirmed_reservations: i64,
    pub pending_reservations: i64,
    pub cancelled_reservations: i64,
    /// Sum of total_price over confirmed reservations only.
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_known_statuses() {
        assert_eq!(
            ReservationStatus::parse("pending"),
            Some(ReservationStatus::Pending)
        );
        assert_eq!(
            ReservationStatus::parse("confirmed"),
            Some(ReservationStatus::Confirmed)
        );
        assert_eq!(
            ReservationStatus::parse("cancelled"),
            Some(ReservationStatus::Cancelled)
        );
        assert_eq!(ReservationStatus::parse("Confirmed"), None);
        assert_eq!(ReservationStatus::parse("archived"), None);
        assert_eq!(ReservationStatus::parse(""), None);
    }
}
