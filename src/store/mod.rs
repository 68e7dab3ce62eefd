//! Entity store: every query the API runs, grouped per collection.
//!
//! Plain async functions over the shared pool (or an explicit executor
//! where a handler needs to thread a transaction through).

pub mod reservations;
pub mod residences;

use crate::error::ApiError;

/// Map write failures onto the API taxonomy: the unique index on
/// `reference` surfaces as Conflict, CHECK ranges as InvalidInput,
/// anything else stays internal.
pub(crate) fn map_write_err(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict("reference already in use".to_owned())
        }
        sqlx::Error::Database(db) if db.is_check_violation() => {
            ApiError::InvalidInput("value out of range".to_owned())
        }
        _ => ApiError::from(err),
    }
}
