pub mod reservation;
pub mod residence;

pub use reservation::{
    CreateReservation, OwnerStats, Reservation, ReservationStatus, ReservationView,
    TransitionReservation,
};
pub use residence::{
    CreateResidence, MediaItem, MediaKind, Residence, ResidenceFilter, ResidenceStatus,
    ResidenceSummary, ResidenceType, UpdateResidence,
};
