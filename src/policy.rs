//! Authorization evaluator.
//!
//! A single pure predicate over an already-loaded target. Residence
//! ownership is passed in explicitly (`residence_owner`) rather than
//! re-derived here; when the referenced residence could not be resolved
//! the owner is `None` and every owner-gated branch denies.

use crate::auth::{Actor, Role};
use crate::models::{Reservation, Residence};

#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateResidence,
    UpdateResidence(&'a Residence),
    DeleteResidence(&'a Residence),
    CreateReservation,
    ViewReservation {
        reservation: &'a Reservation,
        residence_owner: Option<&'a str>,
    },
    TransitionReservation {
        residence_owner: Option<&'a str>,
    },
    DeleteReservation {
        reservation: &'a Reservation,
        residence_owner: Option<&'a str>,
    },
    ViewOwnerStats,
}

pub fn can_act(actor: &Actor, action: Action<'_>) -> bool {
    match action {
        Action::CreateResidence => {
            matches!(actor.role, Role::Owner | Role::Admin | Role::Client)
        }
        Action::UpdateResidence(residence) | Action::DeleteResidence(residence) => {
            residence.owner == actor.identity || actor.role == Role::Admin
        }
        // any authenticated actor may book; the reservation is recorded
        // against their own identity
        Action::CreateReservation => true,
        Action::TransitionReservation { residence_owner } => {
            residence_owner.is_some_and(|owner| owner == actor.identity)
        }
        Action::ViewReservation {
            reservation,
            residence_owner,
        }
        | Action::DeleteReservation {
            reservation,
            residence_owner,
        } => {
            residence_owner.is_some_and(|owner| owner == actor.identity)
                || reservation.user_id == actor.identity
        }
        // scoped to the actor's own residences by the queries themselves
        Action::ViewOwnerStats => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::residence::{MediaItem, ResidenceStatus, ResidenceType};
    use crate::models::ReservationStatus;
    use chrono::NaiveDateTime;
    use sqlx::types::Json;

    fn actor(identity: &str, role: Role) -> Actor {
        Actor {
            identity: identity.to_owned(),
            role,
        }
    }

    fn residence(owner: &str) -> Residence {
        Residence {
            id: 1,
            title: "Suite Bleue".to_owned(),
            description: None,
            kind: ResidenceType::Suite,
            price: 8000,
            location: "Kribi".to_owned(),
            address: None,
            reference: None,
            media: Json(Vec::<MediaItem>::new()),
            amenities: Json(vec![]),
            owner: owner.to_owned(),
            status: ResidenceStatus::Available,
            rating: 0.0,
            reviews_count: 0,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn reservation(user_id: &str) -> Reservation {
        Reservation {
            id: 7,
            residence_id: 1,
            user_id: user_id.to_owned(),
            status: ReservationStatus::Pending,
            total_price: 8000.0,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn residence_mutation_is_owner_or_admin() {
        let target = residence("owner-1");

        assert!(can_act(
            &actor("owner-1", Role::Owner),
            Action::UpdateResidence(&target)
        ));
        assert!(can_act(
            &actor("root", Role::Admin),
            Action::DeleteResidence(&target)
        ));
        assert!(!can_act(
            &actor("owner-2", Role::Owner),
            Action::UpdateResidence(&target)
        ));
        assert!(!can_act(
            &actor("client-1", Role::Client),
            Action::DeleteResidence(&target)
        ));
    }

    #[test]
    fn any_role_may_create_residences() {
        for role in [Role::Client, Role::Owner, Role::Admin] {
            assert!(can_act(&actor("someone", role), Action::CreateResidence));
        }
    }

    #[test]
    fn transition_requires_the_residence_owner() {
        assert!(can_act(
            &actor("owner-1", Role::Owner),
            Action::TransitionReservation {
                residence_owner: Some("owner-1"),
            }
        ));
        assert!(!can_act(
            &actor("client-1", Role::Client),
            Action::TransitionReservation {
                residence_owner: Some("owner-1"),
            }
        ));
        // admins get no shortcut on transitions
        assert!(!can_act(
            &actor("root", Role::Admin),
            Action::TransitionReservation {
                residence_owner: Some("owner-1"),
            }
        ));
    }

    #[test]
    fn transition_fails_closed_when_residence_unresolved() {
        assert!(!can_act(
            &actor("owner-1", Role::Owner),
            Action::TransitionReservation {
                residence_owner: None,
            }
        ));
    }

    #[test]
    fn view_and_delete_grant_dual_access() {
        let booking = reservation("client-1");

        for identity in ["owner-1", "client-1"] {
            assert!(can_act(
                &actor(identity, Role::Client),
                Action::ViewReservation {
                    reservation: &booking,
                    residence_owner: Some("owner-1"),
                }
            ));
            assert!(can_act(
                &actor(identity, Role::Client),
                Action::DeleteReservation {
                    reservation: &booking,
                    residence_owner: Some("owner-1"),
                }
            ));
        }

        assert!(!can_act(
            &actor("stranger", Role::Client),
            Action::ViewReservation {
                reservation: &booking,
                residence_owner: Some("owner-1"),
            }
        ));
    }

    #[test]
    fn booker_keeps_delete_right_on_orphaned_reservation() {
        let booking = reservation("client-1");

        assert!(can_act(
            &actor("client-1", Role::Client),
            Action::DeleteReservation {
                reservation: &booking,
                residence_owner: None,
            }
        ));
        assert!(!can_act(
            &actor("owner-1", Role::Owner),
            Action::DeleteReservation {
                reservation: &booking,
                residence_owner: None,
            }
        ));
    }

    #[test]
    fn stats_are_open_to_any_authenticated_actor() {
        assert!(can_act(&actor("anyone", Role::Client), Action::ViewOwnerStats));
        assert!(can_act(&actor("anyone", Role::Client), Action::CreateReservation));
    }
}
