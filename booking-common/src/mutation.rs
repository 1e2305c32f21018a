//! Transactional mutation coordinator
//!
//! Every write the site performs (venue create/update/delete, artist
//! create/update, show create) goes through [`execute`]: begin a
//! transaction, apply the single mutation, commit. Any failure rolls the
//! transaction back. The pooled connection is released when the
//! transaction is dropped, on every path.
//!
//! ```text
//! pending ──commit ok──▶ committed
//!    │
//!    └──apply/commit err──▶ rolled_back
//! ```

use std::fmt;

use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::models::{ArtistInput, ShowInput, VenueInput};
use crate::db::{artists, shows, venues};
use crate::error::{EntityKind, Error};

/// What a mutation does to its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// Entity type and operation of a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationKind {
    pub entity: EntityKind,
    pub operation: Operation,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity, self.operation)
    }
}

/// Lifecycle of the transaction wrapping one mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Pending,
    Committed,
    RolledBack,
}

/// A single write, ready to run
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateVenue(VenueInput),
    UpdateVenue { id: i64, input: VenueInput },
    DeleteVenue(i64),
    CreateArtist(ArtistInput),
    UpdateArtist { id: i64, input: ArtistInput },
    CreateShow(ShowInput),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        let (entity, operation) = match self {
            Mutation::CreateVenue(_) => (EntityKind::Venue, Operation::Create),
            Mutation::UpdateVenue { .. } => (EntityKind::Venue, Operation::Update),
            Mutation::DeleteVenue(_) => (EntityKind::Venue, Operation::Delete),
            Mutation::CreateArtist(_) => (EntityKind::Artist, Operation::Create),
            Mutation::UpdateArtist { .. } => (EntityKind::Artist, Operation::Update),
            Mutation::CreateShow(_) => (EntityKind::Show, Operation::Create),
        };
        MutationKind { entity, operation }
    }

    /// Entity name carried by the mutation, used in notices
    pub fn subject(&self) -> Option<&str> {
        match self {
            Mutation::CreateVenue(input) | Mutation::UpdateVenue { input, .. } => Some(&input.name),
            Mutation::CreateArtist(input) | Mutation::UpdateArtist { input, .. } => {
                Some(&input.name)
            }
            Mutation::DeleteVenue(_) | Mutation::CreateShow(_) => None,
        }
    }

    /// Apply inside an open transaction, returning the affected entity id
    async fn apply(self, conn: &mut SqliteConnection) -> Result<i64, Error> {
        match self {
            Mutation::CreateVenue(input) => venues::insert_venue(conn, &input).await,
            Mutation::UpdateVenue { id, input } => {
                venues::update_venue(conn, id, &input).await.map(|_| id)
            }
            Mutation::DeleteVenue(id) => venues::delete_venue(conn, id).await.map(|_| id),
            Mutation::CreateArtist(input) => artists::insert_artist(conn, &input).await,
            Mutation::UpdateArtist { id, input } => {
                artists::update_artist(conn, id, &input).await.map(|_| id)
            }
            Mutation::CreateShow(input) => shows::insert_show(conn, &input).await,
        }
    }
}

/// A committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReceipt {
    pub kind: MutationKind,
    /// Id of the created, updated or deleted entity
    pub id: i64,
}

impl MutationReceipt {
    pub fn state(&self) -> TransactionState {
        TransactionState::Committed
    }
}

/// A rolled-back mutation and the failure that caused it
#[derive(Debug, Error)]
#[error("{kind} rolled back: {cause}")]
pub struct MutationError {
    pub kind: MutationKind,
    #[source]
    pub cause: Error,
}

impl MutationError {
    pub fn state(&self) -> TransactionState {
        TransactionState::RolledBack
    }

    /// True when the mutation targeted a row that does not exist
    pub fn is_missing_reference(&self) -> bool {
        self.cause.is_missing_reference()
    }
}

/// Run one mutation in its own transaction
pub async fn execute(pool: &SqlitePool, mutation: Mutation) -> Result<MutationReceipt, MutationError> {
    let kind = mutation.kind();
    let fail = |cause: Error| MutationError { kind, cause };

    let mut tx = pool.begin().await.map_err(|e| fail(e.into()))?;

    let outcome = match mutation.apply(&mut *tx).await {
        Ok(id) => tx
            .commit()
            .await
            .map(|()| MutationReceipt { kind, id })
            .map_err(|e| fail(e.into())),
        Err(cause) => {
            if let Err(e) = tx.rollback().await {
                warn!(mutation = %kind, error = %e, "Rollback failed");
            }
            Err(fail(cause))
        }
    };

    match &outcome {
        Ok(receipt) => info!(mutation = %kind, id = receipt.id, "Mutation committed"),
        Err(err) => warn!(mutation = %kind, error = %err.cause, "Mutation rolled back"),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_memory_database, venues};

    fn venue_input(name: &str) -> VenueInput {
        VenueInput {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_display() {
        let kind = Mutation::DeleteVenue(1).kind();
        assert_eq!(kind.to_string(), "venue delete");
        assert_eq!(
            Mutation::CreateShow(ShowInput {
                artist_id: 1,
                venue_id: 1,
                start_time: None,
            })
            .kind(),
            MutationKind {
                entity: EntityKind::Show,
                operation: Operation::Create
            }
        );
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            Mutation::CreateVenue(venue_input("The Musical Hop")).subject(),
            Some("The Musical Hop")
        );
        assert_eq!(Mutation::DeleteVenue(3).subject(), None);
    }

    #[tokio::test]
    async fn test_create_commits() {
        let pool = init_memory_database().await.unwrap();

        let receipt = execute(&pool, Mutation::CreateVenue(venue_input("The Musical Hop")))
            .await
            .unwrap();
        assert_eq!(receipt.state(), TransactionState::Committed);

        let venue = venues::get_venue(&pool, receipt.id).await.unwrap();
        assert_eq!(venue.map(|v| v.name).as_deref(), Some("The Musical Hop"));
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_no_rows() {
        let pool = init_memory_database().await.unwrap();

        let err = execute(&pool, Mutation::CreateVenue(venue_input("")))
            .await
            .unwrap_err();
        assert_eq!(err.state(), TransactionState::RolledBack);
        assert!(matches!(err.cause, Error::ConstraintViolation(_)));

        assert!(venues::list_venues(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_missing_venue_is_missing_reference() {
        let pool = init_memory_database().await.unwrap();

        let err = execute(
            &pool,
            Mutation::UpdateVenue {
                id: 42,
                input: venue_input("Nowhere"),
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_missing_reference());
        assert_eq!(err.to_string(), "venue update rolled back: venue 42 not found");
    }
}
