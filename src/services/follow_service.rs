use crate::{database::MongoDB, models::FollowEdge, utils::error::AppError};
use async_trait::async_trait;
use mongodb::bson::doc;

const COLLECTION: &str = "follows";

#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Whether at least one directed (follower, following) edge exists.
    /// Duplicate edges report the same as exactly one.
    async fn follow_edge_exists(&self, follower: &str, following: &str)
        -> Result<bool, AppError>;
}

#[async_trait]
impl FollowStore for MongoDB {
    async fn follow_edge_exists(
        &self,
        follower: &str,
        following: &str,
    ) -> Result<bool, AppError> {
        let collection = self.collection::<FollowEdge>(COLLECTION);

        let edge = collection
            .find_one(doc! {
                "follower_open_id": follower,
                "following_open_id": following,
            })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(edge.is_some())
    }
}

/// Self-follow is definitionally impossible, so `caller == target` returns
/// false without touching storage.
pub async fn is_following<S: FollowStore + ?Sized>(
    store: &S,
    caller_open_id: &str,
    target_open_id: &str,
) -> Result<bool, AppError> {
    if target_open_id.is_empty() {
        return Err(AppError::Validation("target_user_id is required".into()));
    }

    if caller_open_id == target_open_id {
        return Ok(false);
    }

    store
        .follow_edge_exists(caller_open_id, target_open_id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFollowStore {
        edges: Vec<(String, String)>,
        calls: AtomicUsize,
    }

    impl CountingFollowStore {
        fn new(edges: &[(&str, &str)]) -> Self {
            Self {
                edges: edges
                    .iter()
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FollowStore for CountingFollowStore {
        async fn follow_edge_exists(
            &self,
            follower: &str,
            following: &str,
        ) -> Result<bool, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .edges
                .iter()
                .any(|(a, b)| a == follower && b == following))
        }
    }

    #[tokio::test]
    async fn self_check_short_circuits_without_storage_access() {
        let store = CountingFollowStore::new(&[("o-a", "o-a")]);
        let following = is_following(&store, "o-a", "o-a").await.unwrap();
        assert!(!following);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_target_is_a_validation_error_before_storage() {
        let store = CountingFollowStore::new(&[]);
        let err = is_following(&store, "o-a", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reports_edge_existence_and_direction() {
        let store = CountingFollowStore::new(&[("o-a", "o-b")]);
        assert!(is_following(&store, "o-a", "o-b").await.unwrap());
        // Direction matters: b does not follow a.
        assert!(!is_following(&store, "o-b", "o-a").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_edges_read_the_same_as_one() {
        let store = CountingFollowStore::new(&[("o-a", "o-b"), ("o-a", "o-b")]);
        assert!(is_following(&store, "o-a", "o-b").await.unwrap());
    }
}
