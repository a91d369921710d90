use crate::{database::MongoDB, models::User, utils::error::AppError};
use async_trait::async_trait;
use mongodb::bson::doc;

const COLLECTION: &str = "users";

/// Single-document identity lookup behind the authorization gate.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError> {
        let collection = self.collection::<User>(COLLECTION);

        collection
            .find_one(doc! { "open_id": open_id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Returns true iff a user record for `open_id` exists with the admin
/// flag set. An absent record means not-admin; a storage fault is
/// propagated, never mapped to false.
pub async fn is_admin<S: UserStore + ?Sized>(store: &S, open_id: &str) -> Result<bool, AppError> {
    let user = store.find_user_by_open_id(open_id).await?;
    Ok(user.map(|u| u.is_admin).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubUserStore {
        users: Vec<User>,
        fail: bool,
    }

    #[async_trait]
    impl UserStore for StubUserStore {
        async fn find_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError> {
            if self.fail {
                return Err(AppError::Database("boom".into()));
            }
            Ok(self.users.iter().find(|u| u.open_id == open_id).cloned())
        }
    }

    fn user(open_id: &str, is_admin: bool) -> User {
        User {
            id: None,
            open_id: open_id.into(),
            display_name: None,
            avatar_url: None,
            total_points: 0,
            is_admin,
        }
    }

    #[tokio::test]
    async fn admin_flag_is_honored() {
        let store = StubUserStore {
            users: vec![user("o-admin", true), user("o-plain", false)],
            fail: false,
        };
        assert!(is_admin(&store, "o-admin").await.unwrap());
        assert!(!is_admin(&store, "o-plain").await.unwrap());
    }

    #[tokio::test]
    async fn absent_record_means_not_admin() {
        let store = StubUserStore { users: vec![], fail: false };
        assert!(!is_admin(&store, "o-ghost").await.unwrap());
    }

    #[tokio::test]
    async fn storage_fault_propagates() {
        let store = StubUserStore { users: vec![], fail: true };
        let err = is_admin(&store, "o-admin").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
