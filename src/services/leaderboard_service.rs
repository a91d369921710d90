use crate::{database::MongoDB, models::User, utils::error::AppError};
use async_trait::async_trait;
use mongodb::bson::doc;
use serde::Serialize;

const COLLECTION: &str = "users";

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 50;

/// Shown when a user never set a profile name.
const ANONYMOUS_NAME: &str = "微信用户";
const DEFAULT_AVATAR: &str = "/static/images/default-avatar.png";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RankedRow {
    pub rank: u64,
    pub open_id: String,
    pub display_name: String,
    pub avatar_url: String,
    pub total_points: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub data: Vec<RankedRow>,
    pub total: u64,
    /// Heuristic: true when the page came back full. A page that exactly
    /// exhausts the remaining rows reports a false positive.
    pub has_more: bool,
}

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Users with `total_points > 0`, ordered by points descending,
    /// paginated. Ties fall back to storage order; there is no secondary
    /// sort key.
    async fn positive_point_users(&self, limit: i64, offset: u64) -> Result<Vec<User>, AppError>;

    async fn count_positive_point_users(&self) -> Result<u64, AppError>;
}

#[async_trait]
impl LeaderboardStore for MongoDB {
    async fn positive_point_users(&self, limit: i64, offset: u64) -> Result<Vec<User>, AppError> {
        let collection = self.collection::<User>(COLLECTION);

        let filter = doc! { "total_points": { "$gt": 0 } };
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "total_points": -1 })
            .skip(offset)
            .limit(limit)
            .build();

        let mut cursor = collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut users = Vec::new();
        use futures::stream::StreamExt;

        while let Some(result) = cursor.next().await {
            match result {
                Ok(user) => users.push(user),
                Err(e) => return Err(AppError::Database(e.to_string())),
            }
        }

        Ok(users)
    }

    async fn count_positive_point_users(&self) -> Result<u64, AppError> {
        let collection = self.collection::<User>(COLLECTION);

        collection
            .count_documents(doc! { "total_points": { "$gt": 0 } })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Caps the page size at MAX_LIMIT; non-positive requests fall back to a
/// single row rather than an unbounded query.
pub fn effective_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT).max(1)
}

/// Ranks are relative to the requested page, not recomputed globally:
/// `rank = offset + index_in_page + 1`.
pub fn decorate_rows(users: Vec<User>, offset: u64) -> Vec<RankedRow> {
    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| RankedRow {
            rank: offset + index as u64 + 1,
            open_id: user.open_id,
            display_name: user
                .display_name
                .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
            avatar_url: user
                .avatar_url
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            total_points: user.total_points,
        })
        .collect()
}

pub async fn build_leaderboard<S: LeaderboardStore + ?Sized>(
    store: &S,
    limit: Option<i64>,
    offset: Option<u64>,
) -> Result<LeaderboardResponse, AppError> {
    let limit = effective_limit(limit);
    let offset = offset.unwrap_or(0);

    let users = store.positive_point_users(limit, offset).await?;
    let total = store.count_positive_point_users().await?;

    let returned = users.len() as i64;
    let data = decorate_rows(users, offset);

    Ok(LeaderboardResponse {
        success: true,
        data,
        total,
        has_more: returned == limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory store holding pre-sorted qualifying users, the way the
    /// collection query would return them.
    struct StubLeaderboardStore {
        users: Vec<User>,
    }

    #[async_trait]
    impl LeaderboardStore for StubLeaderboardStore {
        async fn positive_point_users(
            &self,
            limit: i64,
            offset: u64,
        ) -> Result<Vec<User>, AppError> {
            let mut sorted: Vec<User> = self
                .users
                .iter()
                .filter(|u| u.total_points > 0)
                .cloned()
                .collect();
            sorted.sort_by(|a, b| b.total_points.cmp(&a.total_points));
            Ok(sorted
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn count_positive_point_users(&self) -> Result<u64, AppError> {
            Ok(self.users.iter().filter(|u| u.total_points > 0).count() as u64)
        }
    }

    fn user(open_id: &str, points: i64) -> User {
        User {
            id: None,
            open_id: open_id.into(),
            display_name: Some(format!("user-{}", open_id)),
            avatar_url: Some("/avatars/x.png".into()),
            total_points: points,
            is_admin: false,
        }
    }

    #[test]
    fn limit_is_capped_and_defaulted() {
        assert_eq!(effective_limit(None), 20);
        assert_eq!(effective_limit(Some(10)), 10);
        assert_eq!(effective_limit(Some(500)), 50);
        assert_eq!(effective_limit(Some(0)), 1);
    }

    #[test]
    fn ranks_are_page_relative() {
        let rows = decorate_rows(vec![user("a", 30), user("b", 20), user("c", 10)], 40);
        let ranks: Vec<u64> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![41, 42, 43]);
    }

    #[test]
    fn missing_profile_fields_get_fixed_defaults() {
        let bare = User {
            id: None,
            open_id: "o-bare".into(),
            display_name: None,
            avatar_url: None,
            total_points: 5,
            is_admin: false,
        };
        let rows = decorate_rows(vec![bare], 0);
        assert_eq!(rows[0].display_name, ANONYMOUS_NAME);
        assert_eq!(rows[0].avatar_url, DEFAULT_AVATAR);
    }

    #[tokio::test]
    async fn zero_point_users_are_excluded_and_full_page_sets_has_more() {
        // A(100), B(100), C(0), D(50) with limit=2: two rows from {A,B,D},
        // ranks 1 and 2, has_more because the page came back full.
        let store = StubLeaderboardStore {
            users: vec![user("A", 100), user("B", 100), user("C", 0), user("D", 50)],
        };
        let page = build_leaderboard(&store, Some(2), Some(0)).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert!(page.data.iter().all(|r| r.open_id != "C"));
        assert!(page.data.iter().all(|r| r.total_points > 0));
        assert_eq!(page.data[0].rank, 1);
        assert_eq!(page.data[1].rank, 2);
        assert_eq!(page.total, 3);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn row_count_never_exceeds_cap() {
        let users: Vec<User> = (0..80).map(|i| user(&format!("u{}", i), 100 - i)).collect();
        let store = StubLeaderboardStore { users };
        let page = build_leaderboard(&store, Some(200), None).await.unwrap();
        assert_eq!(page.data.len(), MAX_LIMIT as usize);
    }

    #[tokio::test]
    async fn offset_past_the_end_yields_empty_page() {
        let store = StubLeaderboardStore {
            users: vec![user("A", 10), user("B", 5)],
        };
        let page = build_leaderboard(&store, Some(10), Some(40)).await.unwrap();
        assert!(page.data.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn partial_last_page_clears_has_more() {
        let store = StubLeaderboardStore {
            users: vec![user("A", 10), user("B", 5), user("C", 3)],
        };
        let page = build_leaderboard(&store, Some(10), None).await.unwrap();
        assert_eq!(page.data.len(), 3);
        assert!(!page.has_more);
    }
}
