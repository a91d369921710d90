use crate::{database::MongoDB, models::Announcement, utils::error::AppError};
use async_trait::async_trait;
use mongodb::bson::doc;
use serde::Serialize;

const COLLECTION: &str = "announcements";

pub const DEFAULT_LIMIT: i64 = 10;

pub const POINTS_RULES_KIND: &str = "points_rules";
const POINTS_RULES_TITLE: &str = "积分规则";
const POINTS_RULES_CONTENT: &str = "\
1. 上传打卡照片，审核通过后获得积分；\n\
2. 每日首次打卡额外奖励 5 积分；\n\
3. 积分排行榜每日更新，按累计积分排名；\n\
4. 违规内容将被驳回，不计积分。";

#[derive(Debug, Serialize)]
pub struct AnnouncementsResponse {
    pub success: bool,
    pub data: Vec<Announcement>,
}

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Top-`limit` announcements by creation time descending, optionally
    /// restricted to those flagged for the home page.
    async fn recent_announcements(
        &self,
        limit: i64,
        home_only: bool,
    ) -> Result<Vec<Announcement>, AppError>;

    async fn insert_announcement(&self, announcement: &Announcement) -> Result<(), AppError>;
}

#[async_trait]
impl AnnouncementStore for MongoDB {
    async fn recent_announcements(
        &self,
        limit: i64,
        home_only: bool,
    ) -> Result<Vec<Announcement>, AppError> {
        let collection = self.collection::<Announcement>(COLLECTION);

        let filter = if home_only {
            doc! { "show_on_home": true }
        } else {
            doc! {}
        };

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .build();

        let mut cursor = collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut announcements = Vec::new();
        use futures::stream::StreamExt;

        while let Some(result) = cursor.next().await {
            match result {
                Ok(announcement) => announcements.push(announcement),
                Err(e) => return Err(AppError::Database(e.to_string())),
            }
        }

        Ok(announcements)
    }

    async fn insert_announcement(&self, announcement: &Announcement) -> Result<(), AppError> {
        let collection = self.collection::<Announcement>(COLLECTION);

        collection
            .insert_one(announcement)
            .await
            .map(|_| ())
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// The fixed default seeded on first read of an empty collection.
pub fn default_points_rules(now: i64) -> Announcement {
    Announcement {
        id: None,
        title: POINTS_RULES_TITLE.to_string(),
        content: POINTS_RULES_CONTENT.to_string(),
        is_active: true,
        kind: POINTS_RULES_KIND.to_string(),
        show_on_home: false,
        created_at: now,
        updated_at: now,
        created_by: "system".to_string(),
    }
}

/// Lists announcements, seeding the default points-rules document when the
/// filtered result set is empty. Emptiness is judged against the *filtered*
/// set: a home-only read over a store holding only non-home documents also
/// seeds. Concurrent first reads can each insert one default; that
/// at-least-once duplication is accepted rather than guarded.
pub async fn list_announcements<S: AnnouncementStore + ?Sized>(
    store: &S,
    limit: Option<i64>,
    home_only: bool,
) -> Result<AnnouncementsResponse, AppError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let announcements = store.recent_announcements(limit, home_only).await?;

    if announcements.is_empty() {
        let seeded = default_points_rules(chrono::Utc::now().timestamp());
        store.insert_announcement(&seeded).await?;
        log::info!("📋 Announcements empty — seeded default points rules");

        // Return the in-memory value just written; no re-query.
        return Ok(AnnouncementsResponse {
            success: true,
            data: vec![seeded],
        });
    }

    Ok(AnnouncementsResponse {
        success: true,
        data: announcements,
    })
}
