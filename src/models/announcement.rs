use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `announcements` collection. This service is the sole
/// writer of the default "points_rules" announcement; everything else is
/// authored through the admin tooling.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Announcement {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub show_on_home: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: String,
}
