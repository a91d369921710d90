use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `users` collection. Created and mutated by the
/// mini-program write paths; this service only reads it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub open_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub is_admin: bool,
}
