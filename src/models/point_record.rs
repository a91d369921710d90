use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the `point_records` collection, owned by the submission
/// workflow. Disclosure is gated by admin privilege, not record ownership.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub open_id: String,
    pub submitted_at: i64,
    pub status: String,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
