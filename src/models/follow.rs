use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Directed, non-symmetric "follows" relation in the `follows` collection.
/// At most one edge per (follower, following) pair is upheld by the writer,
/// not by this service; readers only check existence.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FollowEdge {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub follower_open_id: String,
    pub following_open_id: String,
}
