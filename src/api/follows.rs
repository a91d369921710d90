use crate::{database::MongoDB, middleware::auth::CallerIdentity, services::follow_service};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct FollowStatusQuery {
    pub target_user_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/follows/status",
    tag = "Follows",
    params(
        ("target_user_id" = String, Query, description = "Open id of the user to check against")
    ),
    responses(
        (status = 200, description = "Whether the caller follows the target"),
        (status = 400, description = "Missing target_user_id")
    )
)]
pub async fn get_follow_status(
    caller: web::ReqData<CallerIdentity>,
    db: web::Data<MongoDB>,
    query: web::Query<FollowStatusQuery>,
) -> HttpResponse {
    let target = query.target_user_id.as_deref().unwrap_or("");

    log::info!(
        "👥 GET /follows/status - caller: {}, target: {}",
        caller.open_id,
        target
    );

    match follow_service::is_following(db.get_ref(), &caller.open_id, target).await {
        Ok(is_following) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "is_following": is_following,
        })),
        Err(e) => {
            log::warn!("⚠️ Follow status check failed: {}", e);
            e.to_response()
        }
    }
}
