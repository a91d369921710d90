use crate::{database::MongoDB, services::leaderboard_service};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
    pub offset: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "Leaderboard",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 20, capped at 50"),
        ("offset" = Option<u64>, Query, description = "Rows to skip, default 0")
    ),
    responses(
        (status = 200, description = "Ranked page of positive-point users", body = leaderboard_service::LeaderboardResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_leaderboard(
    db: web::Data<MongoDB>,
    query: web::Query<LeaderboardQuery>,
) -> HttpResponse {
    log::info!(
        "🏆 GET /leaderboard - limit: {:?}, offset: {:?}",
        query.limit,
        query.offset
    );

    match leaderboard_service::build_leaderboard(db.get_ref(), query.limit, query.offset).await {
        Ok(response) => {
            log::info!(
                "✅ Leaderboard page: {} rows of {}",
                response.data.len(),
                response.total
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to build leaderboard: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Failed to build leaderboard",
                "error": e.message(),
            }))
        }
    }
}
