use crate::{database::MongoDB, services::announcement_service};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AnnouncementsQuery {
    pub limit: Option<i64>,
    #[serde(default)]
    pub home_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Announcements",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
        ("home_only" = Option<bool>, Query, description = "Only announcements flagged for the home page")
    ),
    responses(
        (status = 200, description = "Announcements by recency; seeds the default points rules when empty"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_announcements(
    db: web::Data<MongoDB>,
    query: web::Query<AnnouncementsQuery>,
) -> HttpResponse {
    log::info!(
        "📢 GET /announcements - limit: {:?}, home_only: {}",
        query.limit,
        query.home_only
    );

    match announcement_service::list_announcements(db.get_ref(), query.limit, query.home_only)
        .await
    {
        Ok(response) => {
            log::info!("✅ Announcements returned: {}", response.data.len());
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to list announcements: {}", e);
            e.to_response()
        }
    }
}
