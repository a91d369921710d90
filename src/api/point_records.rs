use crate::{
    database::MongoDB, middleware::auth::CallerIdentity, services::point_record_service,
};
use actix_web::{web, HttpResponse};

/// GET /api/point-records/{record_id} - Admin-only record detail
#[utoipa::path(
    get,
    path = "/api/point-records/{record_id}",
    tag = "PointRecords",
    params(
        ("record_id" = String, Path, description = "Id of the point record")
    ),
    responses(
        (status = 200, description = "Full record document"),
        (status = 400, description = "Empty record id"),
        (status = 403, description = "Caller lacks admin privilege"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_record_detail(
    caller: web::ReqData<CallerIdentity>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    let record_id = path.into_inner();

    log::info!(
        "📝 GET /point-records/{} - caller: {}",
        record_id,
        caller.open_id
    );

    match point_record_service::get_record_detail(db.get_ref(), &caller.open_id, &record_id).await
    {
        Ok(record) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "record": record,
        })),
        Err(e) => {
            log::warn!("⚠️ Record detail refused: {}", e);
            e.to_response()
        }
    }
}
