use crate::{middleware::auth::CallerIdentity, services::ocr_service};
use actix_web::{web, HttpResponse};

/// POST /api/ocr - Printed-text extraction via the platform OCR API
#[utoipa::path(
    post,
    path = "/api/ocr",
    tag = "Ocr",
    request_body = ocr_service::OcrRequest,
    responses(
        (status = 200, description = "Recognized text plus the raw provider response"),
        (status = 400, description = "Neither file_id nor image_url supplied"),
        (status = 502, description = "Provider or network failure")
    )
)]
pub async fn extract_text(
    caller: web::ReqData<CallerIdentity>,
    request: web::Json<ocr_service::OcrRequest>,
) -> HttpResponse {
    log::info!(
        "🔍 POST /ocr - caller: {}, file_id: {:?}",
        caller.open_id,
        request.file_id
    );

    match ocr_service::extract_text(&request).await {
        Ok(response) => {
            log::info!("✅ OCR extracted {} chars", response.text.len());
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ OCR failed: {}", e);
            e.to_response()
        }
    }
}
