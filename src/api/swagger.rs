use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Points Service API",
        version = "1.0.0",
        description = "Backend for the points mini-program. \n\n**Authentication:** caller identity is resolved from the hosting platform's injected headers; endpoints under /api that read or disclose per-user data require them.\n\n**Features:**\n- Points leaderboard with page-relative ranking\n- Follow relationship checks\n- Announcements with default seeding\n- Admin-gated point record details"
    ),
    paths(
        crate::api::health::health_check,
        crate::api::leaderboard::get_leaderboard,
        crate::api::announcements::get_announcements,
        crate::api::follows::get_follow_status,
        crate::api::point_records::get_record_detail,
        crate::api::identity::resolve_identity,
        crate::api::ocr::extract_text,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::leaderboard_service::LeaderboardResponse,
            crate::services::leaderboard_service::RankedRow,
            crate::services::ocr_service::OcrRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Leaderboard", description = "Public ranking over users with positive points."),
        (name = "Announcements", description = "Announcement listing with bootstrap default seeding."),
        (name = "Follows", description = "Directed follow relationship checks."),
        (name = "PointRecords", description = "Admin-gated point record details."),
        (name = "Identity", description = "Caller identity echo."),
        (name = "Ocr", description = "Printed-text extraction through the platform OCR API.")
    )
)]
pub struct ApiDoc;
