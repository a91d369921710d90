pub mod admin_service;
pub mod announcement_service;
pub mod follow_service;
pub mod leaderboard_service;
pub mod ocr_service;
pub mod point_record_service;
