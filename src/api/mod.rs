pub mod announcements;
pub mod follows;
pub mod health;
pub mod identity;
pub mod leaderboard;
pub mod ocr;
pub mod point_records;
pub mod swagger;
