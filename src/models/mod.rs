pub mod announcement;
pub mod follow;
pub mod point_record;
pub mod user;

pub use announcement::*;
pub use follow::*;
pub use point_record::*;
pub use user::*;
