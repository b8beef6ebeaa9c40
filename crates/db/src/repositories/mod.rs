//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod blog_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod guest_record_repo;
pub mod owner_visit_repo;
pub mod user_repo;
pub mod visit_log_repo;

pub use blog_repo::BlogRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use guest_record_repo::GuestRecordRepo;
pub use owner_visit_repo::OwnerVisitRepo;
pub use user_repo::UserRepo;
pub use visit_log_repo::VisitLogRepo;
