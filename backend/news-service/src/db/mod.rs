/// Database access layer
///
/// Repository functions over sqlx. Multi-statement writes (nested tag
/// associations, cascading file cleanup) are composed into transactions by
/// the service layer.
pub mod image_repo;
pub mod news_repo;
pub mod tag_repo;
