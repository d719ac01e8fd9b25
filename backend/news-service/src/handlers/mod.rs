/// HTTP handlers for the news API
///
/// This module contains handlers for:
/// - News: article CRUD, like/dislike/view counters, featured image upload
/// - Tags: label CRUD
/// - Images: gallery image CRUD with multipart upload
/// - Stats: aggregate site statistics
pub mod images;
pub mod news;
pub mod stats;
pub mod tags;

// Re-export handler functions at module level
pub use images::{delete_image, get_image, list_images, update_image, upload_image};
pub use news::{
    create_news, delete_news, dislike_news, get_news, like_news, list_news, update_news,
    upload_featured_image, view_news,
};
pub use stats::get_stats;
pub use tags::{create_tag, delete_tag, get_tag, list_tags, update_tag};
