/// Data models for news-service
///
/// This module defines structures for:
/// - News: published articles with counters and a featured image
/// - Tag: unique labels used to categorize articles
/// - NewsImage: gallery images owned by one article
pub mod news;
pub mod news_image;
pub mod tag;

pub use news::{News, NewsDetail, NewsStatus};
pub use news_image::NewsImage;
pub use tag::Tag;
