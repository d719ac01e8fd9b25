/// Business logic layer
///
/// Services own validation of related-entity references, transactional
/// nested writes, and media file bookkeeping. Handlers stay thin.
pub mod images;
pub mod news;
pub mod tags;

pub use images::ImageService;
pub use news::{CreateNews, NewsService, UpdateNews};
pub use tags::TagService;
