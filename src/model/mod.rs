//! Entity model for crawl output
//!
//! - `ListItem`: a lightweight reference discovered on a listing or archive page
//! - `DetailFields`: the enrichment read from an item's detail page
//! - `Article`: the canonical output record
//! - `CrawlResult`: the ordered, id-keyed collection produced by one crawl

mod article;
mod item;
mod result;

pub use article::Article;
pub use item::{DetailFields, ListItem};
pub use result::CrawlResult;
