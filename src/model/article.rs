use chrono::NaiveDateTime;

/// A single news article as produced by a crawl
///
/// The `id` is the insertion sequence number inside the owning `CrawlResult`.
/// It is assigned by `CrawlResult::push` and is not stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Sequence number within the crawl result (0-based)
    pub id: usize,

    /// Publish timestamp, absent when date extraction failed
    pub published_at: Option<NaiveDateTime>,

    /// Absolute URL of the article
    pub link: String,

    /// Article headline
    pub title: String,

    /// Article text, empty when detail extraction failed
    pub body: String,

    /// Category labels, commonly a single element
    pub tags: Vec<String>,

    /// Free-form, source-defined strings
    pub metadata: Vec<String>,
}

impl Article {
    /// Creates an article with the given link and title and empty remaining fields
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            published_at: None,
            link: link.into(),
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Sets the article body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the publish timestamp
    pub fn with_published_at(mut self, published_at: Option<NaiveDateTime>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Appends a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
