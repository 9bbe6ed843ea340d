use crate::model::Article;
use std::collections::BTreeMap;

/// Ordered, id-keyed collection of articles produced by a crawl
///
/// Ids are contiguous from 0 and equal to insertion order. The only way to add
/// an article is `push`, which assigns the next id, so the invariant holds for
/// every value of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    articles: BTreeMap<usize, Article>,
}

impl CrawlResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of articles in the result
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the result holds no articles
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The id the next pushed article will receive
    pub fn next_id(&self) -> usize {
        self.articles
            .last_key_value()
            .map(|(id, _)| id + 1)
            .unwrap_or(0)
    }

    /// Adds an article, overwriting its id with the next sequence number
    ///
    /// # Returns
    ///
    /// The id assigned to the article
    pub fn push(&mut self, mut article: Article) -> usize {
        let id = self.next_id();
        article.id = id;
        self.articles.insert(id, article);
        id
    }

    /// Gets an article by id
    pub fn get(&self, id: usize) -> Option<&Article> {
        self.articles.get(&id)
    }

    /// Iterates articles in id order
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> Vec<usize> {
        self.articles.keys().copied().collect()
    }

    /// Appends every article of `other`, renumbering them after this result's last id
    ///
    /// The ids carried by `other` are discarded; its insertion order is kept.
    pub fn append(&mut self, other: CrawlResult) {
        for article in other.articles.into_values() {
            self.push(article);
        }
    }

    /// Merges two results into a new one
    ///
    /// Entries of `first` keep their ids; entries of `second` are renumbered
    /// starting at `first.len()`.
    pub fn merge(first: CrawlResult, second: CrawlResult) -> CrawlResult {
        let mut merged = first;
        merged.append(second);
        merged
    }
}

impl FromIterator<Article> for CrawlResult {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        let mut result = CrawlResult::new();
        for article in iter {
            result.push(article);
        }
        result
    }
}
