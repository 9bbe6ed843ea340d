use crate::model::Article;
use chrono::NaiveDateTime;

/// A list entry discovered on a listing or archive page, prior to enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Headline as rendered in the list
    pub title: String,

    /// Optional teaser rendered under the headline; prepended to the body
    pub subtitle: Option<String>,

    /// Absolute URL of the detail page
    pub link: String,

    /// Category label, when the list shows one
    pub tag: Option<String>,

    /// Date known from the list context (e.g. the archive day)
    pub date_hint: Option<NaiveDateTime>,
}

impl ListItem {
    /// Creates a list item with only a title and link
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            link: link.into(),
            tag: None,
            date_hint: None,
        }
    }

    /// Combines this item with its detail-page fields into an article
    ///
    /// The detail date wins over the list date hint. A subtitle, when present,
    /// is joined in front of the detail text with a newline.
    pub fn into_article(self, detail: DetailFields) -> Article {
        let body = match self.subtitle {
            Some(subtitle) => format!("{}\n{}", subtitle, detail.body),
            None => detail.body,
        };

        Article {
            id: 0,
            published_at: detail.published_at.or(self.date_hint),
            link: self.link,
            title: self.title,
            body,
            tags: self.tag.into_iter().collect(),
            metadata: Vec::new(),
        }
    }
}

/// Fields read from an article's detail page
///
/// Missing elements produce an empty body and/or absent date, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub body: String,
    pub published_at: Option<NaiveDateTime>,
}
