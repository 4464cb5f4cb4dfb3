use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
}

impl NewsArticle {
    /// Publish date as `YYYY-MM-DD`, empty when the provider omitted it.
    pub fn publish_date(&self) -> String {
        self.published
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsFeed {
    pub short_name: Option<String>,
    pub articles: Vec<NewsArticle>,
}
