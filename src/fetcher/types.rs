use chrono::{DateTime, Utc};
use url::Url;

/// A downloaded article page, decoded to UTF-8.
#[derive(Debug)]
pub struct FetchedPage {
    pub url_final: Url,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}
