use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Category, HtmlBody, PersonName, RowId, Title, WebUrl};

/// Article curated in the console, optionally pointing to an external source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: RowId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub source_url: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewArticle {
    pub title: Title,
    pub author: PersonName,
    pub category: Category,
    pub source_url: Option<WebUrl>,
    pub body: HtmlBody,
    pub image_url: Option<WebUrl>,
}
