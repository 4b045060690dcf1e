use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{HtmlBody, Location, RowId, Title, WebUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: RowId,
    pub title: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEvent {
    pub title: Title,
    pub location: Location,
    pub starts_at: NaiveDateTime,
    pub description: HtmlBody,
    pub image_url: Option<WebUrl>,
}
