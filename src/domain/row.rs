//! Tagged union over every record kind the listing engine can show.
//!
//! The listing engine only ever looks at the common subset (identifier,
//! creation time, textual fields by [`Field`]); rendering code matches on the
//! variant for kind-specific columns.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::article::{Article, NewArticle};
use crate::domain::blog_post::{BlogPost, NewBlogPost};
use crate::domain::event::{Event, NewEvent};
use crate::domain::lead::{Lead, NewLead};
use crate::domain::pdf_download::{NewPdfDownload, PdfDownload};
use crate::domain::types::RowId;

/// Which table a row belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RowKind {
    #[serde(rename = "blog_posts")]
    BlogPost,
    #[serde(rename = "articles")]
    Article,
    #[serde(rename = "events")]
    Event,
    #[serde(rename = "leads")]
    Lead,
    #[serde(rename = "pdf_downloads")]
    PdfDownload,
}

impl RowKind {
    pub const ALL: [RowKind; 5] = [
        RowKind::BlogPost,
        RowKind::Article,
        RowKind::Event,
        RowKind::Lead,
        RowKind::PdfDownload,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RowKind::BlogPost => "blog_posts",
            RowKind::Article => "articles",
            RowKind::Event => "events",
            RowKind::Lead => "leads",
            RowKind::PdfDownload => "pdf_downloads",
        }
    }
}

impl Display for RowKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`RowKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown row kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for RowKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RowKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Column that can be filtered or sorted on.
///
/// Which fields are valid for a given screen is declared by its
/// [`crate::listing::ListingConfig`]; the repository rejects fields that do
/// not exist on the queried table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Author,
    Category,
    Location,
    StartsAt,
    Name,
    Email,
    Phone,
    Subject,
    Company,
    DownloadedAsset,
    CreatedAt,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Title,
        Field::Author,
        Field::Category,
        Field::Location,
        Field::StartsAt,
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Subject,
        Field::Company,
        Field::DownloadedAsset,
        Field::CreatedAt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Category => "category",
            Field::Location => "location",
            Field::StartsAt => "starts_at",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Subject => "subject",
            Field::Company => "company",
            Field::DownloadedAsset => "downloaded_asset",
            Field::CreatedAt => "created_at",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Read-through copy of a stored record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "row")]
pub enum Row {
    #[serde(rename = "blog_posts")]
    BlogPost(BlogPost),
    #[serde(rename = "articles")]
    Article(Article),
    #[serde(rename = "events")]
    Event(Event),
    #[serde(rename = "leads")]
    Lead(Lead),
    #[serde(rename = "pdf_downloads")]
    PdfDownload(PdfDownload),
}

impl Row {
    pub fn kind(&self) -> RowKind {
        match self {
            Row::BlogPost(_) => RowKind::BlogPost,
            Row::Article(_) => RowKind::Article,
            Row::Event(_) => RowKind::Event,
            Row::Lead(_) => RowKind::Lead,
            Row::PdfDownload(_) => RowKind::PdfDownload,
        }
    }

    pub fn id(&self) -> RowId {
        match self {
            Row::BlogPost(post) => post.id,
            Row::Article(article) => article.id,
            Row::Event(event) => event.id,
            Row::Lead(lead) => lead.id,
            Row::PdfDownload(download) => download.id,
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        match self {
            Row::BlogPost(post) => post.created_at,
            Row::Article(article) => article.created_at,
            Row::Event(event) => event.created_at,
            Row::Lead(lead) => lead.created_at,
            Row::PdfDownload(download) => download.created_at,
        }
    }

    /// Textual value of `field`, or `None` when the kind has no such column
    /// or the column is empty.
    pub fn text(&self, field: Field) -> Option<&str> {
        match (self, field) {
            (Row::BlogPost(p), Field::Title) => Some(p.title.as_str()),
            (Row::BlogPost(p), Field::Author) => Some(p.author.as_str()),
            (Row::BlogPost(p), Field::Category) => Some(p.category.as_str()),
            (Row::Article(a), Field::Title) => Some(a.title.as_str()),
            (Row::Article(a), Field::Author) => Some(a.author.as_str()),
            (Row::Article(a), Field::Category) => Some(a.category.as_str()),
            (Row::Event(e), Field::Title) => Some(e.title.as_str()),
            (Row::Event(e), Field::Location) => Some(e.location.as_str()),
            (Row::Lead(l), Field::Name) => Some(l.name.as_str()),
            (Row::Lead(l), Field::Email) => Some(l.email.as_str()),
            (Row::Lead(l), Field::Phone) => l.phone.as_deref(),
            (Row::Lead(l), Field::Subject) => Some(l.subject.as_str()),
            (Row::PdfDownload(d), Field::Name) => Some(d.name.as_str()),
            (Row::PdfDownload(d), Field::Email) => Some(d.email.as_str()),
            (Row::PdfDownload(d), Field::Phone) => d.phone.as_deref(),
            (Row::PdfDownload(d), Field::Company) => d.company.as_deref(),
            (Row::PdfDownload(d), Field::DownloadedAsset) => Some(d.downloaded_asset.as_str()),
            _ => None,
        }
    }
}

/// Validated write payload for any row kind.
#[derive(Clone, Debug)]
pub enum NewRow {
    BlogPost(NewBlogPost),
    Article(NewArticle),
    Event(NewEvent),
    Lead(NewLead),
    PdfDownload(NewPdfDownload),
}

impl NewRow {
    pub fn kind(&self) -> RowKind {
        match self {
            NewRow::BlogPost(_) => RowKind::BlogPost,
            NewRow::Article(_) => RowKind::Article,
            NewRow::Event(_) => RowKind::Event,
            NewRow::Lead(_) => RowKind::Lead,
            NewRow::PdfDownload(_) => RowKind::PdfDownload,
        }
    }

    /// Decodes a JSON payload for the given kind; field validation happens
    /// in the value object deserializers.
    pub fn from_json(kind: RowKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            RowKind::BlogPost => NewRow::BlogPost(serde_json::from_value(value)?),
            RowKind::Article => NewRow::Article(serde_json::from_value(value)?),
            RowKind::Event => NewRow::Event(serde_json::from_value(value)?),
            RowKind::Lead => NewRow::Lead(serde_json::from_value(value)?),
            RowKind::PdfDownload => NewRow::PdfDownload(serde_json::from_value(value)?),
        })
    }
}
