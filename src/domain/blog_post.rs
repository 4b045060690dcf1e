use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Category, HtmlBody, PersonName, RowId, Slug, Title, WebUrl};

/// Blog post as stored; the public blog index lists these.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: RowId,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    /// Candidate for the highlighted slot of the blog index.
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated payload used both to create and to replace a blog post.
#[derive(Clone, Debug, Deserialize)]
pub struct NewBlogPost {
    pub title: Title,
    pub slug: Slug,
    pub author: PersonName,
    pub category: Category,
    pub excerpt: Option<String>,
    pub body: HtmlBody,
    pub image_url: Option<WebUrl>,
    #[serde(default)]
    pub featured: bool,
}

impl NewBlogPost {
    /// Builds a payload whose slug is derived from the title.
    pub fn new(
        title: Title,
        author: PersonName,
        category: Category,
        body: HtmlBody,
    ) -> Result<Self, crate::domain::types::TypeConstraintError> {
        let slug = Slug::from_title(title.as_str())?;
        Ok(Self {
            title,
            slug,
            author,
            category,
            excerpt: None,
            body,
            image_url: None,
            featured: false,
        })
    }

    #[must_use]
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into().trim().to_string()).filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: WebUrl) -> Self {
        self.image_url = Some(url);
        self
    }

    #[must_use]
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }
}
