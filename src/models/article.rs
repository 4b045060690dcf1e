use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::domain::types::{RowId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub category: String,
    pub source_url: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub category: &'a str,
    pub source_url: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateArticle<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub category: &'a str,
    pub source_url: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Article> for DomainArticle {
    type Error = TypeConstraintError;

    fn try_from(article: Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RowId::new(article.id)?,
            title: article.title,
            author: article.author,
            category: article.category,
            source_url: article.source_url,
            body: article.body,
            image_url: article.image_url,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(article: &'a DomainNewArticle) -> Self {
        Self {
            title: article.title.as_str(),
            author: article.author.as_str(),
            category: article.category.as_str(),
            source_url: article.source_url.as_ref().map(|url| url.as_str()),
            body: article.body.as_str(),
            image_url: article.image_url.as_ref().map(|url| url.as_str()),
        }
    }
}

impl<'a> UpdateArticle<'a> {
    pub fn new(article: &'a DomainNewArticle, updated_at: NaiveDateTime) -> Self {
        let insert = NewArticle::from(article);
        Self {
            title: insert.title,
            author: insert.author,
            category: insert.category,
            source_url: insert.source_url,
            body: insert.body,
            image_url: insert.image_url,
            updated_at,
        }
    }
}
