use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog_post::{BlogPost as DomainBlogPost, NewBlogPost as DomainNewBlogPost};
use crate::domain::types::{RowId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::blog_posts)]
/// Diesel model for [`crate::domain::blog_post::BlogPost`].
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::blog_posts)]
/// Insertable form of [`BlogPost`].
pub struct NewBlogPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub category: &'a str,
    pub excerpt: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
    pub featured: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(treat_none_as_null = true)]
/// Full replacement of the editable columns of a [`BlogPost`].
pub struct UpdateBlogPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub category: &'a str,
    pub excerpt: Option<&'a str>,
    pub body: &'a str,
    pub image_url: Option<&'a str>,
    pub featured: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BlogPost> for DomainBlogPost {
    type Error = TypeConstraintError;

    fn try_from(post: BlogPost) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RowId::new(post.id)?,
            title: post.title,
            slug: post.slug,
            author: post.author,
            category: post.category,
            excerpt: post.excerpt,
            body: post.body,
            image_url: post.image_url,
            featured: post.featured,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBlogPost> for NewBlogPost<'a> {
    fn from(post: &'a DomainNewBlogPost) -> Self {
        Self {
            title: post.title.as_str(),
            slug: post.slug.as_str(),
            author: post.author.as_str(),
            category: post.category.as_str(),
            excerpt: post.excerpt.as_deref(),
            body: post.body.as_str(),
            image_url: post.image_url.as_ref().map(|url| url.as_str()),
            featured: post.featured,
        }
    }
}

impl<'a> UpdateBlogPost<'a> {
    pub fn new(post: &'a DomainNewBlogPost, updated_at: NaiveDateTime) -> Self {
        let insert = NewBlogPost::from(post);
        Self {
            title: insert.title,
            slug: insert.slug,
            author: insert.author,
            category: insert.category,
            excerpt: insert.excerpt,
            body: insert.body,
            image_url: insert.image_url,
            featured: insert.featured,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Category, HtmlBody, PersonName, Title};

    #[test]
    fn insertable_borrows_validated_payload() {
        let domain = DomainNewBlogPost::new(
            Title::new("Hello World").unwrap(),
            PersonName::new("Anna").unwrap(),
            Category::new("news").unwrap(),
            HtmlBody::new("<p>hi</p><script>x</script>").unwrap(),
        )
        .unwrap()
        .featured(true);

        let insert: NewBlogPost = (&domain).into();
        assert_eq!(insert.slug, "hello-world");
        assert_eq!(insert.body, "<p>hi</p>");
        assert!(insert.featured);
        assert_eq!(insert.image_url, None);
    }

    #[test]
    fn non_positive_id_is_rejected() {
        let now = Utc::now().naive_utc();
        let row = BlogPost {
            id: 0,
            title: "t".into(),
            slug: "t".into(),
            author: "a".into(),
            category: "c".into(),
            excerpt: None,
            body: String::new(),
            image_url: None,
            featured: false,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainBlogPost::try_from(row).unwrap_err(),
            TypeConstraintError::NonPositiveId
        );
    }
}
