//! Row builders shared by the listing unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::blog_post::BlogPost;
use crate::domain::lead::Lead;
use crate::domain::pdf_download::PdfDownload;
use crate::domain::row::Row;
use crate::domain::types::RowId;

pub fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(9, minute % 60, 0))
        .expect("valid timestamp")
}

pub fn post(id: i32, title: &str) -> Row {
    Row::BlogPost(BlogPost {
        id: RowId::new(id).expect("positive id"),
        title: title.to_string(),
        slug: format!("post-{id}"),
        author: "Anna".to_string(),
        category: "news".to_string(),
        excerpt: None,
        body: "<p>body</p>".to_string(),
        image_url: None,
        featured: false,
        created_at: at(id as u32),
        updated_at: at(id as u32),
    })
}

pub fn featured_post(id: i32, title: &str) -> Row {
    match post(id, title) {
        Row::BlogPost(post) => Row::BlogPost(BlogPost {
            featured: true,
            ..post
        }),
        other => other,
    }
}

/// `count` posts with ids `1..=count`, titled "Post N".
pub fn posts(count: i32) -> Vec<Row> {
    (1..=count).map(|id| post(id, &format!("Post {id}"))).collect()
}

pub fn lead(id: i32, name: &str, subject: &str) -> Row {
    Row::Lead(Lead {
        id: RowId::new(id).expect("positive id"),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: Some("+14155552671".to_string()),
        subject: subject.to_string(),
        message: "Please call me back".to_string(),
        created_at: at(id as u32),
    })
}

pub fn download(id: i32, name: &str, company: &str) -> Row {
    Row::PdfDownload(PdfDownload {
        id: RowId::new(id).expect("positive id"),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        company: Some(company.to_string()),
        downloaded_asset: "pricing.pdf".to_string(),
        created_at: at(id as u32),
    })
}
