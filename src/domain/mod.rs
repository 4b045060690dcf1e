//! Domain entities listed and edited through the site console.

pub mod article;
pub mod blog_post;
pub mod event;
pub mod lead;
pub mod pdf_download;
pub mod row;
pub mod types;
