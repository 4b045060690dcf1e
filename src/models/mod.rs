//! Database models and request-level models of the site console.

pub mod article;
#[cfg(feature = "server")]
pub mod auth;
pub mod blog_post;
#[cfg(feature = "server")]
pub mod config;
pub mod event;
pub mod lead;
pub mod pdf_download;
