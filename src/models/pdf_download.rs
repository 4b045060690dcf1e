use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pdf_download::{
    NewPdfDownload as DomainNewPdfDownload, PdfDownload as DomainPdfDownload,
};
use crate::domain::types::{RowId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pdf_downloads)]
pub struct PdfDownload {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub downloaded_asset: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::pdf_downloads)]
#[diesel(treat_none_as_null = true)]
pub struct NewPdfDownload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub downloaded_asset: &'a str,
}

impl TryFrom<PdfDownload> for DomainPdfDownload {
    type Error = TypeConstraintError;

    fn try_from(download: PdfDownload) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RowId::new(download.id)?,
            name: download.name,
            email: download.email,
            phone: download.phone,
            company: download.company,
            downloaded_asset: download.downloaded_asset,
            created_at: download.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPdfDownload> for NewPdfDownload<'a> {
    fn from(download: &'a DomainNewPdfDownload) -> Self {
        Self {
            name: download.name.as_str(),
            email: download.email.as_str(),
            phone: download.phone.as_ref().map(|phone| phone.as_str()),
            company: download.company.as_ref().map(|company| company.as_str()),
            downloaded_asset: download.downloaded_asset.as_str(),
        }
    }
}
