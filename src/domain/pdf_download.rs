use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AssetName, CompanyName, Email, PersonName, PhoneNumber, RowId};

/// Contact details left by a visitor in exchange for a PDF asset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PdfDownload {
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub downloaded_asset: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPdfDownload {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub company: Option<CompanyName>,
    pub downloaded_asset: AssetName,
}
