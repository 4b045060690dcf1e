use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, PersonName, PhoneNumber, RowId, Subject};

/// Inquiry submitted through the contact form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLead {
    pub name: PersonName,
    pub email: Email,
    pub phone: Option<PhoneNumber>,
    pub subject: Subject,
    pub message: String,
}

impl NewLead {
    #[must_use]
    pub fn new(
        name: PersonName,
        email: Email,
        phone: Option<PhoneNumber>,
        subject: Subject,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            subject,
            message: message.into().trim().to_string(),
        }
    }
}
