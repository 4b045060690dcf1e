use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::event::{Event as DomainEvent, NewEvent as DomainNewEvent};
use crate::domain::types::{RowId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub location: &'a str,
    pub starts_at: NaiveDateTime,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEvent<'a> {
    pub title: &'a str,
    pub location: &'a str,
    pub starts_at: NaiveDateTime,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Event> for DomainEvent {
    type Error = TypeConstraintError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RowId::new(event.id)?,
            title: event.title,
            location: event.location,
            starts_at: event.starts_at,
            description: event.description,
            image_url: event.image_url,
            created_at: event.created_at,
            updated_at: event.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEvent> for NewEvent<'a> {
    fn from(event: &'a DomainNewEvent) -> Self {
        Self {
            title: event.title.as_str(),
            location: event.location.as_str(),
            starts_at: event.starts_at,
            description: event.description.as_str(),
            image_url: event.image_url.as_ref().map(|url| url.as_str()),
        }
    }
}

impl<'a> UpdateEvent<'a> {
    pub fn new(event: &'a DomainNewEvent, updated_at: NaiveDateTime) -> Self {
        Self {
            title: event.title.as_str(),
            location: event.location.as_str(),
            starts_at: event.starts_at,
            description: event.description.as_str(),
            image_url: event.image_url.as_ref().map(|url| url.as_str()),
            updated_at,
        }
    }
}
