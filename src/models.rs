use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// A stored movie as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub year: i32,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<movie::Model> for Movie {
    type Error = jiff::Error;

    fn try_from(model: movie::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: Timestamp::from_microsecond(model.created_at)?,
            updated_at: Timestamp::from_microsecond(model.updated_at)?,
            id: model.id,
            name: model.name,
            description: model.description,
            year: model.year,
            image: model.image,
        })
    }
}

/// Request body for create and update, taken as sent. Unknown keys such as
/// `id` or `createdAt` are ignored so a full record can be echoed back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<YearInput>,
    pub image: Option<String>,
}

/// Form fields arrive as text; JSON clients send numbers. Anything else is
/// kept so validation can report it against the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// The mutable fields of a movie after validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub name: String,
    pub description: String,
    pub year: i32,
    pub image: String,
}

impl From<&MovieDraft> for MovieInput {
    fn from(draft: &MovieDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            description: Some(draft.description.clone()),
            year: Some(YearInput::Number(draft.year.into())),
            image: Some(draft.image.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
