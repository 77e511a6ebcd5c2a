use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use thiserror::Error;

use crate::dao::models::PlayerEntity;

use super::error::{MongoDaoError, MongoResult};

/// Human readable description of the identifier form, used in error messages.
pub const OBJECT_ID_FORM: &str = "a 24-character hexadecimal ObjectId";

/// Field-level failure while turning a raw document into a player.
#[derive(Debug, Error)]
#[error("field `{field}` {problem}")]
pub struct DecodeError {
    field: &'static str,
    problem: &'static str,
}

impl DecodeError {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            problem: "is missing",
        }
    }

    fn wrong_type(field: &'static str) -> Self {
        Self {
            field,
            problem: "has an unexpected type",
        }
    }
}

/// Player as stored in the `players` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoPlayerDocument {
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub balance: f64,
}

impl MongoPlayerDocument {
    /// Mutable fields of `player`, without `_id`, so the server never sees a
    /// caller supplied identifier.
    pub fn fields(player: &PlayerEntity) -> Document {
        doc! {
            "name": player.name.as_str(),
            "surname": player.surname.as_str(),
            "balance": player.balance,
        }
    }
}

impl TryFrom<Document> for MongoPlayerDocument {
    type Error = DecodeError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(oid)) => *oid,
            Some(_) => return Err(DecodeError::wrong_type("_id")),
            None => return Err(DecodeError::missing("_id")),
        };

        Ok(Self {
            id,
            name: string_field(&document, "name")?,
            surname: string_field(&document, "surname")?,
            balance: number_field(&document, "balance")?,
        })
    }
}

impl From<MongoPlayerDocument> for PlayerEntity {
    fn from(value: MongoPlayerDocument) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name,
            surname: value.surname,
            balance: value.balance,
        }
    }
}

fn string_field(document: &Document, field: &'static str) -> Result<String, DecodeError> {
    match document.get(field) {
        Some(Bson::String(value)) => Ok(value.clone()),
        Some(_) => Err(DecodeError::wrong_type(field)),
        None => Err(DecodeError::missing(field)),
    }
}

// Other writers may have stored whole numbers as integers.
fn number_field(document: &Document, field: &'static str) -> Result<f64, DecodeError> {
    match document.get(field) {
        Some(Bson::Double(value)) => Ok(*value),
        Some(Bson::Int32(value)) => Ok(f64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value as f64),
        Some(_) => Err(DecodeError::wrong_type(field)),
        None => Err(DecodeError::missing(field)),
    }
}

/// Decode an external identifier into its ObjectId form.
pub fn parse_object_id(id: &str) -> MongoResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| MongoDaoError::InvalidId { id: id.to_owned() })
}

pub fn doc_id(id: ObjectId) -> Document {
    doc! {"_id": id}
}

/// Best-effort rendering of a raw document's `_id`, for log lines.
pub fn describe_id(document: &Document) -> String {
    match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => "<missing>".to_owned(),
    }
}
