//! Soft-delete state as a tagged value at the domain layer, stored as a
//! nullable `deleted_at` field at the persistence boundary.

use mongodb::bson::{doc, DateTime, Document};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Filter fragment selecting only live documents; every read, update, and
/// delete path starts from this.
#[must_use]
pub fn active_filter() -> Document {
    doc! {"deleted_at": {"$exists": false}}
}

/// Whether a document is live or has been soft-deleted.
///
/// Serializes to the nullable `deleted_at` storage representation: `Active`
/// is an absent (or null) field, `Deleted` carries the deletion timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deletion {
    #[default]
    Active,
    Deleted(DateTime),
}

impl Deletion {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime> {
        match self {
            Self::Active => None,
            Self::Deleted(at) => Some(*at),
        }
    }
}

impl From<Option<DateTime>> for Deletion {
    fn from(at: Option<DateTime>) -> Self {
        at.map_or(Self::Active, Self::Deleted)
    }
}

impl Serialize for Deletion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.deleted_at().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Deletion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<DateTime>::deserialize(deserializer)?.into())
    }
}
