//! Partial updates as an explicit field-update set: only fields a caller set
//! on the DTO are written, and any non-empty write touches `updated_at`.

use mongodb::bson::{doc, Bson, DateTime, Document};

#[derive(Debug, Default)]
pub struct UpdateSet {
    set: Document,
}

impl UpdateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field when the caller supplied a value.
    pub fn field(&mut self, name: &str, value: Option<impl Into<Bson>>) -> &mut Self {
        if let Some(value) = value {
            self.set.insert(name, value.into());
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Build the `$set` update document. Touches `updated_at`, so callers must
    /// check [`is_empty`](Self::is_empty) first to keep "nothing to update" a
    /// no-op.
    #[must_use]
    pub fn into_update(mut self) -> Document {
        self.set.insert("updated_at", DateTime::now());
        doc! {"$set": self.set}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_skipped() {
        let mut set = UpdateSet::new();
        set.field("title", None::<String>)
            .field("order", None::<i32>);
        assert!(set.is_empty());
    }

    #[test]
    fn test_present_fields_are_collected() {
        let mut set = UpdateSet::new();
        set.field("title", Some("Intro".to_string()))
            .field("order", Some(2))
            .field("is_draft", Some(false));

        let update = set.into_update();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "Intro");
        assert_eq!(set.get_i32("order").unwrap(), 2);
        assert!(!set.get_bool("is_draft").unwrap());
        assert!(set.contains_key("updated_at"));
    }

    #[test]
    fn test_tags_list_field() {
        let mut set = UpdateSet::new();
        set.field("tags", Some(vec!["rust".to_string(), "intro".to_string()]));
        let update = set.into_update();
        let tags = update.get_document("$set").unwrap().get_array("tags").unwrap();
        assert_eq!(tags.len(), 2);
    }
}
