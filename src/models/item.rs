use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::error::AppError;

pub const BLANK_BODY_MESSAGE: &str = "The item body was empty or invalid.";

/// A to-do item as stored. Only its author may see or change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i32,
    pub body: String,
    pub done: bool,
    /// Identifier of the author.
    pub user_id: i32,
}

/// JSON payload for creating an item or replacing its body.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(required, custom = "validate_not_blank")]
    pub body: Option<String>,
}

fn validate_not_blank(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl ItemInput {
    /// Parses a raw JSON request body and yields the new item body.
    ///
    /// Unparsable payloads are reported like blank ones.
    pub fn parse(raw: &[u8]) -> Result<String, AppError> {
        serde_json::from_slice::<ItemInput>(raw)
            .map_err(|_| AppError::ValidationError(BLANK_BODY_MESSAGE.to_string()))?
            .into_body()
    }

    /// Validates the payload and yields the new body.
    ///
    /// Every failure is reported with the same message, whatever the cause.
    pub fn into_body(self) -> Result<String, AppError> {
        self.validate()
            .map_err(|_| AppError::ValidationError(BLANK_BODY_MESSAGE.to_string()))?;
        self.body
            .ok_or_else(|| AppError::ValidationError(BLANK_BODY_MESSAGE.to_string()))
    }
}

/// One of the three views over a user's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    All,
    /// Items with `done == false`.
    Active,
    /// Items with `done == true`.
    Completed,
}

impl Partition {
    pub fn contains(self, item: &Item) -> bool {
        match self {
            Partition::All => true,
            Partition::Active => !item.done,
            Partition::Completed => item.done,
        }
    }

    /// The `done` value selected by this partition, if any.
    pub fn done_filter(self) -> Option<bool> {
        match self {
            Partition::All => None,
            Partition::Active => Some(false),
            Partition::Completed => Some(true),
        }
    }

    /// Path of the collection relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            Partition::All => "/user/items",
            Partition::Active => "/user/items/active",
            Partition::Completed => "/user/items/completed",
        }
    }
}

/// Item totals per partition for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemCounts {
    pub all: i64,
    pub active: i64,
    pub completed: i64,
}

impl ItemCounts {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        items.into_iter().fold(Self::default(), |mut counts, item| {
            counts.all += 1;
            if item.done {
                counts.completed += 1;
            } else {
                counts.active += 1;
            }
            counts
        })
    }

    pub fn get(&self, partition: Partition) -> i64 {
        match partition {
            Partition::All => self.all,
            Partition::Active => self.active,
            Partition::Completed => self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, done: bool) -> Item {
        Item {
            id,
            body: format!("item {}", id),
            done,
            user_id: 1,
        }
    }

    #[test]
    fn test_item_input_validation() {
        let valid = ItemInput {
            body: Some("Buy milk".to_string()),
        };
        assert_eq!(valid.into_body().unwrap(), "Buy milk");

        for body in [None, Some(String::new()), Some("   ".to_string()), Some("\t\n".to_string())] {
            match (ItemInput { body }).into_body() {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, BLANK_BODY_MESSAGE),
                other => panic!("expected a validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_raw_payloads() {
        assert_eq!(ItemInput::parse(br#"{"body": "Walk the dog"}"#).unwrap(), "Walk the dog");

        let payloads: [&[u8]; 5] = [b"", b"{}", b"not json", br#"{"body": 3}"#, br#"{"body": "  "}"#];
        for raw in payloads {
            assert!(matches!(
                ItemInput::parse(raw),
                Err(AppError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_body_is_not_trimmed_when_stored() {
        let input = ItemInput {
            body: Some("  padded  ".to_string()),
        };
        assert_eq!(input.into_body().unwrap(), "  padded  ");
    }

    #[test]
    fn test_partition_membership() {
        let open = item(1, false);
        let closed = item(2, true);

        assert!(Partition::All.contains(&open) && Partition::All.contains(&closed));
        assert!(Partition::Active.contains(&open) && !Partition::Active.contains(&closed));
        assert!(!Partition::Completed.contains(&open) && Partition::Completed.contains(&closed));
    }

    #[test]
    fn test_item_counts() {
        let items = vec![item(1, false), item(2, true), item(3, false)];
        let counts = ItemCounts::from_items(&items);

        assert_eq!(
            counts,
            ItemCounts {
                all: 3,
                active: 2,
                completed: 1
            }
        );
        assert_eq!(counts.get(Partition::Active), 2);
        assert_eq!(counts.get(Partition::Completed), 1);
    }
}
