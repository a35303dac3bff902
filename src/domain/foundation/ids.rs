//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses a caller-supplied identifier, reporting the field name on failure.
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                raw.parse().map_err(|_| {
                    ValidationError::invalid_format($field, "not a well-formed identifier")
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a user account.
    UserId,
    "user_id"
);

uuid_id!(
    /// Unique identifier for a catalog course.
    CourseId,
    "course_id"
);

uuid_id!(
    /// Identifier of a lesson, stable across course updates.
    LessonId,
    "lesson_id"
);

uuid_id!(
    /// Unique identifier for a rating left on a course.
    RatingId,
    "rating_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(CourseId::new(), CourseId::new());
    }

    #[test]
    fn display_and_parse_agree() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_reports_field_name() {
        match CourseId::parse("not-a-uuid") {
            Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "course_id"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        let id = LessonId::new();
        assert_eq!(LessonId::parse(&format!(" {} ", id)).unwrap(), id);
    }

    #[test]
    fn serializes_as_bare_string() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let id = RatingId::from_uuid(uuid);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"67e55044-10b1-426f-9247-bb680e5fe0c8\""
        );
    }
}
