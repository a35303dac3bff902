//! Course ratings.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{RatingId, Timestamp, UserId, ValidationError};

const MAX_COMMENT_LEN: usize = 2000;

/// Star value between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValidationError::out_of_range(
                "value",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// A rating left on a course by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub value: RatingValue,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Rating {
    pub fn new(
        user_id: UserId,
        value: RatingValue,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(c) = &comment {
            if c.chars().count() > MAX_COMMENT_LEN {
                return Err(ValidationError::out_of_range(
                    "comment",
                    0,
                    MAX_COMMENT_LEN as i64,
                    c.chars().count() as i64,
                ));
            }
        }
        Ok(Self {
            id: RatingId::new(),
            user_id,
            value,
            comment,
            created_at: Timestamp::now(),
        })
    }
}

/// Rating author as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingAuthor {
    pub id: UserId,
    /// `None` when the account has since been deleted.
    pub name: Option<String>,
}

/// A rating with its author resolved to a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: RatingId,
    pub user: RatingAuthor,
    pub value: RatingValue,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl RatingView {
    pub fn resolve(rating: &Rating, names: &HashMap<UserId, String>) -> Self {
        Self {
            id: rating.id,
            user: RatingAuthor {
                id: rating.user_id,
                name: names.get(&rating.user_id).cloned(),
            },
            value: rating.value,
            comment: rating.comment.clone(),
            created_at: rating.created_at,
        }
    }
}

/// Arithmetic mean of the rating values, or 0 when there are none.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: u32 = ratings.iter().map(|r| u32::from(r.value.value())).sum();
    f64::from(total) / ratings.len() as f64
}
