//! Primary-key assignment contiguous with reference data.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{LoaderError, Result};

/// Keys `floor + 1 ..= floor + count` for new rows, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyPlan {
    /// Primary-key column
    pub column: String,
    /// Largest key present in the reference data
    pub floor: i64,
    /// Number of keys to assign
    pub count: usize,
}

impl PrimaryKeyPlan {
    /// Derives the plan from the maximum key in `reference`.
    ///
    /// Fails with `InvalidReference` when the reference has no rows, lacks the
    /// column, holds a non-integer key, or has no keys at all.
    pub fn derive(reference: &Dataset, column: &str, count: usize) -> Result<Self> {
        let invalid = |reason: String| LoaderError::InvalidReference {
            column: column.to_string(),
            reason,
        };

        if reference.is_empty() {
            return Err(invalid("reference dataset has no rows".to_string()));
        }
        let values = reference
            .column_values(column)
            .ok_or_else(|| invalid("column not present in reference dataset".to_string()))?;

        let mut floor: Option<i64> = None;
        for (row, value) in values.enumerate() {
            if value.is_missing() {
                continue;
            }
            let key = value.as_integer().ok_or_else(|| {
                invalid(format!(
                    "non-integer key '{}' in row {}",
                    value.to_plain_string(),
                    row
                ))
            })?;
            floor = Some(floor.map_or(key, |f| f.max(key)));
        }
        let Some(floor) = floor else {
            return Err(invalid("reference keys are all null".to_string()));
        };

        let count_i64 = i64::try_from(count).unwrap_or(i64::MAX);
        if floor.checked_add(count_i64).is_none() {
            return Err(invalid(format!("assigning {} keys after {} overflows", count, floor)));
        }

        Ok(Self {
            column: column.to_string(),
            floor,
            count,
        })
    }

    /// Keys in assignment order.
    pub fn keys(&self) -> impl Iterator<Item = i64> {
        let floor = self.floor;
        (1..=self.count as i64).map(move |i| floor + i)
    }

    /// First assigned key, if any rows are added.
    pub fn first(&self) -> Option<i64> {
        (self.count > 0).then(|| self.floor + 1)
    }

    /// Last assigned key, if any rows are added.
    pub fn last(&self) -> Option<i64> {
        (self.count > 0).then(|| self.floor + self.count as i64)
    }
}
