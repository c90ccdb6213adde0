use serde::{Deserialize, Serialize};

/// Status assigned to a record when none is supplied.
pub const DEFAULT_STATUS: &str = "applied";

/// One stored job application. Field order matches the `applications`
/// table and the CSV export column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub location: String,
    pub date_applied: String,
    pub status: String,
    pub source: String,
    pub salary: String,
    pub notes: String,
    pub last_updated: String,
}

/// Input for creating a record. `company` and `role` must be non-empty
/// after trimming; everything else may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub location: String,
    pub date_applied: String,
    pub status: String,
    pub source: String,
    pub salary: String,
    pub notes: String,
}

impl NewApplication {
    pub fn status_or_default(&self) -> &str {
        if self.status.trim().is_empty() {
            DEFAULT_STATUS
        } else {
            &self.status
        }
    }
}

/// Partial update for one record: one slot per mutable column.
/// `None` means leave the column unchanged. A present-but-empty value is
/// skipped the same way, so an update can never blank out a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub date_applied: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

impl ApplicationPatch {
    /// The (column, value) pairs this patch would write.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        let slots = [
            ("company", &self.company),
            ("role", &self.role),
            ("location", &self.location),
            ("date_applied", &self.date_applied),
            ("status", &self.status),
            ("source", &self.source),
            ("salary", &self.salary),
            ("notes", &self.notes),
        ];
        slots
            .into_iter()
            .filter_map(|(column, value)| match value.as_deref() {
                Some(value) if !value.is_empty() => Some((column, value)),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

/// One row of a CSV import: the eight content columns, each defaulting to
/// empty when the column is missing. `id` and `last_updated` columns in the
/// input are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportRow {
    pub company: String,
    pub role: String,
    pub location: String,
    pub date_applied: String,
    pub status: String,
    pub source: String,
    pub salary: String,
    pub notes: String,
}

impl From<ImportRow> for NewApplication {
    fn from(row: ImportRow) -> Self {
        Self {
            company: row.company,
            role: row.role,
            location: row.location,
            date_applied: row.date_applied,
            status: row.status,
            source: row.source,
            salary: row.salary,
            notes: row.notes,
        }
    }
}

/// One aggregate row: a status value and how many records hold it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
