/// Database models and their SQL operations
///
/// One module per table:
///
/// - `user`: User accounts
/// - `project`: Projects owned by users
/// - `task`: Tasks within projects
/// - `comment`: Comments attached to tasks
/// - `task_history`: Append-only audit records for task changes

pub mod comment;
pub mod project;
pub mod task;
pub mod task_history;
pub mod user;

/// Date column allow-list for sorting and filtering
///
/// Projects and tasks can only be sorted or filtered by one of these two
/// columns. Anything else is rejected at parse time, which keeps the column
/// name out of reach of dynamically built SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    StartDate,
    EndDate,
}

impl DateField {
    /// Parses a client-supplied field name, returning `None` for anything
    /// outside the allow-list.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start_date" => Some(DateField::StartDate),
            "end_date" => Some(DateField::EndDate),
            _ => None,
        }
    }

    /// Returns the column name for use in ORDER BY / WHERE clauses.
    pub fn as_column(&self) -> &'static str {
        match self {
            DateField::StartDate => "start_date",
            DateField::EndDate => "end_date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_field_parse() {
        assert_eq!(DateField::parse("start_date"), Some(DateField::StartDate));
        assert_eq!(DateField::parse("end_date"), Some(DateField::EndDate));
        assert_eq!(DateField::parse("created_at"), None);
        assert_eq!(DateField::parse("START_DATE"), None);
        assert_eq!(DateField::parse(""), None);
    }

    #[test]
    fn test_date_field_column() {
        assert_eq!(DateField::StartDate.as_column(), "start_date");
        assert_eq!(DateField::EndDate.as_column(), "end_date");
    }
}
