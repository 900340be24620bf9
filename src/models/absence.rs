use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AbsenceKind {
    Vacation,
    Sick,
}

impl AbsenceKind {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "vacation" => Some(Self::Vacation),
            "sick" => Some(Self::Sick),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "vacation",
            AbsenceKind::Sick => "sick",
        }
    }

    /// Lenient parse for CLI input ("vacation", "v", "sick", "s").
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vacation" | "v" => Some(Self::Vacation),
            "sick" | "s" => Some(Self::Sick),
            _ => None,
        }
    }
}

/// A whole-day absence range, inclusive on both ends.
/// Only consumed by the aggregator; never part of the segment state machine.
#[derive(Debug, Clone, Serialize)]
pub struct AbsenceRecord {
    pub id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate, // ⇔ absences.start_date (TEXT "YYYY-MM-DD")
    pub end_date: NaiveDate,   // ⇔ absences.end_date, >= start_date
    pub kind: AbsenceKind,
    pub description: String,
}
