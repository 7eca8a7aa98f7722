/// All primary keys are SQLite `INTEGER PRIMARY KEY` values.
pub type DbId = i64;

/// Event start times are stored without an offset, as entered by the organiser.
pub type EventDateTime = chrono::NaiveDateTime;
