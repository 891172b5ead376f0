use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

pub const DAY: &str = "day";
pub const TRACK_ID: &str = "track_id";
pub const TRACK_NAME: &str = "track_name";
pub const TRACK_START: &str = "track_start";
pub const TRACK_END: &str = "track_end";
pub const TRACK_CHAIR: &str = "track_chair";
pub const YOUTUBE: &str = "youtube";
pub const DISCORD: &str = "discord";
pub const CONFERENCE: &str = "conference";
pub const PAPER_ID: &str = "paper_id";
pub const PAPER_START: &str = "paper_start";
pub const PAPER_END: &str = "paper_end";
pub const AUTHOR_NAME: &str = "author_name";
pub const PAPER_TITLE: &str = "paper_title";
pub const PRESENTATION_TYPE: &str = "oral_spotlight_poster";

/// Columns without which a row cannot be placed in the merged table.
pub const REQUIRED_COLUMNS: [&str; 3] = [DAY, TRACK_START, TRACK_ID];

/// Raw rows of one sheet, each mapping column header to cell text.
pub type RawRow = IndexMap<String, String>;

/// Sheet name → rows, in the order the sheets were requested.
pub type SheetSet = IndexMap<String, Vec<RawRow>>;

/// One scheduled item taken from a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Name of the sheet the row was read from.
    pub sheet: String,
    /// Column header → cell text, as read.
    pub cells: RawRow,
}

impl Row {
    /// Creates a row read from `sheet`.
    pub fn new(sheet: impl Into<String>, cells: RawRow) -> Self {
        Self {
            sheet: sheet.into(),
            cells,
        }
    }

    /// Returns the cell text for `column`, `None` when the sheet has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns the cell text for `column`, or an empty string.
    pub fn text(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    /// Returns the trimmed cell text when it is present and non-blank.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.get(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Trimmed `day` cell.
    pub fn day(&self) -> &str {
        self.text(DAY).trim()
    }

    /// Trimmed `track_id` cell.
    pub fn track_id(&self) -> &str {
        self.text(TRACK_ID).trim()
    }

    /// Trimmed `track_start` cell. Zero-padded `HH:MM` values sort correctly
    /// as strings.
    pub fn track_start(&self) -> &str {
        self.text(TRACK_START).trim()
    }

    /// Conference tag of the row; falls back to the sheet name when the
    /// `conference` column is blank.
    pub fn conference(&self) -> &str {
        self.value(CONFERENCE).unwrap_or(&self.sheet)
    }

    /// True when every column in `columns` is present and non-blank.
    pub fn is_complete<'a>(&self, mut columns: impl Iterator<Item = &'a String>) -> bool {
        columns.all(|column| self.value(column).is_some())
    }
}

/// All sheets merged into one sequence, ordered by day rank then track start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedTable {
    /// Union of column headers over every row, in first-seen order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl MergedTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with no missing or blank cell in any column of the table.
    pub fn complete_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|row| row.is_complete(self.columns.iter()))
    }

    /// Rows scheduled on `day`, in table order.
    pub fn rows_on<'a>(&'a self, day: &'a str) -> impl Iterator<Item = &'a Row> {
        self.rows.iter().filter(move |row| row.day() == day)
    }
}

/// Ordered list of the days a conference runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceDays(Vec<String>);

impl ConferenceDays {
    /// Creates the list from day names, in conference order.
    pub fn new<I, S>(days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(days.into_iter().map(Into::into).collect())
    }

    /// Position of `day` in the list. Unknown days rank after every known day.
    pub fn rank(&self, day: &str) -> usize {
        self.0
            .iter()
            .position(|known| known == day)
            .unwrap_or(self.0.len())
    }

    /// True when `day` is one of the conference days.
    pub fn contains(&self, day: &str) -> bool {
        self.0.iter().any(|known| known == day)
    }

    /// Day names in conference order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of conference days.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ConferenceDays {
    fn default() -> Self {
        Self::new(["Monday", "Tuesday", "Wednesday", "Thursday"])
    }
}

/// Presentation type → icon class shown next to an entry and in the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconMap(IndexMap<String, String>);

impl IconMap {
    /// Creates the map from `(presentation type, icon class)` pairs; the order
    /// is kept for the legend.
    pub fn new<I, K, V>(icons: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            icons
                .into_iter()
                .map(|(key, icon)| (key.into(), icon.into()))
                .collect(),
        )
    }

    /// Looks up the icon class for a presentation type.
    pub fn resolve(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ToolError::IconLookup(key.to_string()))
    }

    /// `(presentation type, icon class)` pairs in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, icon)| (key.as_str(), icon.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for IconMap {
    fn default() -> Self {
        Self::new([
            ("oral", "far fa-comments"),
            ("spotlight", "far fa-lightbulb"),
            ("poster", "fas fa-map"),
            ("fast-forward", "fas fa-fast-forward"),
            ("social", "fas fa-user-friends"),
            ("paper", "far fa-file"),
            ("short", "fas fa-ruler"),
        ])
    }
}

/// One paper or talk within a track. Fields are only set when the source
/// cell carried a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Resolved icon class, not the raw presentation type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oral_spotlight_poster: Option<String>,
}

/// A parallel session with its header data and the entries scheduled in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    pub conference: String,
    pub track_title: String,
    pub start_time: String,
    pub end_time: String,
    pub youtube: String,
    pub discord: String,
    pub chair: String,
    /// Paper id → entry, in table order.
    pub entries: IndexMap<String, Entry>,
}

/// Track id → track, in the order tracks are first scheduled.
pub type TrackMap = IndexMap<String, Track>;
