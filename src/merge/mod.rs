use tracing::{info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::model::{ConferenceDays, MergedTable, REQUIRED_COLUMNS, Row, SheetSet};

/// Concatenates every sheet into one table and orders it by day rank, then by
/// track start. Sheets are taken in the order of `sheets`; the sort is stable,
/// so rows with equal keys keep that concatenation order. Rows on days outside
/// `days` are kept and sorted after all known days.
#[instrument(level = "info", skip_all, fields(sheet_count = sheets.len()))]
pub fn merge_sheets(sheets: &SheetSet, days: &ConferenceDays) -> Result<MergedTable> {
    let mut table = MergedTable::default();

    for (sheet, raw_rows) in sheets {
        for (index, cells) in raw_rows.iter().enumerate() {
            for column in REQUIRED_COLUMNS {
                if !cells.contains_key(column) {
                    return Err(ToolError::Schema {
                        sheet: sheet.clone(),
                        // Header is spreadsheet row 1.
                        row: index + 2,
                        column: column.to_string(),
                    });
                }
            }

            for column in cells.keys() {
                if !table.columns.contains(column) {
                    table.columns.push(column.clone());
                }
            }

            let row = Row::new(sheet.clone(), cells.clone());
            if !days.contains(row.day()) {
                warn!(
                    sheet = %sheet,
                    day = row.day(),
                    track_id = row.track_id(),
                    "row scheduled outside the conference days"
                );
            }
            table.rows.push(row);
        }
    }

    table.rows.sort_by(|lhs, rhs| {
        days.rank(lhs.day())
            .cmp(&days.rank(rhs.day()))
            .then_with(|| lhs.track_start().cmp(rhs.track_start()))
    });

    info!(row_count = table.len(), "merged sheets");
    Ok(table)
}
