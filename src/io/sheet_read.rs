use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::error::{Result, ToolError};
use crate::model::{RawRow, SheetSet};

/// Reads the named sheets from an `.xlsx` file on disk.
#[instrument(level = "info", skip(sheets), fields(path = %path.display()))]
pub fn read_sheets(path: &Path, sheets: &[String]) -> Result<SheetSet> {
    if !path.exists() {
        return Err(ToolError::NotFound(format!("workbook {}", path.display())));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    collect_sheets(&mut workbook, sheets)
}

/// Reads the named sheets from an `.xlsx` document held in memory.
pub fn read_sheets_from_bytes(bytes: Vec<u8>, sheets: &[String]) -> Result<SheetSet> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    collect_sheets(&mut workbook, sheets)
}

fn collect_sheets<R: Read + Seek>(workbook: &mut Xlsx<R>, sheets: &[String]) -> Result<SheetSet> {
    let mut set = SheetSet::new();
    for name in sheets {
        let range = read_required_sheet(workbook, name)?;
        let rows = sheet_records(&range);
        debug!(sheet = %name, row_count = rows.len(), "read sheet");
        set.insert(name.clone(), rows);
    }
    Ok(set)
}

fn read_required_sheet<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::NotFound(format!("sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

/// Turns a sheet into header → value records. The first row holds the
/// headers; columns with a blank header and rows with no content are skipped.
fn sheet_records(range: &calamine::Range<DataType>) -> Vec<RawRow> {
    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)).trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    range
        .rows()
        .skip(1)
        .filter(|row| {
            row.iter()
                .any(|cell| !cell_to_string(Some(cell)).trim().is_empty())
        })
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(col_idx, header)| (header.clone(), cell_to_string(row.get(col_idx))))
                .collect()
        })
        .collect()
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::DateTime(serial)) => serial_to_clock(*serial),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Formats the time-of-day part of a spreadsheet date serial as `HH:MM`.
fn serial_to_clock(serial: f64) -> String {
    let minutes = (serial.fract() * 1440.0).round() as u32 % 1440;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_drop_the_fraction_when_integral() {
        assert_eq!(cell_to_string(Some(&DataType::Float(12.0))), "12");
        assert_eq!(cell_to_string(Some(&DataType::Float(1.5))), "1.5");
        assert_eq!(cell_to_string(Some(&DataType::Empty)), "");
    }

    #[test]
    fn time_serials_render_as_clock() {
        assert_eq!(serial_to_clock(0.375), "09:00");
        assert_eq!(serial_to_clock(45_000.6875), "16:30");
        assert_eq!(serial_to_clock(0.0), "00:00");
    }
}
