pub mod html_write;
pub mod remote;
pub mod sheet_read;

use std::path::PathBuf;

use crate::error::Result;
use crate::model::SheetSet;

pub use remote::RemoteSpreadsheet;

/// Anything that can hand over the named sheets of a schedule spreadsheet.
pub trait SheetSource {
    /// Returns the rows of every sheet in `sheets`, keyed and ordered by name.
    fn fetch(&self, sheets: &[String]) -> Result<SheetSet>;
}

/// A workbook exported to a local `.xlsx` file.
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    path: PathBuf,
}

impl WorkbookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SheetSource for WorkbookFile {
    fn fetch(&self, sheets: &[String]) -> Result<SheetSet> {
        sheet_read::read_sheets(&self.path, sheets)
    }
}
