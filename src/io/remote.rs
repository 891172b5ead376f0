use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{info, instrument};

use crate::config::SourceConfig;
use crate::error::{Result, ToolError};
use crate::io::SheetSource;
use crate::io::sheet_read;
use crate::model::SheetSet;

const SPREADSHEET_PATH: &str = "/spreadsheets/d/";
const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// A spreadsheet hosted on Google Sheets, downloaded as an `.xlsx` export.
///
/// The OAuth access token is read from the environment variable named in the
/// configuration at fetch time. A single attempt is made; callers that want
/// retries wrap [`SheetSource::fetch`] themselves.
#[derive(Debug, Clone)]
pub struct RemoteSpreadsheet {
    url: String,
    token_env: String,
    timeout: Option<Duration>,
}

impl RemoteSpreadsheet {
    pub fn new(url: impl Into<String>, token_env: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token_env: token_env.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            url: config.url.clone(),
            token_env: config.token_env.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    fn access_token(&self) -> Result<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(ToolError::Authentication(format!(
                "no access token in environment variable {}",
                self.token_env
            ))),
        }
    }

    fn download(&self, token: &str) -> Result<Vec<u8>> {
        let export = export_url(&self.url)?;
        let client = Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&export).bearer_auth(token).send()?;

        check_status(response.status(), &self.url)?;
        Ok(response.error_for_status()?.bytes()?.to_vec())
    }
}

/// Maps the statuses the export endpoint uses for bad credentials and
/// unknown documents onto the matching errors. Other failures are left to
/// `error_for_status`.
fn check_status(status: StatusCode, url: &str) -> Result<()> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ToolError::Authentication(
            format!("spreadsheet service rejected the access token ({status})"),
        )),
        StatusCode::NOT_FOUND => Err(ToolError::NotFound(format!("spreadsheet {url}"))),
        _ => Ok(()),
    }
}

impl SheetSource for RemoteSpreadsheet {
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    fn fetch(&self, sheets: &[String]) -> Result<SheetSet> {
        let token = self.access_token()?;
        let bytes = self.download(&token)?;
        info!(byte_count = bytes.len(), "downloaded spreadsheet export");
        sheet_read::read_sheets_from_bytes(bytes, sheets)
    }
}

/// Derives the `.xlsx` export address from a spreadsheet URL.
pub fn export_url(url: &str) -> Result<String> {
    let id = url
        .split_once(SPREADSHEET_PATH)
        .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or_default())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ToolError::NotFound(format!("no spreadsheet id in '{url}'")))?;
    Ok(format!("{EXPORT_BASE}/{id}/export?format=xlsx"))
}
