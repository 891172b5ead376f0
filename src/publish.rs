use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::{Config, OutputConfig};
use crate::error::Result;
use crate::io::SheetSource;
use crate::io::html_write::{combine, slide_path, write_document};
use crate::merge::merge_sheets;
use crate::model::{ConferenceDays, IconMap, MergedTable, TrackMap};
use crate::render::{Renderer, View};
use crate::tracks::aggregate_tracks;

pub const LEGEND_FILE: &str = "legend_jinja.html";
pub const PROGRAM_FILE: &str = "program_jinja.html";
pub const OVERALL_FILE: &str = "overall_program.html";

/// Every document of a run, rendered and held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    pub legend: String,
    pub program: String,
    /// Legend and program joined by a newline.
    pub overall: String,
    /// Track id → slide, in track order.
    pub slides: Vec<(String, String)>,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub row_count: usize,
    pub track_count: usize,
    pub written: Vec<PathBuf>,
}

/// Fetches the sheets, builds every document, and writes them out.
///
/// Nothing is written until all documents rendered, so a failing run leaves
/// no output of its own behind.
#[instrument(
    level = "info",
    skip_all,
    fields(output = %config.output.directory.display())
)]
pub fn publish(
    source: &dyn SheetSource,
    config: &Config,
    renderer: &dyn Renderer,
) -> Result<PublishReport> {
    info!(sheets = ?config.source.sheets, "fetching sheets");
    let sheets = source.fetch(&config.source.sheets)?;

    let table = merge_sheets(&sheets, &config.conference_days)?;
    let tracks = aggregate_tracks(&table, &config.conference_days, &config.icons)?;
    let documents = render_documents(
        renderer,
        &config.conference_days,
        &config.icons,
        &table,
        &tracks,
    )?;
    let written = write_documents(&documents, &config.output)?;

    info!(file_count = written.len(), "publishing finished");
    Ok(PublishReport {
        row_count: table.len(),
        track_count: tracks.len(),
        written,
    })
}

/// Renders the legend, program, combined overview, and one slide per track.
#[instrument(level = "info", skip_all, fields(track_count = tracks.len()))]
pub fn render_documents(
    renderer: &dyn Renderer,
    conference_days: &ConferenceDays,
    icons: &IconMap,
    table: &MergedTable,
    tracks: &TrackMap,
) -> Result<Documents> {
    let legend = renderer.render(&View::Legend { icons })?;
    let program = renderer.render(&View::Program {
        conference_days,
        table,
        tracks,
        icons,
    })?;
    let overall = combine(&legend, &program);

    let slides = tracks
        .iter()
        .map(|(track_id, track)| {
            let html = renderer.render(&View::Slide {
                track_id,
                track,
                icons,
            })?;
            Ok((track_id.clone(), html))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Documents {
        legend,
        program,
        overall,
        slides,
    })
}

/// Writes rendered documents below the output directory and returns the paths.
///
/// Slide paths are checked up front; an unusable track id fails the call
/// before the first file is written.
#[instrument(level = "info", skip_all, fields(output = %output.directory.display()))]
pub fn write_documents(documents: &Documents, output: &OutputConfig) -> Result<Vec<PathBuf>> {
    let slides_dir = output.slides_path();
    let slides = documents
        .slides
        .iter()
        .map(|(track_id, text)| Ok((slide_path(&slides_dir, track_id)?, text)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(slides.len() + 3);

    for (name, text) in [
        (LEGEND_FILE, &documents.legend),
        (PROGRAM_FILE, &documents.program),
        (OVERALL_FILE, &documents.overall),
    ] {
        let path = output.directory.join(name);
        write_document(&path, text)?;
        info!(path = %path.display(), "document written");
        written.push(path);
    }

    let slide_count = slides.len();
    for (path, text) in slides {
        write_document(&path, text)?;
        written.push(path);
    }
    info!(
        slide_count,
        slides = %slides_dir.display(),
        "slides written"
    );

    Ok(written)
}
