use indexmap::IndexSet;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::model::{
    AUTHOR_NAME, ConferenceDays, Entry, IconMap, MergedTable, PAPER_END, PAPER_ID, PAPER_START,
    PAPER_TITLE, PRESENTATION_TYPE, Row, TRACK_CHAIR, TRACK_END, TRACK_NAME, TRACK_START, Track,
    TrackMap, DISCORD, YOUTUBE,
};

/// Groups the merged table into tracks, visiting `days` in order.
///
/// The header of a track comes from the first row carrying its id anywhere in
/// the table, not only on the day being visited, so track ids are assumed to
/// be unique across days. A track scheduled on several days is rebuilt on each
/// visit and keeps the entries of the last one.
///
/// Entries are taken only from rows without any blank cell. A row with an
/// unknown presentation type fails the whole aggregation.
#[instrument(level = "info", skip_all, fields(row_count = table.len()))]
pub fn aggregate_tracks(
    table: &MergedTable,
    days: &ConferenceDays,
    icons: &IconMap,
) -> Result<TrackMap> {
    let complete: Vec<&Row> = table.complete_rows().collect();
    let mut tracks = TrackMap::new();

    for day in days.iter() {
        let track_ids: IndexSet<&str> = table.rows_on(day).map(Row::track_id).collect();
        debug!(day, track_count = track_ids.len(), "collected tracks for day");

        for track_id in track_ids {
            let Some(header) = table.rows.iter().find(|row| row.track_id() == track_id) else {
                continue;
            };
            let mut track = track_header(header);

            for row in complete
                .iter()
                .filter(|row| row.day() == day && row.track_id() == track_id)
            {
                let paper_id = row.text(PAPER_ID).trim().to_string();
                track.entries.insert(paper_id, build_entry(row, icons)?);
            }

            tracks.insert(track_id.to_string(), track);
        }
    }

    info!(track_count = tracks.len(), "aggregated tracks");
    Ok(tracks)
}

fn track_header(row: &Row) -> Track {
    Track {
        conference: row.conference().to_string(),
        track_title: row.text(TRACK_NAME).to_string(),
        start_time: row.text(TRACK_START).to_string(),
        end_time: row.text(TRACK_END).to_string(),
        youtube: row.text(YOUTUBE).to_string(),
        discord: row.text(DISCORD).to_string(),
        chair: row.text(TRACK_CHAIR).to_string(),
        entries: Default::default(),
    }
}

fn build_entry(row: &Row, icons: &IconMap) -> Result<Entry> {
    let owned = |column: &str| row.value(column).map(str::to_string);
    let oral_spotlight_poster = match row.value(PRESENTATION_TYPE) {
        Some(key) => Some(icons.resolve(key)?.to_string()),
        None => None,
    };

    Ok(Entry {
        start: owned(PAPER_START),
        end: owned(PAPER_END),
        author: owned(AUTHOR_NAME),
        title: owned(PAPER_TITLE),
        oral_spotlight_poster,
    })
}
