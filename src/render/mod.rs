//! HTML rendering of the legend, the program overview, and the track slides.
//!
//! The pipeline only talks to the [`Renderer`] trait. [`HtmlRenderer`] is the
//! built-in implementation writing self-contained fragments styled through
//! CSS classes and Font Awesome icon classes.

use std::fmt::Write;

use indexmap::IndexSet;

use crate::error::Result;
use crate::model::{
    AUTHOR_NAME, ConferenceDays, IconMap, MergedTable, PAPER_END, PAPER_START, PAPER_TITLE,
    PRESENTATION_TYPE, Row, Track, TrackMap,
};

/// View model handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    /// Icon legend.
    Legend { icons: &'a IconMap },
    /// Full program, one section per conference day. Track headers come
    /// from `tracks`, the same ones the slides show.
    Program {
        conference_days: &'a ConferenceDays,
        table: &'a MergedTable,
        tracks: &'a TrackMap,
        icons: &'a IconMap,
    },
    /// Introduction slide for one track.
    Slide {
        track_id: &'a str,
        track: &'a Track,
        icons: &'a IconMap,
    },
}

impl View<'_> {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Legend { .. } => "legend",
            View::Program { .. } => "program",
            View::Slide { .. } => "track_info",
        }
    }
}

/// Turns a view model into document text.
pub trait Renderer {
    fn render(&self, view: &View<'_>) -> Result<String>;
}

/// Renders views as HTML fragments.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &View<'_>) -> Result<String> {
        let mut out = String::new();
        match *view {
            View::Legend { icons } => legend(&mut out, icons)?,
            View::Program {
                conference_days,
                table,
                tracks,
                icons,
            } => program(&mut out, conference_days, table, tracks, icons)?,
            View::Slide { track_id, track, .. } => slide(&mut out, track_id, track)?,
        }
        Ok(out)
    }
}

fn legend(out: &mut String, icons: &IconMap) -> Result<()> {
    writeln!(out, "<div class=\"legend\">")?;
    writeln!(out, "  <ul>")?;
    for (key, icon) in icons.iter() {
        writeln!(
            out,
            "    <li><i class=\"{}\"></i> {}</li>",
            escape(icon),
            escape(key)
        )?;
    }
    writeln!(out, "  </ul>")?;
    writeln!(out, "</div>")?;
    Ok(())
}

fn program(
    out: &mut String,
    days: &ConferenceDays,
    table: &MergedTable,
    tracks: &TrackMap,
    icons: &IconMap,
) -> Result<()> {
    writeln!(out, "<div class=\"program\">")?;
    for day in days.iter() {
        writeln!(out, "  <h2 class=\"day\">{}</h2>", escape(day))?;
        let track_ids: IndexSet<&str> = table.rows_on(day).map(Row::track_id).collect();
        for track_id in track_ids {
            let Some(track) = tracks.get(track_id) else {
                continue;
            };
            let rows: Vec<&Row> = table
                .rows_on(day)
                .filter(|row| row.track_id() == track_id)
                .collect();
            program_track(out, track_id, track, &rows, icons)?;
        }
    }
    writeln!(out, "</div>")?;
    Ok(())
}

fn program_track(
    out: &mut String,
    track_id: &str,
    track: &Track,
    rows: &[&Row],
    icons: &IconMap,
) -> Result<()> {
    writeln!(
        out,
        "  <div class=\"track {}\" id=\"{}\">",
        conference_class(&track.conference),
        escape(track_id)
    )?;
    writeln!(
        out,
        "    <h3><span class=\"time\">{} &ndash; {}</span> {}</h3>",
        escape(track.start_time.trim()),
        escape(track.end_time.trim()),
        escape(&track.track_title)
    )?;
    if !track.chair.trim().is_empty() {
        writeln!(out, "    <p class=\"chair\">Chair: {}</p>", escape(track.chair.trim()))?;
    }

    let papers: Vec<&&Row> = rows
        .iter()
        .filter(|row| row.value(PAPER_TITLE).is_some())
        .collect();
    if !papers.is_empty() {
        writeln!(out, "    <table class=\"papers\">")?;
        for row in papers {
            let icon = match row.value(PRESENTATION_TYPE) {
                Some(key) => format!("<i class=\"{}\"></i>", escape(icons.resolve(key)?)),
                None => String::new(),
            };
            writeln!(
                out,
                "      <tr><td class=\"time\">{}&ndash;{}</td><td class=\"type\">{}</td><td><span class=\"title\">{}</span><br><span class=\"author\">{}</span></td></tr>",
                escape(row.text(PAPER_START)),
                escape(row.text(PAPER_END)),
                icon,
                escape(row.text(PAPER_TITLE)),
                escape(row.text(AUTHOR_NAME))
            )?;
        }
        writeln!(out, "    </table>")?;
    }
    writeln!(out, "  </div>")?;
    Ok(())
}

fn slide(out: &mut String, track_id: &str, track: &Track) -> Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"utf-8\">")?;
    writeln!(out, "  <title>{}</title>", escape(&track.track_title))?;
    writeln!(out, "</head>")?;
    writeln!(
        out,
        "<body class=\"slide {}\" id=\"{}\">",
        conference_class(&track.conference),
        escape(track_id)
    )?;
    writeln!(out, "  <h1>{}</h1>", escape(&track.track_title))?;
    writeln!(
        out,
        "  <p class=\"time\">{} &ndash; {}</p>",
        escape(&track.start_time),
        escape(&track.end_time)
    )?;
    if !track.chair.trim().is_empty() {
        writeln!(out, "  <p class=\"chair\">Chair: {}</p>", escape(&track.chair))?;
    }
    writeln!(out, "  <ul class=\"entries\">")?;
    for entry in track.entries.values() {
        write!(out, "    <li>")?;
        if let Some(icon) = &entry.oral_spotlight_poster {
            write!(out, "<i class=\"{}\"></i> ", escape(icon))?;
        }
        if let (Some(start), Some(end)) = (&entry.start, &entry.end) {
            write!(
                out,
                "<span class=\"time\">{}&ndash;{}</span> ",
                escape(start),
                escape(end)
            )?;
        }
        if let Some(title) = &entry.title {
            write!(out, "<span class=\"title\">{}</span>", escape(title))?;
        }
        if let Some(author) = &entry.author {
            write!(out, " <span class=\"author\">{}</span>", escape(author))?;
        }
        writeln!(out, "</li>")?;
    }
    writeln!(out, "  </ul>")?;
    writeln!(out, "  <footer>")?;
    if !track.youtube.trim().is_empty() {
        writeln!(
            out,
            "    <a class=\"youtube\" href=\"{0}\"><i class=\"fab fa-youtube\"></i> {0}</a>",
            escape(&track.youtube)
        )?;
    }
    if !track.discord.trim().is_empty() {
        writeln!(
            out,
            "    <a class=\"discord\" href=\"{0}\"><i class=\"fab fa-discord\"></i> {0}</a>",
            escape(&track.discord)
        )?;
    }
    writeln!(out, "  </footer>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}

fn conference_class(conference: &str) -> String {
    let slug: String = conference
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("conf-{slug}")
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::model::{Entry, RawRow};
    use crate::tracks::aggregate_tracks;

    fn row(sheet: &str, cells: &[(&str, &str)]) -> Row {
        let cells: RawRow = cells
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Row::new(sheet, cells)
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn legend_lists_icons_in_order() {
        let html = HtmlRenderer
            .render(&View::Legend {
                icons: &IconMap::default(),
            })
            .unwrap();

        let oral = html.find("far fa-comments").unwrap();
        let short = html.find("fas fa-ruler").unwrap();
        assert!(oral < short);
        assert_eq!(html.matches("<li>").count(), 7);
    }

    #[test]
    fn program_groups_rows_by_day_and_track() {
        let table = MergedTable {
            columns: Vec::new(),
            rows: vec![
                row(
                    "GCPR",
                    &[
                        ("day", "Monday"),
                        ("track_id", "T1"),
                        ("track_name", "Vision & Learning"),
                        ("track_start", "09:00"),
                        ("track_end", "10:00"),
                        ("paper_title", "Deep <things>"),
                        ("author_name", "A"),
                        ("oral_spotlight_poster", "oral"),
                    ],
                ),
                row(
                    "VMV",
                    &[
                        ("day", "Tuesday"),
                        ("track_id", "T2"),
                        ("track_name", "Rendering"),
                        ("track_start", "11:00"),
                    ],
                ),
            ],
        };

        let days = ConferenceDays::default();
        let icons = IconMap::default();
        let tracks = aggregate_tracks(&table, &days, &icons).unwrap();

        let html = HtmlRenderer
            .render(&View::Program {
                conference_days: &days,
                table: &table,
                tracks: &tracks,
                icons: &icons,
            })
            .unwrap();

        assert!(html.contains("Vision &amp; Learning"));
        assert!(html.contains("Deep &lt;things&gt;"));
        assert!(html.contains("far fa-comments"));
        assert!(html.contains("class=\"track conf-vmv\" id=\"T2\""));
        assert!(html.find(">Monday<").unwrap() < html.find("id=\"T1\"").unwrap());
        assert!(html.find("id=\"T1\"").unwrap() < html.find(">Tuesday<").unwrap());
        assert!(html.find(">Tuesday<").unwrap() < html.find("id=\"T2\"").unwrap());
        assert!(html.contains(">Thursday<"));
    }

    #[test]
    fn program_fails_on_unknown_icon() {
        let table = MergedTable {
            columns: Vec::new(),
            rows: vec![row(
                "GCPR",
                &[
                    ("day", "Monday"),
                    ("track_id", "T1"),
                    ("track_start", "09:00"),
                    ("paper_title", "Talk"),
                    ("oral_spotlight_poster", "keynote"),
                ],
            )],
        };

        let days = ConferenceDays::default();
        let tracks =
            aggregate_tracks(&table, &days, &IconMap::new([("keynote", "fas fa-star")])).unwrap();

        let result = HtmlRenderer.render(&View::Program {
            conference_days: &days,
            table: &table,
            tracks: &tracks,
            icons: &IconMap::default(),
        });

        assert!(matches!(result, Err(ToolError::IconLookup(_))));
    }

    #[test]
    fn program_and_slide_share_the_track_header() {
        let table = MergedTable {
            columns: Vec::new(),
            rows: vec![
                row(
                    "GCPR",
                    &[
                        ("day", "Monday"),
                        ("track_id", "T1"),
                        ("track_name", "Opening session"),
                        ("track_start", "09:00"),
                        ("track_end", "10:00"),
                    ],
                ),
                row(
                    "VMV",
                    &[
                        ("day", "Tuesday"),
                        ("track_id", "T1"),
                        ("track_name", "Renamed session"),
                        ("track_start", "14:00"),
                        ("track_end", "15:00"),
                    ],
                ),
            ],
        };
        let days = ConferenceDays::default();
        let icons = IconMap::default();
        let tracks = aggregate_tracks(&table, &days, &icons).unwrap();

        let program = HtmlRenderer
            .render(&View::Program {
                conference_days: &days,
                table: &table,
                tracks: &tracks,
                icons: &icons,
            })
            .unwrap();
        let slide = HtmlRenderer
            .render(&View::Slide {
                track_id: "T1",
                track: &tracks["T1"],
                icons: &icons,
            })
            .unwrap();

        assert_eq!(program.matches("Opening session").count(), 2);
        assert!(!program.contains("Renamed session"));
        assert!(!program.contains("14:00"));
        assert!(program.contains("class=\"track conf-gcpr\" id=\"T1\""));
        assert!(slide.contains("Opening session"));
        assert!(slide.contains("09:00 &ndash; 10:00"));
    }

    #[test]
    fn slide_shows_entries_and_links() {
        let mut track = Track {
            conference: "JOINT".into(),
            track_title: "Keynotes".into(),
            start_time: "13:00".into(),
            end_time: "14:00".into(),
            youtube: "https://youtube.example/k".into(),
            discord: String::new(),
            chair: "C. Hair".into(),
            entries: Default::default(),
        };
        track.entries.insert(
            "P7".into(),
            Entry {
                start: Some("13:00".into()),
                end: Some("13:45".into()),
                author: Some("Speaker".into()),
                title: Some("Opening".into()),
                oral_spotlight_poster: Some("far fa-comments".into()),
            },
        );
        let icons = IconMap::default();

        let view = View::Slide {
            track_id: "K1",
            track: &track,
            icons: &icons,
        };
        let html = HtmlRenderer.render(&view).unwrap();

        assert_eq!(view.template_name(), "track_info");
        assert!(html.contains("<body class=\"slide conf-joint\" id=\"K1\">"));
        assert!(html.contains("<i class=\"far fa-comments\"></i>"));
        assert!(html.contains("13:00&ndash;13:45"));
        assert!(html.contains("https://youtube.example/k"));
        assert!(!html.contains("class=\"discord\""));
    }
}
