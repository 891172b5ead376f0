//! Core library for the program-forge command line application.
//!
//! Turns a conference schedule kept in a spreadsheet into static HTML: the
//! icon legend, the full program, a combined overview, and one slide per
//! track. Sheet sources live under [`io`], the data model inside [`model`],
//! merging of sheets in [`merge`], grouping into tracks in [`tracks`], HTML
//! generation in [`render`], and the end-to-end run in [`publish`].

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod model;
pub mod publish;
pub mod render;
pub mod tracks;

pub use error::{Result, ToolError};
