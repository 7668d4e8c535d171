use log::{debug, info, warn};

use member_roster::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_ftp;
mod io_render;
mod io_xlsx;

use crate::roster::config_reader::*;
use crate::roster::io_common::*;
use crate::roster::io_ftp::*;
use crate::roster::io_render::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RosterError {
    #[snafu(display("Error opening config file {path}"))]
    OpeningConfig { source: io::Error, path: String },
    #[snafu(display("Error parsing config file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid configuration: {message}"))]
    InvalidConfig { message: String },

    #[snafu(display("Error fetching the roster from {url}"))]
    FetchingSource { source: reqwest::Error, url: String },
    #[snafu(display("Error reading the roster file {path}"))]
    ReadingSource { source: io::Error, path: String },
    #[snafu(display("Error parsing the roster as CSV"))]
    ParsingCsv { source: csv::Error },
    #[snafu(display("Error opening the roster workbook"))]
    OpeningExcel { source: calamine::XlsxError },
    #[snafu(display("The roster workbook has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("Error building the roster"))]
    BuildingRoster { source: RosterErrors },

    #[snafu(display("Error rendering {file_name}"))]
    RenderingCsv {
        source: csv::Error,
        file_name: String,
    },
    #[snafu(display("Error rendering {file_name}"))]
    RenderingHtml {
        source: tera::Error,
        file_name: String,
    },
    #[snafu(display("Error creating the working directory {path}"))]
    CreatingWorkingDir { source: io::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingArtifact { source: io::Error, path: String },

    #[snafu(display("Error connecting to {host}"))]
    ConnectingFtp {
        source: suppaftp::FtpError,
        host: String,
    },
    #[snafu(display("Error logging into {host} as {user}"))]
    LoggingIn {
        source: suppaftp::FtpError,
        host: String,
        user: String,
    },
    #[snafu(display("Error uploading {file_name}"))]
    Uploading { source: io::Error, file_name: String },
}

pub type RosterResult<T> = Result<T, RosterError>;

/// The broad categories of failures. All of them stop the run.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    Configuration,
    SourceUnavailable,
    TransferAuthFailure,
    TransferWriteFailure,
    LocalWriteFailure,
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::OpeningConfig { .. }
            | RosterError::ParsingConfig { .. }
            | RosterError::InvalidConfig { .. } => ErrorKind::Configuration,
            RosterError::FetchingSource { .. }
            | RosterError::ReadingSource { .. }
            | RosterError::ParsingCsv { .. }
            | RosterError::OpeningExcel { .. }
            | RosterError::EmptyExcel {}
            | RosterError::BuildingRoster { .. } => ErrorKind::SourceUnavailable,
            RosterError::RenderingCsv { .. }
            | RosterError::RenderingHtml { .. }
            | RosterError::CreatingWorkingDir { .. }
            | RosterError::WritingArtifact { .. } => ErrorKind::LocalWriteFailure,
            RosterError::ConnectingFtp { .. } | RosterError::LoggingIn { .. } => {
                ErrorKind::TransferAuthFailure
            }
            RosterError::Uploading { .. } => ErrorKind::TransferWriteFailure,
        }
    }
}

/// The steps of a run, in the order they happen.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RunStage {
    Idle,
    Fetching,
    Transforming,
    /// Rendering, staging and uploading the reports with the given base name.
    Publishing(String),
    Done,
    Failed,
}

/// What a run did.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunReport {
    pub stages: Vec<RunStage>,
    /// The files written to the working directory.
    pub staged: Vec<PathBuf>,
    /// The remote file names, in upload order.
    pub uploaded: Vec<String>,
}

impl RunReport {
    fn new() -> RunReport {
        RunReport {
            stages: vec![RunStage::Idle],
            staged: Vec::new(),
            uploaded: Vec::new(),
        }
    }

    fn enter(&mut self, stage: RunStage) {
        info!("Stage: {:?}", stage);
        self.stages.push(stage);
    }

    fn current(&self) -> &RunStage {
        self.stages.last().unwrap_or(&RunStage::Idle)
    }
}

/// Runs the whole job: fetches the roster, builds the reports and uploads them.
///
/// The first failure stops the run. The reports that were uploaded before the failure
/// stay on the server.
pub fn run_publish(config: &PublishConfig) -> RosterResult<RunReport> {
    info!("config: {:?}", config);
    let mut report = RunReport::new();
    match run_stages(config, &mut report) {
        Ok(()) => Ok(report),
        Err(e) => {
            warn!(
                "Run failed during {:?} ({:?}): {}",
                report.current(),
                e.kind(),
                e
            );
            report.enter(RunStage::Failed);
            Err(e)
        }
    }
}

fn run_stages(config: &PublishConfig, report: &mut RunReport) -> RosterResult<()> {
    prepare_working_dir(&config.working_dir)?;

    report.enter(RunStage::Fetching);
    let table = read_roster_source(config)?;

    if config.upload {
        let mut session = FtpSession::open(config)?;
        let store: &mut dyn RemoteStore = &mut session;
        publish_table(config, table, Some(store), report)?;
        session.close();
    } else {
        info!("Uploads are disabled, the reports are only written locally");
        publish_table(config, table, None, report)?;
    }
    Ok(())
}

/// Reads the roster from the configured source.
pub fn read_roster_source(config: &PublishConfig) -> RosterResult<RawTable> {
    let contents = fetch_source(&config.sheet_url)?;
    let table = match config.source_format {
        config_reader::SourceFormat::Csv => io_csv::parse_csv_table(&contents)?,
        config_reader::SourceFormat::Xlsx => io_xlsx::parse_xlsx_table(contents)?,
    };
    info!(
        "Read {} rows from {:?}",
        table.rows.len(),
        simplify_source_name(&config.sheet_url)
    );
    debug!("headers: {:?}", table.headers);
    Ok(table)
}

/// Builds the views of the roster and publishes each of them in turn: the full roster
/// first, then the committees in their fixed order.
///
/// Without a store, the reports are only written to the working directory.
pub fn publish_table(
    config: &PublishConfig,
    table: RawTable,
    mut store: Option<&mut dyn RemoteStore>,
    report: &mut RunReport,
) -> RosterResult<()> {
    report.enter(RunStage::Transforming);
    let roster = prepare_roster(table).context(BuildingRosterSnafu {})?;
    let views = partition_committees(&roster, &COMMITTEES);

    for view in views.iter() {
        report.enter(RunStage::Publishing(view.base_name.clone()));
        let pair = render_view(view)?;
        let mut staged = stage_artifacts(&config.working_dir, &pair)?;
        report.staged.append(&mut staged);

        // The full roster goes as binary, the committee reports as text.
        let mode = match view.committee {
            None => TransferMode::Binary,
            Some(_) => TransferMode::Lines,
        };
        match store.as_deref_mut() {
            Some(s) => {
                let mut uploaded = upload_pair(s, &pair, mode)?;
                report.uploaded.append(&mut uploaded);
            }
            None => debug!("Not uploading {:?}", pair.base_name),
        }
    }
    report.enter(RunStage::Done);
    Ok(())
}
