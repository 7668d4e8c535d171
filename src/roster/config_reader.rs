use crate::roster::*;

use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_FTP_PORT: u16 = 21;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Where to fetch the roster: an http(s) URL or a local path.
    pub url: String,
    /// csv (default) or xlsx
    pub format: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub pass: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LocalSettings {
    pub dir: String,
}

/// The content of the configuration file, as written by the operator.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub gsheet: SheetSettings,
    pub ftp: FtpSettings,
    pub local: LocalSettings,
}

/// Values given on the command line. They take precedence over the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub source_format: Option<String>,
    pub working_dir: Option<String>,
    pub skip_upload: bool,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    pub fn parse(name: &str) -> RosterResult<SourceFormat> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            x => InvalidConfigSnafu {
                message: format!("unknown source format {:?} (expected csv or xlsx)", x),
            }
            .fail(),
        }
    }
}

/// The settings of one run, checked and with the command line applied.
#[derive(Eq, PartialEq, Clone)]
pub struct PublishConfig {
    pub sheet_url: String,
    pub source_format: SourceFormat,
    pub ftp_host: String,
    pub ftp_port: u16,
    pub ftp_user: String,
    pub ftp_pass: String,
    pub working_dir: PathBuf,
    /// When false, the reports are only written to the working directory.
    pub upload: bool,
}

// The password must not end up in the logs.
impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("sheet_url", &self.sheet_url)
            .field("source_format", &self.source_format)
            .field("ftp_host", &self.ftp_host)
            .field("ftp_port", &self.ftp_port)
            .field("ftp_user", &self.ftp_user)
            .field("ftp_pass", &"***")
            .field("working_dir", &self.working_dir)
            .field("upload", &self.upload)
            .finish()
    }
}

pub fn read_config_file(path: &str) -> RosterResult<ConfigFile> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })
}

pub fn validate_config(
    config: &ConfigFile,
    overrides: &ConfigOverrides,
) -> RosterResult<PublishConfig> {
    let sheet_url = overrides
        .source
        .clone()
        .unwrap_or_else(|| config.gsheet.url.clone());
    ensure!(
        !sheet_url.trim().is_empty(),
        InvalidConfigSnafu {
            message: "gsheet.url is empty"
        }
    );

    let source_format = match overrides
        .source_format
        .as_ref()
        .or(config.gsheet.format.as_ref())
    {
        Some(name) => SourceFormat::parse(name)?,
        None => SourceFormat::Csv,
    };

    let working_dir = overrides
        .working_dir
        .clone()
        .unwrap_or_else(|| config.local.dir.clone());
    ensure!(
        !working_dir.trim().is_empty(),
        InvalidConfigSnafu {
            message: "local.dir is empty"
        }
    );

    let upload = !overrides.skip_upload;
    if upload {
        ensure!(
            !config.ftp.host.trim().is_empty(),
            InvalidConfigSnafu {
                message: "ftp.host is empty"
            }
        );
        ensure!(
            !config.ftp.user.trim().is_empty(),
            InvalidConfigSnafu {
                message: "ftp.user is empty"
            }
        );
    }

    Ok(PublishConfig {
        sheet_url,
        source_format,
        ftp_host: config.ftp.host.clone(),
        ftp_port: config.ftp.port.unwrap_or(DEFAULT_FTP_PORT),
        ftp_user: config.ftp.user.clone(),
        ftp_pass: config.ftp.pass.clone(),
        working_dir: PathBuf::from(working_dir),
        upload,
    })
}
