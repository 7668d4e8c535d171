use clap::Parser;

/// Builds the member roster and the committee rosters from the sign-up sheet, and publishes
/// them to the web site over FTP.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default config.json) The JSON file with the sheet URL, the FTP credentials
    /// and the working directory.
    #[clap(short, long, value_parser, default_value = "config.json")]
    pub config: String,

    /// (URL or file path) If specified, the roster is read from this location instead of the
    /// URL in the configuration file.
    #[clap(short, long, value_parser)]
    pub source: Option<String>,

    /// (csv or xlsx, default csv) The format of the roster.
    #[clap(long, value_parser)]
    pub source_format: Option<String>,

    /// (directory) If specified, overrides the working directory of the configuration file.
    /// The reports are written there before being uploaded.
    #[clap(short, long, value_parser)]
    pub working_dir: Option<String>,

    /// If passed as an argument, the reports are written to the working directory but not
    /// uploaded.
    #[clap(long, takes_value = false)]
    pub no_upload: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
