// Publishing the reports to the file server.

use std::io::Cursor;

use suppaftp::types::{FileType, FormatControl};
use suppaftp::{FtpError, FtpStream};

use crate::roster::{io_render::RenderedArtifactPair, *};

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TransferMode {
    Binary,
    /// Text transfer, line endings may be converted by the server.
    Lines,
}

/// A place where the reports are uploaded. An upload replaces any file with the same name.
pub trait RemoteStore {
    fn store(&mut self, file_name: &str, mode: TransferMode, payload: &[u8]) -> io::Result<()>;
}

/// An authenticated FTP session. Uploads go to the current directory of the session.
pub struct FtpSession {
    stream: FtpStream,
    host: String,
}

impl FtpSession {
    pub fn open(config: &PublishConfig) -> RosterResult<FtpSession> {
        let host = format!("{}:{}", config.ftp_host, config.ftp_port);
        info!("Connecting to {}", host);
        let mut stream = FtpStream::connect(host.as_str()).context(ConnectingFtpSnafu {
            host: host.as_str(),
        })?;
        stream
            .login(config.ftp_user.as_str(), config.ftp_pass.as_str())
            .context(LoggingInSnafu {
                host: host.as_str(),
                user: config.ftp_user.as_str(),
            })?;
        info!("Logged into {} as {}", host, config.ftp_user);
        Ok(FtpSession { stream, host })
    }

    /// Ends the session. All the uploads are done at this point, so a failure here is
    /// only reported.
    pub fn close(mut self) {
        if let Err(e) = self.stream.quit() {
            warn!("Error closing the session with {}: {}", self.host, e);
        }
    }
}

fn to_io_error(e: FtpError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

impl RemoteStore for FtpSession {
    fn store(&mut self, file_name: &str, mode: TransferMode, payload: &[u8]) -> io::Result<()> {
        let file_type = match mode {
            TransferMode::Binary => FileType::Binary,
            TransferMode::Lines => FileType::Ascii(FormatControl::Default),
        };
        self.stream.transfer_type(file_type).map_err(to_io_error)?;
        let mut reader = Cursor::new(payload);
        let written = self
            .stream
            .put_file(file_name, &mut reader)
            .map_err(to_io_error)?;
        debug!("store: {} -> {}: {} bytes", file_name, self.host, written);
        Ok(())
    }
}

/// Uploads the reports of a pair: the HTML report first, then the CSV report.
///
/// Returns the names of the uploaded files.
pub fn upload_pair(
    store: &mut dyn RemoteStore,
    pair: &RenderedArtifactPair,
    mode: TransferMode,
) -> RosterResult<Vec<String>> {
    let mut uploaded: Vec<String> = Vec::new();
    for (file_name, payload) in [
        (pair.html_file_name(), &pair.html),
        (pair.csv_file_name(), &pair.csv),
    ] {
        info!("Uploading {} ({} bytes)", file_name, payload.len());
        store
            .store(&file_name, mode, payload)
            .context(UploadingSnafu {
                file_name: file_name.as_str(),
            })?;
        uploaded.push(file_name);
    }
    Ok(uploaded)
}
