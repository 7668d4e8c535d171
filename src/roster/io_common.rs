use crate::roster::{io_render::RenderedArtifactPair, *};

/// The last component of a path or URL, for the logs.
pub fn simplify_source_name(location: &str) -> String {
    let trimmed = location.split(&['?', '#'][..]).next().unwrap_or(location);
    trimmed
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetches the raw content of the roster. URLs are fetched over http(s), anything else
/// is read as a local file.
pub fn fetch_source(location: &str) -> RosterResult<Vec<u8>> {
    if is_remote(location) {
        info!("Fetching roster from {:?}", location);
        let response = reqwest::blocking::get(location)
            .and_then(|r| r.error_for_status())
            .context(FetchingSourceSnafu { url: location })?;
        let body = response
            .bytes()
            .context(FetchingSourceSnafu { url: location })?;
        debug!("fetch_source: {} bytes", body.len());
        Ok(body.to_vec())
    } else {
        info!("Attempting to read roster file {:?}", location);
        fs::read(location).context(ReadingSourceSnafu { path: location })
    }
}

/// Creates the working directory if needed.
pub fn prepare_working_dir(dir: &Path) -> RosterResult<()> {
    if !dir.is_dir() {
        info!("Creating working directory {:?}", dir);
    }
    fs::create_dir_all(dir).context(CreatingWorkingDirSnafu {
        path: dir.display().to_string(),
    })
}

/// Writes both reports of a pair to the working directory, replacing older versions.
pub fn stage_artifacts(dir: &Path, pair: &RenderedArtifactPair) -> RosterResult<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    for (file_name, payload) in [
        (pair.csv_file_name(), &pair.csv),
        (pair.html_file_name(), &pair.html),
    ] {
        let p: PathBuf = dir.join(file_name);
        debug!("stage_artifacts: writing {:?} ({} bytes)", p, payload.len());
        fs::write(&p, payload).context(WritingArtifactSnafu {
            path: p.display().to_string(),
        })?;
        res.push(p);
    }
    Ok(res)
}
