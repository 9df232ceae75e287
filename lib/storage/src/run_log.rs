use anyhow::Result;
use chrono::Local;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Timestamped, line-oriented run log.
///
/// Each line is written to the log file and mirrored to `tracing` at info
/// level. Shared by reference between generation callbacks; the file is
/// truncated when the log is opened.
pub struct RunLog {
    file: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl RunLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        Ok(Self {
            file: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Append `message` prefixed with the local date and time
    pub fn log(&self, message: &str) -> Result<()> {
        let line = format!("{} {}", Local::now().format(TIMESTAMP_FORMAT), message);
        info!("{}", message);

        let mut writer = self.file.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
