//! Display sinks: where each tick's rendered markup lands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Receives rendered markup and replaces whatever it showed before.
pub trait DisplaySink: Send + Sync {
    fn replace(&self, markup: &str) -> anyhow::Result<()>;

    fn describe(&self) -> String;
}

/// Writes markup to a file, typically next to the map page in the web root.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spotboard".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl DisplaySink for FileSink {
    /// Write to a sibling temp file, then rename over the target so a reader
    /// never sees a half-written table.
    fn replace(&self, markup: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, markup).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn replace(&self, markup: &str) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(markup.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

/// File sink when a path is given, stdout otherwise.
pub fn open_sink(output: Option<&Path>) -> Box<dyn DisplaySink> {
    match output {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink),
    }
}
