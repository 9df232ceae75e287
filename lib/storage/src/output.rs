use anyhow::Result;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use layergraph_core::{printing, Graph};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory receiving one `graph_<index>.json` file per generated graph
pub struct OutputDirectory {
    dir: PathBuf,
}

impl OutputDirectory {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn graph_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("graph_{}.json", index))
    }

    /// Write the JSON rendering of `graph`, replacing any previous file
    pub fn write_graph(&self, index: usize, graph: &Graph) -> Result<PathBuf> {
        let json = printing::to_json(graph)?;
        let path = self.graph_path(index);

        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(json.as_bytes()))?;

        debug!(index, path = %path.display(), bytes = json.len(), "graph written");
        Ok(path)
    }
}
