#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a header row and data rows through a CSV writer so quoting
    /// matches what real producers emit.
    pub fn write_csv(&self, name: &str, header: &[&str], rows: &[&[&str]]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut writer = csv::Writer::from_path(&path).expect("create csv writer");
        writer.write_record(header).expect("write header");
        for row in rows {
            writer.write_record(*row).expect("write row");
        }
        writer.flush().expect("flush csv");
        path
    }
}

/// Renders rows as CSV text in memory.
pub fn csv_text(header: &[&str], rows: &[&[&str]]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).expect("write header");
    for row in rows {
        writer.write_record(*row).expect("write row");
    }
    String::from_utf8(writer.into_inner().expect("flush csv")).expect("utf-8 csv")
}
