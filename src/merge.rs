use crate::walk::FileEntry;
use crate::MergeError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_OUTPUT_FILE: &str = "data.txt";

#[derive(Debug, Clone)]
pub struct MergerConfig {
    pub root: PathBuf,
    pub output: PathBuf,
}

impl MergerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MergerConfig {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub files_written: usize,
    pub failed: Vec<String>,
    pub bytes_written: u64,
}

pub trait FileMerger {
    fn merge(&self, files: &[FileEntry]) -> Result<MergeReport, MergeError>;
}

pub struct BasicFileMerger {
    config: MergerConfig,
}

impl BasicFileMerger {
    pub fn new(config: MergerConfig) -> Self {
        BasicFileMerger { config }
    }

    /// Writes one `// path` block per file. Unreadable files get an inline error line instead
    /// of their content.
    pub fn write_to<W: Write>(&self, files: &[FileEntry], writer: &mut W) -> Result<MergeReport, MergeError> {
        let output = self.config.output.to_string_lossy().to_string();
        let write_err = |e: std::io::Error| MergeError::OutputError(output.clone(), e.to_string());
        let mut report = MergeReport::default();

        for file in files {
            debug!("Processing file: {}", file);
            let header = format!("// {}\n", file.display);
            writer.write_all(header.as_bytes()).map_err(write_err)?;
            report.bytes_written += header.len() as u64;

            match fs::read(self.config.root.join(&file.path)) {
                Ok(content) => {
                    trace!("Read {} bytes from {}", content.len(), file);
                    writer.write_all(&content).map_err(write_err)?;
                    report.bytes_written += content.len() as u64;
                    report.files_written += 1;
                }
                Err(e) => {
                    warn!("Failed to read file {}: {}", file, e);
                    let annotation = format!("[Error reading {}: {}]\n", file, e);
                    writer.write_all(annotation.as_bytes()).map_err(write_err)?;
                    report.bytes_written += annotation.len() as u64;
                    report.failed.push(file.display.clone());
                }
            }

            writer.write_all(b"\n\n").map_err(write_err)?;
            report.bytes_written += 2;
        }

        Ok(report)
    }
}

impl FileMerger for BasicFileMerger {
    fn merge(&self, files: &[FileEntry]) -> Result<MergeReport, MergeError> {
        let output = &self.config.output;
        debug!("Creating output file {:?}", output);
        let file = File::create(output).map_err(|e| {
            MergeError::OutputError(output.to_string_lossy().to_string(), e.to_string())
        })?;

        let mut writer = BufWriter::new(file);
        let report = self.write_to(files, &mut writer)?;
        writer.flush().map_err(|e| {
            MergeError::OutputError(output.to_string_lossy().to_string(), e.to_string())
        })?;

        info!(
            "Merged {} files into {:?} ({} bytes, {} unreadable)",
            report.files_written,
            output,
            report.bytes_written,
            report.failed.len()
        );
        Ok(report)
    }
}

pub fn merge_files(config: MergerConfig, files: &[FileEntry]) -> Result<MergeReport, MergeError> {
    let merger = BasicFileMerger::new(config);
    merger.merge(files)
}
