use crate::walk::FileEntry;
use crate::MergeError;
use std::io::{BufRead, Write};
use tracing::debug;

pub const SELECT_ALL: &str = "*";

/// Owns the interactive input and output streams.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    /// Writes `question`, then reads one line. End of input before any byte is an error.
    pub fn ask(&mut self, question: &str) -> Result<String, MergeError> {
        write!(self.writer, "{}", question).map_err(|e| MergeError::IoError(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| MergeError::IoError(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| MergeError::InputError(e.to_string()))?;
        if read == 0 {
            return Err(MergeError::InputError("unexpected end of input".to_owned()));
        }
        Ok(line.trim().to_owned())
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// Parses `*` or a comma-separated index list. Bad and out-of-range tokens are dropped,
/// repeats are kept in the order given.
pub fn choose_indices(raw: &str, count: usize) -> Vec<usize> {
    let raw = raw.trim();
    if raw == SELECT_ALL {
        return (0..count).collect();
    }
    raw.split(',')
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|&idx| idx < count)
        .collect()
}

pub fn select_files(files: &[FileEntry], raw: &str) -> Vec<FileEntry> {
    let chosen: Vec<FileEntry> = choose_indices(raw, files.len())
        .into_iter()
        .map(|idx| files[idx].clone())
        .collect();
    debug!("Selected {} of {} files", chosen.len(), files.len());
    chosen
}

pub fn print_files<W: Write>(files: &[FileEntry], writer: &mut W) -> Result<(), MergeError> {
    writeln!(writer, "Available files:")?;
    for (idx, file) in files.iter().enumerate() {
        writeln!(writer, "[{}] {}", idx, file)?;
    }
    Ok(())
}

pub fn choose_files<R: BufRead, W: Write>(
    files: &[FileEntry],
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<FileEntry>, MergeError> {
    print_files(files, prompter.writer())?;
    let input = prompter.ask("Enter the indices of files to include (comma separated): ")?;
    Ok(select_files(files, &input))
}
