use crate::ignore::{IgnorePatterns, IGNORE_FILE_NAME};
use crate::merge::{merge_files, MergeReport, MergerConfig, DEFAULT_OUTPUT_FILE};
use crate::select::{choose_files, print_files, select_files, Prompter};
use crate::utils::validate_root;
use crate::walk::list_files;
use crate::MergeError;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

/// Values that replace the interactive prompts, plus the fixed file names.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dir: Option<String>,
    pub output: PathBuf,
    pub ignore_file: String,
    pub select: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            dir: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            ignore_file: IGNORE_FILE_NAME.to_owned(),
            select: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub output: PathBuf,
    pub report: MergeReport,
}

/// Prompts for the directory, lists it, asks for a selection and merges it into `options.output`.
pub fn run<R: BufRead, W: Write>(
    options: RunOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<RunOutcome, MergeError> {
    let dir = match options.dir {
        Some(dir) => dir,
        None => prompter.ask("Enter project directory path: ")?,
    };
    let root = validate_root(&dir)?;

    let ignore = IgnorePatterns::load(&root, &options.ignore_file)?;
    debug!("Loaded {} ignore patterns", ignore.len());

    let files = list_files(&root, &ignore)?;
    if files.is_empty() {
        return Err(MergeError::NoFilesFound);
    }

    let chosen = match options.select {
        Some(raw) => {
            print_files(&files, prompter.writer())?;
            select_files(&files, &raw)
        }
        None => choose_files(&files, prompter)?,
    };
    if chosen.is_empty() {
        return Err(MergeError::NoFilesSelected);
    }

    let config = MergerConfig::new(root).with_output(options.output);
    let output = config.output.clone();
    let report = merge_files(config, &chosen)?;
    Ok(RunOutcome { output, report })
}
