use crate::utils::{base_name, normalize_path, read_optional};
use crate::MergeError;
use glob::{MatchOptions, Pattern, PatternError};
use std::path::Path;
use tracing::{debug, trace, warn};

pub const IGNORE_FILE_NAME: &str = ".ignore";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Loads the raw patterns from `<root>/<file_name>`. A missing file yields no patterns.
pub fn load_ignore_patterns(root: &Path, file_name: &str) -> Result<Vec<String>, MergeError> {
    let ignore_file = root.join(file_name);
    debug!("Loading ignore patterns from {:?}", ignore_file);

    match read_optional(&ignore_file) {
        Ok(Some(content)) => Ok(parse_ignore_patterns(&content)),
        Ok(None) => {
            debug!("No ignore file at {:?}", ignore_file);
            Ok(Vec::new())
        }
        Err(e) => Err(MergeError::IgnoreFileError(
            ignore_file.to_string_lossy().to_string(),
            e.to_string(),
        )),
    }
}

pub fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

const TRAILING_ESCAPE: &str = "pattern ends with an escape character";

/// Rewrites shell-glob syntax into the `glob` crate's dialect: `\x` becomes `[x]`, `[^` becomes
/// `[!`, and runs of unescaped `*` collapse to one since `**` has no recursive meaning.
fn translate(pattern: &str) -> Result<String, PatternError> {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.char_indices().peekable();
    let mut in_class = false;
    let mut class_members = 0;

    while let Some((pos, c)) = chars.next() {
        if in_class {
            match c {
                ']' if class_members > 0 => {
                    in_class = false;
                    translated.push(']');
                }
                '\\' => {
                    let (_, escaped) = chars.next().ok_or(PatternError {
                        pos,
                        msg: TRAILING_ESCAPE,
                    })?;
                    translated.push(escaped);
                    class_members += 1;
                }
                _ => {
                    translated.push(c);
                    class_members += 1;
                }
            }
            continue;
        }

        match c {
            '\\' => {
                let (_, escaped) = chars.next().ok_or(PatternError {
                    pos,
                    msg: TRAILING_ESCAPE,
                })?;
                translated.push('[');
                translated.push(escaped);
                translated.push(']');
            }
            '*' if translated.ends_with('*') => {}
            '[' => {
                in_class = true;
                class_members = 0;
                translated.push('[');
                if let Some(&(_, '^' | '!')) = chars.peek() {
                    chars.next();
                    translated.push('!');
                }
            }
            _ => translated.push(c),
        }
    }

    Ok(translated)
}

fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    Pattern::new(&translate(pattern)?)
}

/// Shell-glob match of `pattern` against a forward-slash path. Malformed patterns never match.
pub fn matches(pattern: &str, path: &str) -> bool {
    compile(pattern)
        .map(|p| p.matches_with(path, MATCH_OPTIONS))
        .unwrap_or(false)
}

pub struct IgnorePattern {
    raw: String,
    compiled: Option<Pattern>,
}

impl IgnorePattern {
    pub fn new(raw: &str) -> Self {
        let compiled = match compile(raw) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Invalid ignore pattern '{}': {}", raw, e);
                None
            }
        };
        IgnorePattern {
            raw: raw.to_owned(),
            compiled,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }

    /// Whole-path glob, then directory prefix for patterns ending in `/`, then basename glob.
    pub fn excludes(&self, path: &str) -> bool {
        if self.glob_matches(path) {
            return true;
        }
        if self.raw.ends_with('/') && path.starts_with(&self.raw) {
            return true;
        }
        self.glob_matches(base_name(path))
    }

    fn glob_matches(&self, candidate: &str) -> bool {
        self.compiled
            .as_ref()
            .map_or(false, |p| p.matches_with(candidate, MATCH_OPTIONS))
    }
}

pub struct IgnorePatterns {
    patterns: Vec<IgnorePattern>,
}

impl IgnorePatterns {
    pub fn new(patterns: Vec<String>) -> Self {
        debug!("Using ignore patterns: {:?}", patterns);
        IgnorePatterns {
            patterns: patterns.iter().map(|p| IgnorePattern::new(p)).collect(),
        }
    }

    pub fn load(root: &Path, file_name: &str) -> Result<Self, MergeError> {
        Ok(Self::new(load_ignore_patterns(root, file_name)?))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[IgnorePattern] {
        &self.patterns
    }

    pub fn should_ignore<P: AsRef<str>>(&self, path: P) -> bool {
        let path = normalize_path(path.as_ref());
        match self.patterns.iter().find(|pattern| pattern.excludes(&path)) {
            Some(pattern) => {
                trace!("Ignoring {} (matched '{}')", path, pattern.as_str());
                true
            }
            None => false,
        }
    }
}
