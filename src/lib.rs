pub mod app;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod merge;
pub mod select;
pub mod utils;
pub mod walk;

pub use app::{run, RunOptions};
pub use errors::MergeError;
pub use ignore::IgnorePatterns;
pub use merge::{merge_files, MergerConfig};
pub use walk::{list_files, FileEntry};
