pub mod generator;
pub mod prompt;
pub mod sanitize;

pub use generator::{split_extension, NameGenerator, NameKind, NameOutcome, NameSource};
pub use sanitize::{sanitize_name, FILE_NAME_MAX_LEN, FOLDER_NAME_MAX_LEN};
