pub mod settings;

pub use settings::{FilenamePolicy, ImporterSettings};
