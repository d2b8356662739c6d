//! User-facing notices.

use std::fmt;

/// Something the user should be told about an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptySelection,
    AlreadyExists { path: String },
    FetchFailed,
    WriteFailed,
    /// The note was written but its aliases could not be attached
    AliasesNotSaved { path: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptySelection => write!(f, "No DOI selected"),
            Notice::AlreadyExists { .. } => write!(f, "Note already exists"),
            Notice::FetchFailed => write!(f, "Error fetching metadata"),
            Notice::WriteFailed => write!(f, "Error writing reference note"),
            Notice::AliasesNotSaved { path } => {
                write!(f, "Reference note created without aliases: {}", path)
            }
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints notices to stderr
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        log::debug!("[IMPORT] Notice: {:?}", notice);
        eprintln!("{}", notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::AlreadyExists {
                path: "/references/X.md".to_string()
            }
            .to_string(),
            "Note already exists"
        );
        assert_eq!(Notice::FetchFailed.to_string(), "Error fetching metadata");
        assert!(
            Notice::AliasesNotSaved {
                path: "/r/X.md".to_string()
            }
            .to_string()
            .ends_with("/r/X.md")
        );
    }
}
