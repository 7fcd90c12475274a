use std::fmt;

const NOT_PRESENT: &str = "Installer Not Present";

/// The single line printed per run, wrapped in `<result>` tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Installer found; carries `System Image Info.version`.
    Version(String),
    /// No regular file at the descriptor path.
    NotPresent,
}

impl Report {
    pub fn value(&self) -> &str {
        match self {
            Report::Version(version) => version,
            Report::NotPresent => NOT_PRESENT,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<result>{}</result>", self.value())
    }
}
