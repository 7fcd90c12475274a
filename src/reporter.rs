use std::path::Path;

use crate::error::ReportError;
use crate::model::document::Document;
use crate::model::report::Report;

/// Key path of the version string inside `InstallInfo.plist`.
pub const VERSION_KEY_PATH: [&str; 2] = ["System Image Info", "version"];

/// Report the version of the installer described by the plist at `path`.
///
/// Anything other than a regular file at `path` yields [`Report::NotPresent`].
/// Once the file exists, parse failures and missing keys are errors.
pub fn installer_version(path: &Path) -> Result<Report, ReportError> {
    if !path.is_file() {
        tracing::info!("no installer descriptor at {}", path.display());
        return Ok(Report::NotPresent);
    }

    let document = Document::open(path)?;
    let version = document.string_at(&VERSION_KEY_PATH)?;
    tracing::info!("installer version {version} read from {}", path.display());

    Ok(Report::Version(version.to_string()))
}
