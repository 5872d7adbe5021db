use crate::error::RosterError;
use crate::model::UploadKind;
use crate::settings::schema::ImportSettings;
use std::path::Path;

/// Check an uploaded file before parsing and return its text.
///
/// Rejects empty content, content over the ceiling for `kind`, extensions
/// outside the allowed list, and anything that is not UTF-8 text. A leading
/// byte-order mark is dropped.
pub fn check_upload<'a>(
    bytes: &'a [u8],
    file_name: &str,
    kind: UploadKind,
    settings: &ImportSettings,
) -> Result<&'a str, RosterError> {
    if bytes.is_empty() {
        return Err(RosterError::UploadRejected("file is empty".into()));
    }

    let limit = settings.max_bytes(kind);
    if bytes.len() as u64 > limit {
        return Err(RosterError::UploadRejected(format!(
            "{kind} upload is {} bytes, limit is {limit}",
            bytes.len()
        )));
    }

    if !settings.allowed_extensions.is_empty() {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !settings.allowed_extensions.contains(&ext) {
            return Err(RosterError::UploadRejected(format!(
                "'{file_name}' is not a delimited text file (allowed: {})",
                settings.allowed_extensions.join(", ")
            )));
        }
    }

    let text = std::str::from_utf8(bytes).map_err(|e| {
        RosterError::UploadRejected(format!("file is not UTF-8 text: {e}"))
    })?;
    if text.contains('\0') {
        return Err(RosterError::UploadRejected(
            "file contains binary data".into(),
        ));
    }

    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
