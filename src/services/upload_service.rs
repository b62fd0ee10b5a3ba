//! Ingestion of user-supplied font files.
//!
//! Turns a batch of candidate paths into uploaded catalog descriptors.
//! Validation is by extension; family, weight, and style come from filename
//! heuristics. A batch with no usable file is an error and the catalog is
//! left untouched.

use crate::catalog::{FontCategory, FontDescriptor, FontSource, VariantSpec};
use crate::config::SUPPORTED_FONT_EXTENSIONS;
use crate::error::{AppError, Result};
use crate::file_utils::{is_supported_font_file, parse_font_filename};
use chrono::Utc;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Validates and converts a batch of uploaded files.
///
/// Unsupported files are skipped with a log line; an entirely unusable
/// batch is an error so the caller can surface it.
pub fn process_uploads(paths: &[PathBuf]) -> Result<Vec<FontDescriptor>> {
    let mut descriptors = Vec::new();
    for path in paths {
        if is_supported_font_file(path) {
            descriptors.push(descriptor_from_file(path));
        } else {
            warn!("Skipping unsupported upload: {}", path.display());
        }
    }

    if descriptors.is_empty() {
        return Err(AppError::Upload(format!(
            "No supported font files found. Supported extensions: {}",
            SUPPORTED_FONT_EXTENSIONS.join(", ")
        )));
    }

    info!("Ingested {} uploaded font file(s)", descriptors.len());
    Ok(descriptors)
}

/// Builds a single-variant descriptor for one uploaded file.
///
/// The descriptor's lone resource locator is the file's own path, so the
/// load service handles it exactly like a multi-variant catalog entry, with
/// the fallback chain applying degenerately.
pub fn descriptor_from_file(path: &Path) -> FontDescriptor {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown.ttf");
    let parsed = parse_font_filename(filename);
    let variant = VariantSpec::new(parsed.weight, parsed.style);

    let slug: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let id = format!("uploaded-{}-{}", slug, Utc::now().timestamp_millis());

    let mut files = BTreeMap::new();
    files.insert(variant.key(), path.to_string_lossy().into_owned());

    FontDescriptor {
        id,
        family: parsed.family,
        category: Some(FontCategory::SansSerif),
        variants: vec![variant],
        files,
        source: FontSource::Uploaded,
    }
}
