//! Application configuration constants.

use std::time::Duration;

/// Default sample text shown in both previews.
pub const DEFAULT_SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

/// Default preview size in pixels.
pub const DEFAULT_SIZE_PX: u32 = 32;

/// Preview size bounds in pixels.
pub const MIN_SIZE_PX: u32 = 8;
pub const MAX_SIZE_PX: u32 = 128;

/// Default preview background color.
pub const DEFAULT_BG_COLOR: &str = "#ffffff";

/// Default font weight.
pub const DEFAULT_WEIGHT: u16 = 400;

/// Supported font file extensions for upload ingestion. The in-process host
/// consumes SFNT data only, so web-only containers are not accepted.
pub const SUPPORTED_FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// File name of the persisted settings snapshot.
pub const SETTINGS_FILE_NAME: &str = "font-compare-settings.json";

/// Upper bound for a single font registration attempt. An attempt that runs
/// past this completes as failed and releases its in-flight marker, so the
/// triple can be retried later.
pub const REGISTRATION_TIMEOUT: Duration = Duration::from_secs(30);
