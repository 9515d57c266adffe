//! Shared constants/setters for things
//!

/// Default image model used for scene synthesis
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Base URL of the generative language API
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// JPEG quality used when re-encoding a downloaded result (0-100)
pub const JPEG_DOWNLOAD_QUALITY: u8 = 90;

/// Filename prefix for downloaded results
pub const DOWNLOAD_FILENAME_PREFIX: &str = "synthesized";

/// Timestamp format for download filenames, local time down to the second
pub const DOWNLOAD_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Actions that only make sense while a sub-character image is present.
/// Both the selection reducer and the form script are driven by this list,
/// so extending it keeps the two guards in step.
pub const COMPANION_DEPENDENT_ACTIONS: &[&str] = &["facing_sub"];

/// Upper bound on a single uploaded reference image, in bytes
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Length of CSRF session tokens
pub const CSRF_SESSION_LENGTH: i64 = 300;
