//! Shared constants.

/// Bucket all portfolio assets land in unless the caller overrides it.
pub const DEFAULT_BUCKET: &str = "portfolio";

/// Folder prefix for pipeline uploads within the bucket.
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// Soft client-side ceiling for source files, documented to the user.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 5;

/// Content types accepted as crop-session input.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Cache-Control value sent with stored objects, in seconds.
pub const DEFAULT_CACHE_CONTROL_SECS: u32 = 3600;
