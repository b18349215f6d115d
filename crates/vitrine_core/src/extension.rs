//! Media file extension allow-list.

/// Extensions (lower-case, without the dot) the scanners accept.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "bmp", "ico",
];

/// Lower-cased extension of a filename, if it has one.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the filename carries an allow-listed media extension.
///
/// ```
/// use vitrine_core::is_media_file;
///
/// assert!(is_media_file("logo.PNG"));
/// assert!(!is_media_file("notes.txt"));
/// assert!(!is_media_file(".png"));
/// ```
pub fn is_media_file(name: &str) -> bool {
    extension_of(name)
        .map(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
