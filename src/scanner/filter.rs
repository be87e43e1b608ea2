use std::path::Path;

/// Recognized sample extensions, lowercase and without the dot.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["wav", "aif", "aiff", "mp3", "ogg", "flac"];

/// True if the file name carries a recognized audio extension (case-insensitive).
///
/// Names are judged on text alone. A leading dot does not start an extension,
/// so a file named `.wav` has none.
pub fn is_audio_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// True if `path` is a regular file (following symlinks) with an audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .map(|name| is_audio_name(&name.to_string_lossy()))
            .unwrap_or(false)
}
