use anyhow::{Context, Result};
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns a path that is not subject to the Windows MAX_PATH limit.
/// Absolute paths get the `\\?\` verbatim prefix; everything else is unchanged.
#[cfg(windows)]
pub fn long_path(path: &Path) -> Cow<'_, Path> {
    let raw = path.as_os_str().to_string_lossy();
    if !path.is_absolute() || raw.starts_with(r"\\?\") {
        return Cow::Borrowed(path);
    }
    if let Some(share) = raw.strip_prefix(r"\\") {
        return Cow::Owned(PathBuf::from(format!(r"\\?\UNC\{}", share)));
    }
    Cow::Owned(PathBuf::from(format!(r"\\?\{}", raw.replace('/', "\\"))))
}

/// Returns a path that is not subject to the Windows MAX_PATH limit.
/// Other platforms have no such limit, so the path is returned as is.
#[cfg(not(windows))]
pub fn long_path(path: &Path) -> Cow<'_, Path> {
    Cow::Borrowed(path)
}

/// Link target for a photo in the generated page. The original file is
/// referenced in place, never copied.
pub fn photo_url(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        std::env::current_dir().ok().map(|cwd| cwd.join(path))
    };

    absolute
        .and_then(|p| url::Url::from_file_path(p).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"))
}

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Ensures the directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `contents` to `target` through a temp file in the same directory,
/// so an interrupted run never leaves a half-written file behind.
pub fn write_atomically(target: &Path, contents: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_directory_exists(&dir).with_context(|| format!("Creating {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Creating temporary file in {}", dir.display()))?;
    tmp.write_all(contents).context("Writing map document")?;
    tmp.flush()?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Saving {}", target.display()))?;
    Ok(())
}
