//! Source location annotation for debug messages

use std::path::{Path, MAIN_SEPARATOR};

/// Shorten a source path for display.
///
/// An absolute path inside the working directory becomes relative to it.
/// Any other absolute path keeps its parent directory and file name
/// (`/foo/bar/baz.rs` -> `bar/baz.rs`). Relative paths, which is what the
/// compiler records for the crate being built, are kept as they are.
pub fn simplify_source_path(file: &str) -> String {
    if !Path::new(file).is_absolute() {
        return file.to_string();
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(cwd) = cwd.to_str() {
            if let Some(rest) = strip_dir(file, cwd) {
                return rest.to_string();
            }
        }
    }

    last_two_segments(file).to_string()
}

fn strip_dir<'a>(file: &'a str, dir: &str) -> Option<&'a str> {
    let rest = file.strip_prefix(dir)?;
    let rest = rest.strip_prefix(MAIN_SEPARATOR)?;
    (!rest.is_empty()).then_some(rest)
}

fn last_two_segments(file: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == MAIN_SEPARATOR;
    let Some(last) = file.rfind(is_sep) else {
        return file;
    };
    match file[..last].rfind(is_sep) {
        Some(parent) => &file[parent + 1..],
        None => &file[last + 1..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_unchanged() {
        assert_eq!(simplify_source_path("src/core/logger.rs"), "src/core/logger.rs");
        assert_eq!(simplify_source_path("main.rs"), "main.rs");
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_outside_cwd_keeps_two_segments() {
        assert_eq!(
            simplify_source_path("/nonexistent-root/deps/foo/bar/baz.rs"),
            "bar/baz.rs"
        );
        assert_eq!(simplify_source_path("/baz.rs"), "baz.rs");
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_inside_cwd_is_relative() {
        let cwd = std::env::current_dir().expect("cwd");
        let file = cwd.join("src").join("lib.rs");
        assert_eq!(simplify_source_path(file.to_str().expect("utf-8 path")), "src/lib.rs");
    }

    #[test]
    fn test_strip_dir_requires_separator() {
        assert_eq!(strip_dir("/work/app/x.rs", "/work/app"), Some("x.rs"));
        assert_eq!(strip_dir("/work/apple/x.rs", "/work/app"), None);
    }
}
