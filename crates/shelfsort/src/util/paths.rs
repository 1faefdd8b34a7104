use std::borrow::Cow;
use std::path::Path;

/// Path form safe for long names: `\\?\` prefixed on Windows, unchanged elsewhere.
///
/// Verbatim paths skip Win32 normalisation, so the path is made absolute
/// and cleaned of `.` and `/` before the prefix goes on.
#[cfg(windows)]
pub fn long_path(path: &Path) -> Cow<'_, Path> {
    use std::path::PathBuf;

    if path.as_os_str().to_string_lossy().starts_with(r"\\?\") {
        return Cow::Borrowed(path);
    }
    let absolute = match std::path::absolute(path) {
        Ok(absolute) => absolute,
        Err(_) => return Cow::Borrowed(path),
    };

    let text = absolute.to_string_lossy();
    if text.starts_with(r"\\?\") {
        return Cow::Owned(absolute);
    }
    if let Some(share) = text.strip_prefix(r"\\") {
        return Cow::Owned(PathBuf::from(format!(r"\\?\UNC\{}", share)));
    }
    Cow::Owned(PathBuf::from(format!(r"\\?\{}", text)))
}

#[cfg(not(windows))]
pub fn long_path(path: &Path) -> Cow<'_, Path> {
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_long_path_is_identity() {
        let path = Path::new("sorted/IT/Python/book.pdf");
        assert_eq!(long_path(path), Cow::Borrowed(path));
    }

    #[cfg(windows)]
    #[test]
    fn test_long_path_prefixes() {
        let path = Path::new(r"C:\books\a.pdf");
        assert_eq!(long_path(path).as_ref(), Path::new(r"\\?\C:\books\a.pdf"));

        let unc = Path::new(r"\\server\share\a.pdf");
        assert_eq!(long_path(unc).as_ref(), Path::new(r"\\?\UNC\server\share\a.pdf"));

        let verbatim = Path::new(r"\\?\C:\books\a.pdf");
        assert_eq!(long_path(verbatim).as_ref(), verbatim);
    }

    #[cfg(windows)]
    #[test]
    fn test_long_path_normalizes_relative_destination() {
        let cwd = std::env::current_dir().unwrap();
        let long = long_path(Path::new("./sorted/IT/Python"));
        let text = long.to_string_lossy().into_owned();

        assert!(text.starts_with(r"\\?\"));
        assert!(!text.contains("/"));
        assert!(!text.contains(r"\.\"));
        assert!(text.ends_with(r"\sorted\IT\Python"));
        assert!(text.contains(&*cwd.file_name().unwrap().to_string_lossy()));
    }

    #[cfg(windows)]
    #[test]
    fn test_long_path_directory_can_be_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("./sorted/IT/Python");
        std::fs::create_dir_all(long_path(&nested)).unwrap();
        assert!(temp_dir.path().join("sorted").join("IT").join("Python").is_dir());
    }
}
