use std::path::{Path, PathBuf};

/// Whether hardlinks from `src_dir` into `dst_dir` can be expected to work.
///
/// Checked once per run. Unix compares device numbers (the destination may not
/// exist yet, so its nearest existing ancestor is used); Windows compares
/// drive prefixes. A failed link is still handled per file by the executor.
pub fn check_same_volume(src_dir: &Path, dst_dir: &Path) -> bool {
    let same = volumes_match(&absolute(src_dir), &absolute(dst_dir));
    if !same {
        log::warn!(
            "Source ({}) and destination ({}) are on different volumes. Hardlinks will not work, copying instead.",
            src_dir.display(),
            dst_dir.display()
        );
    }
    same
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Closest ancestor of `path` (itself included) that exists.
#[cfg_attr(not(unix), allow(dead_code))]
fn existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors().find(|p| p.exists())
}

#[cfg(unix)]
fn volumes_match(src: &Path, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let device = |path: &Path| {
        existing_ancestor(path)
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.dev())
    };

    match (device(src), device(dst)) {
        (Some(a), Some(b)) => a == b,
        // Unknown: let the executor find out per file.
        _ => true,
    }
}

#[cfg(windows)]
fn volumes_match(src: &Path, dst: &Path) -> bool {
    use std::path::Component;

    let drive = |path: &Path| match path.components().next() {
        Some(Component::Prefix(prefix)) => {
            Some(prefix.as_os_str().to_string_lossy().to_lowercase())
        }
        _ => None,
    };
    drive(src) == drive(dst)
}

#[cfg(not(any(unix, windows)))]
fn volumes_match(_src: &Path, _dst: &Path) -> bool {
    true
}
