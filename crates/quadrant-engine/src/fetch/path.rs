use std::path::{Path, PathBuf};

/// Resolves a resource path the samples ship next to their binaries.
///
/// Absolute paths are returned as-is. Relative paths are tried against the
/// working directory first, then the executable's directory. If neither
/// contains the file the relative path is returned unchanged so the fetch
/// reports a meaningful "not found".
pub fn resource_path(relative: impl AsRef<Path>) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let bases = std::env::current_dir().ok().into_iter().chain(exe_dir);
    resolve_against(relative.as_ref(), bases)
}

fn resolve_against(relative: &Path, bases: impl IntoIterator<Item = PathBuf>) -> PathBuf {
    if relative.is_absolute() {
        return relative.to_path_buf();
    }

    bases
        .into_iter()
        .map(|base| base.join(relative))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| relative.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_untouched() {
        let abs = std::env::temp_dir().join("does-not-matter.png");
        assert_eq!(resolve_against(&abs, Vec::new()), abs);
    }

    #[test]
    fn first_base_containing_the_file_wins() {
        let empty = tempfile::tempdir().unwrap();
        let with_file = tempfile::tempdir().unwrap();
        std::fs::create_dir(with_file.path().join("resources")).unwrap();
        std::fs::write(with_file.path().join("resources/uv_test.png"), b"png").unwrap();

        let rel = Path::new("resources/uv_test.png");
        let resolved = resolve_against(
            rel,
            vec![empty.path().to_path_buf(), with_file.path().to_path_buf()],
        );
        assert_eq!(resolved, with_file.path().join(rel));
    }

    #[test]
    fn missing_file_returns_relative_path() {
        let empty = tempfile::tempdir().unwrap();
        let rel = Path::new("resources/missing.png");
        assert_eq!(resolve_against(rel, vec![empty.path().to_path_buf()]), rel);
    }
}
