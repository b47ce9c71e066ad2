//! System font lookup by file name.
//!
//! When a font path cannot be opened directly, its file name is searched for
//! in the platform font directories, walking each directory tree top-down.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Platform font directories, in search order.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let home = std::env::var_os("HOME").map(PathBuf::from);

    if cfg!(target_os = "windows") {
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("fonts"));
        }
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft").join("Windows").join("Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        if let Some(home) = &home {
            dirs.push(home.join("Library").join("Fonts"));
        }
    } else {
        let data_home = non_empty_var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(".local").join("share")));
        if let Some(data_home) = data_home {
            dirs.push(data_home.join("fonts"));
        }
        let data_dirs = non_empty_var("XDG_DATA_DIRS")
            .unwrap_or_else(|| OsString::from("/usr/local/share:/usr/share"));
        for dir in std::env::split_paths(&data_dirs) {
            dirs.push(dir.join("fonts"));
        }
    }

    dirs
}

fn non_empty_var(key: &str) -> Option<OsString> {
    std::env::var_os(key).filter(|v| !v.is_empty())
}

/// Flat listing of every file under a set of font directories.
#[derive(Debug, Default)]
pub struct FontIndex {
    files: Vec<PathBuf>,
}

impl FontIndex {
    /// Walk the directories top-down. Unreadable or missing directories are
    /// skipped. Entries are sorted per directory so lookups are deterministic.
    pub fn build(dirs: &[PathBuf]) -> Self {
        let mut files = Vec::new();
        for dir in dirs {
            walk(dir, &mut files);
        }
        tracing::debug!(dirs = dirs.len(), files = files.len(), "indexed font directories");
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find a font file by name.
    ///
    /// A name with an extension must match a file name exactly. A bare name
    /// matches file stems, preferring the first `.ttf` file and otherwise the
    /// first file with that stem.
    pub fn find(&self, name: &str) -> Option<&Path> {
        let has_ext = Path::new(name).extension().is_some();
        let mut first_other = None;

        for path in &self.files {
            if has_ext {
                if path.file_name().is_some_and(|f| f == name) {
                    return Some(path);
                }
            } else if path.file_stem().is_some_and(|s| s == name) {
                if path.extension().is_some_and(|e| e == "ttf") {
                    return Some(path);
                }
                first_other.get_or_insert(path.as_path());
            }
        }

        first_other
    }
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if !entry.path().is_dir() {
            // Symlinked directories are not followed
            files.push(entry.path());
        }
    }

    for sub in subdirs {
        walk(&sub, files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("affiche-locate-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        dir
    }

    #[test]
    fn test_find_exact_name_in_subdirectory() {
        let dir = scratch_dir("exact");
        std::fs::write(dir.join("nested").join("arial.ttf"), b"x").unwrap();

        let index = FontIndex::build(&[dir.clone()]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.find("arial.ttf"), Some(dir.join("nested").join("arial.ttf").as_path()));
        assert_eq!(index.find("Arial.ttf"), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bare_name_prefers_ttf() {
        let dir = scratch_dir("bare");
        std::fs::write(dir.join("Plex.otf"), b"x").unwrap();
        std::fs::write(dir.join("nested").join("Plex.ttf"), b"x").unwrap();

        let index = FontIndex::build(&[dir.clone()]);
        assert_eq!(index.find("Plex"), Some(dir.join("nested").join("Plex.ttf").as_path()));

        std::fs::remove_file(dir.join("nested").join("Plex.ttf")).unwrap();
        let index = FontIndex::build(&[dir.clone()]);
        assert_eq!(index.find("Plex"), Some(dir.join("Plex.otf").as_path()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let index = FontIndex::build(&[PathBuf::from("/definitely/not/a/font/dir")]);
        assert!(index.is_empty());
        assert_eq!(index.find("arial.ttf"), None);
    }

    #[test]
    fn test_default_dirs_not_empty_on_unix() {
        if cfg!(all(unix, not(target_os = "macos"))) {
            let dirs = default_search_dirs();
            assert!(dirs.iter().all(|d| d.ends_with("fonts")));
            assert!(!dirs.is_empty());
        }
    }
}
