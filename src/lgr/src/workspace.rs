// mflgrrs-lgr/src/workspace.rs

//! Lexical path helpers for model workspaces.
//!
//! Workspaces are compared and rebased without touching the filesystem, so
//! relocating a model works the same whether or not the old directories still
//! exist.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without following symlinks.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Absolute, normalized form of `path`, relative paths being taken from the
/// current directory.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

/// Path of `path` as seen from `base`. Both are expected to be absolute and
/// normalized. Returns `.` when they are the same directory.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();
    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_components.len() {
        rel.push("..");
    }
    for component in &path_components[common..] {
        rel.push(component.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// Move `model_ws` from under `old_root` to under `new_root`, keeping its
/// position relative to the root.
pub fn rebase(model_ws: &Path, old_root: &Path, new_root: &Path) -> io::Result<PathBuf> {
    let rel = relative_to(&absolute(model_ws)?, &absolute(old_root)?);
    if rel == Path::new(".") {
        Ok(new_root.to_path_buf())
    } else {
        Ok(new_root.join(rel))
    }
}

/// Split a name-file entry of the control file into the model workspace and
/// the bare name-file name.
pub fn split_namefile(model_ws: &Path, entry: &str) -> (PathBuf, String) {
    let entry = Path::new(entry);
    let name = entry
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match entry.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => (model_ws.join(dir), name),
        _ => (model_ws.to_path_buf(), name),
    }
}

/// Create `path` (and its parents) when missing. Returns whether anything was created.
pub fn ensure_dir(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs_err::create_dir_all(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/a/sub"), Path::new("/a")),
            PathBuf::from("sub")
        );
        assert_eq!(
            relative_to(Path::new("/a"), Path::new("/a")),
            PathBuf::from(".")
        );
        assert_eq!(
            relative_to(Path::new("/x/y"), Path::new("/a/b")),
            PathBuf::from("../../x/y")
        );
    }

    #[test]
    fn test_rebase() {
        let moved = rebase(Path::new("/a/sub"), Path::new("/a"), Path::new("/b")).unwrap();
        assert_eq!(moved, PathBuf::from("/b/sub"));
        let moved = rebase(Path::new("/a"), Path::new("/a"), Path::new("/b")).unwrap();
        assert_eq!(moved, PathBuf::from("/b"));
        let moved = rebase(Path::new("/a/./sub/"), Path::new("/a/"), Path::new("/b")).unwrap();
        assert_eq!(moved, PathBuf::from("/b/sub"));
    }

    #[test]
    fn test_split_namefile() {
        let (ws, name) = split_namefile(Path::new("/work"), "child/child.nam");
        assert_eq!(ws, PathBuf::from("/work/child"));
        assert_eq!(name, "child.nam");

        let (ws, name) = split_namefile(Path::new("/work"), "parent.nam");
        assert_eq!(ws, PathBuf::from("/work"));
        assert_eq!(name, "parent.nam");
    }
}
