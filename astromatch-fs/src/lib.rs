//! Filesystem access for table files and matrix snapshots.
//!
//! Every helper resolves paths through `cap-std` directories opened with
//! ambient authority, so callers pass plain UTF-8 paths and receive
//! `std::io` errors they can wrap with path context.
#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::{Component, Path};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 text file, such as a JSON table.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened or its
/// contents are not valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Create or truncate a file inside an existing directory.
///
/// Pair with [`ensure_parent_dir`] when the directory may be missing.
///
/// # Errors
/// Returns the underlying I/O error when the parent cannot be opened or the
/// file cannot be opened for writing.
pub fn create_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or the parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create the parent directory of `path` when it is missing.
///
/// Paths without a parent, or whose parent is the filesystem root, need no
/// work.
///
/// # Errors
/// Returns the underlying I/O error when the directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Report whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the underlying I/O error when the parent directory cannot be
/// opened or the metadata lookup fails for a reason other than absence.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Split a directory path into an ambient base directory and the remaining
/// relative suffix, as `cap-std` only creates directories relative to an
/// opened handle.
///
/// # Errors
/// Fails when the base directory cannot be opened or the path is not UTF-8.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let (base, relative) = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => split_prefixed(std_parent, prefix.as_os_str())?,
        Some(Component::RootDir) => split_rooted(std_parent)?,
        _ => (Utf8PathBuf::from("."), parent.to_path_buf()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

/// Windows path with a drive or UNC prefix.
fn split_prefixed(
    path: &Path,
    prefix: &std::ffi::OsStr,
) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let prefix_str = prefix
        .to_str()
        .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
    let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
    let relative = path
        .strip_prefix(base.as_std_path())
        .or_else(|_| path.strip_prefix(prefix))
        .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?;
    Ok((base, utf8(relative)?))
}

fn split_rooted(path: &Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
    let relative = path
        .strip_prefix(base.as_std_path())
        .map_err(|_| io::Error::other("failed to strip root from absolute path"))?;
    Ok((base, utf8(relative)?))
}

fn utf8(path: &Path) -> io::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn created_files_land_in_new_parents(temp_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_dir;
        let target = root.join("nested/deeper/matrix.json");

        ensure_parent_dir(&target).expect("create parents");
        let mut file = create_file(&target).expect("create nested file");
        file.write_all(b"{}\n").expect("write file");
        drop(file);

        assert!(file_is_file(&target).expect("metadata"));
        assert_eq!(read_to_string(&target).expect("read back"), "{}\n");
    }

    #[rstest]
    fn file_is_file_reports_missing_and_directories(temp_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_dir;
        assert!(!file_is_file(&root.join("absent.json")).expect("metadata"));
        std::fs::create_dir(root.join("dir").as_std_path()).expect("create dir");
        assert!(!file_is_file(&root.join("dir")).expect("metadata"));
    }

    #[rstest]
    fn read_to_string_surfaces_missing_files(temp_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_dir;
        let err = read_to_string(&root.join("missing.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn ensure_parent_dir_accepts_bare_file_names() {
        ensure_parent_dir(Utf8Path::new("matrix.json")).expect("no parent to create");
    }

    #[rstest]
    fn absolute_parents_split_at_the_root(temp_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_dir;
        let (_dir, relative) = base_dir_and_relative(&root).expect("split absolute path");
        assert!(relative.is_relative());
        assert!(root.as_str().ends_with(relative.as_str()));
    }
}
