// ReqLog - platform/fs.rs
//
// Filesystem helpers for the app layer: opening a day's log file and
// replacing an export artifact atomically.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

/// Open `path` for buffered reading.
///
/// Returns `Ok(None)` when the file does not exist; any other failure
/// (permissions, path is a directory, ...) is returned as an error.
pub fn open_if_exists(path: &Path) -> io::Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace `path` with `bytes` in one step.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the destination. Concurrent writers to the same path resolve
/// to one complete file (last rename wins); readers never see a partial file.
/// Missing parent directories are created.
pub fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".reqlog-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "File replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_open_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_if_exists(&dir.path().join("nope.log")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.log");
        std::fs::write(&path, "hello\n").unwrap();

        let mut reader = open_if_exists(&path).unwrap().expect("file exists");
        let mut content = String::new();
        reader.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_open_directory_is_an_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        // Opening a directory succeeds on some platforms; reading it never does.
        match open_if_exists(dir.path()) {
            Ok(Some(mut reader)) => {
                let mut buf = Vec::new();
                assert!(reader.read_to_end(&mut buf).is_err());
            }
            Ok(None) => panic!("directory must not be reported as missing"),
            Err(_) => {}
        }
    }

    #[test]
    fn test_replace_file_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");

        replace_file(&path, b"first").unwrap();
        replace_file(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }
}
