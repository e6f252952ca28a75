//! Photo file naming and collision-avoiding storage.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Generate the base file name for a photo taken at `at`.
///
/// The name is `<prefix>_<UTC timestamp>` with the timestamp formatted as
/// year, abbreviated month name, day, then hour-minute-second, e.g.
/// `IMG_2024-Mar-05_14-07-09`.
pub fn photo_base_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", prefix, at.format("%Y-%b-%d_%H-%M-%S"))
}

/// Storage area for captured photos.
pub trait PhotoStorage {
    /// Create a new empty file for `base_name` with the given extension.
    ///
    /// Never overwrites: if the name is already taken, a numbered suffix is
    /// appended (`name (2).ext`, `name (3).ext`, ...) until a fresh file can
    /// be claimed. Returns the path of the created file.
    fn create_unique_file(&self, base_name: &str, extension: &str) -> io::Result<PathBuf>;
}

/// Photo storage rooted at a single directory, created on demand.
#[derive(Debug, Clone)]
pub struct TempDirStorage {
    dir: PathBuf,
}

impl TempDirStorage {
    /// Store photos under the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store photos in the OS temporary directory.
    pub fn in_os_temp() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// The directory photos are written to.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl PhotoStorage for TempDirStorage {
    fn create_unique_file(&self, base_name: &str, extension: &str) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut attempt: u32 = 1;
        loop {
            let file_name = if attempt == 1 {
                format!("{}.{}", base_name, extension)
            } else {
                format!("{} ({}).{}", base_name, attempt, extension)
            };
            let path = self.dir.join(file_name);

            // create_new claims the name atomically, so two captures racing
            // for the same timestamp cannot end up sharing a file.
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(path),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_photo_base_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(photo_base_name("IMG", at), "IMG_2024-Mar-05_14-07-09");
    }

    #[test]
    fn test_photo_base_name_custom_prefix() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(photo_base_name("SNAP", at), "SNAP_2023-Dec-31_23-59-58");
    }

    #[test]
    fn test_create_unique_file_claims_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TempDirStorage::new(dir.path());

        let path = storage.create_unique_file("IMG_2024-Mar-05_14-07-09", "jpg").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "IMG_2024-Mar-05_14-07-09.jpg"
        );
        assert!(path.exists());
    }

    #[test]
    fn test_create_unique_file_appends_suffix_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TempDirStorage::new(dir.path());

        let first = storage.create_unique_file("IMG_test", "jpg").unwrap();
        let second = storage.create_unique_file("IMG_test", "jpg").unwrap();
        let third = storage.create_unique_file("IMG_test", "jpg").unwrap();

        assert_eq!(first.file_name().unwrap().to_str().unwrap(), "IMG_test.jpg");
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "IMG_test (2).jpg"
        );
        assert_eq!(
            third.file_name().unwrap().to_str().unwrap(),
            "IMG_test (3).jpg"
        );
        assert!(first.exists() && second.exists() && third.exists());
    }

    #[test]
    fn test_create_unique_file_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TempDirStorage::new(dir.path().join("photos"));

        let path = storage.create_unique_file("IMG_test", "jpg").unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path().join("photos")));
    }
}
