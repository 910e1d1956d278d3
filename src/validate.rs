//! Input/output sanity checks run before any tool is launched

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::config::{Config, PACKAGE_EXTENSION};
use crate::error::{DecompileError, Result};

/// An input path that exists, is a regular file and ends in `.apk`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageFile {
    path: PathBuf,
}

impl PackageFile {
    /// Checks run in order: existence, regular file, extension (case-sensitive).
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(DecompileError::InputNotFound(path));
        }
        if !path.is_file() {
            return Err(DecompileError::InputNotAFile(path));
        }
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if extension != PACKAGE_EXTENSION {
            return Err(DecompileError::NotAPackage { path, extension });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without the `.apk` extension.
    pub fn stem(&self) -> &OsStr {
        self.path.file_stem().unwrap_or_default()
    }
}

/// Output must already exist and be a directory; it is never created.
pub fn check_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(DecompileError::OutputNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DecompileError::OutputNotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

/// Validate every input in order, then the output directory.
///
/// Each violation is logged; the first one is returned.
pub fn sanity_check(cfg: &Config) -> Result<Vec<PackageFile>> {
    let mut packages = Vec::with_capacity(cfg.inputs.len());
    let mut first_failure: Option<DecompileError> = None;

    let mut record = |err: DecompileError| {
        error!("{err}");
        first_failure.get_or_insert(err);
    };

    for input in &cfg.inputs {
        match PackageFile::new(input) {
            Ok(package) => packages.push(package),
            Err(err) => record(err),
        }
    }

    if let Err(err) = check_output_dir(&cfg.output_dir) {
        record(err);
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(packages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(inputs: Vec<PathBuf>, output_dir: PathBuf) -> Config {
        Config {
            inputs,
            output_dir,
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_inputs_pass() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let a = temp.path().join("a.apk");
        let b = temp.path().join("b.apk");
        fs::write(&a, b"PK")?;
        fs::write(&b, b"PK")?;

        let packages = sanity_check(&config(vec![a.clone(), b.clone()], temp.path().into()))?;
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].path(), a);
        assert_eq!(packages[1].stem(), "b");
        Ok(())
    }

    #[test]
    fn test_missing_input() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let missing = temp.path().join("missing.apk");

        let err = sanity_check(&config(vec![missing.clone()], temp.path().into())).unwrap_err();
        assert!(matches!(err, DecompileError::InputNotFound(p) if p == missing));
        Ok(())
    }

    #[test]
    fn test_directory_input() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let dir = temp.path().join("folder.apk");
        fs::create_dir(&dir)?;

        let err = PackageFile::new(&dir).unwrap_err();
        assert!(matches!(err, DecompileError::InputNotAFile(_)));
        Ok(())
    }

    #[test]
    fn test_wrong_extension() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let txt = temp.path().join("notanapk.txt");
        fs::write(&txt, b"hello")?;

        match PackageFile::new(&txt) {
            Err(DecompileError::NotAPackage { path, extension }) => {
                assert_eq!(path, txt);
                assert_eq!(extension, "txt");
            }
            other => panic!("expected extension failure, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_extension_is_case_sensitive() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let upper = temp.path().join("APP.APK");
        fs::write(&upper, b"PK")?;
        assert!(PackageFile::new(&upper).is_err());

        let bare = temp.path().join("apk");
        fs::write(&bare, b"PK")?;
        assert!(matches!(
            PackageFile::new(&bare),
            Err(DecompileError::NotAPackage { extension, .. }) if extension.is_empty()
        ));
        Ok(())
    }

    #[test]
    fn test_first_offending_file_is_reported() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let good = temp.path().join("good.apk");
        let txt = temp.path().join("second.txt");
        let missing = temp.path().join("third.apk");
        fs::write(&good, b"PK")?;
        fs::write(&txt, b"x")?;

        let err = sanity_check(&config(vec![good, txt.clone(), missing], temp.path().into()))
            .unwrap_err();
        assert!(matches!(err, DecompileError::NotAPackage { path, .. } if path == txt));
        Ok(())
    }

    #[test]
    fn test_output_must_exist() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let apk = temp.path().join("a.apk");
        fs::write(&apk, b"PK")?;
        let out = temp.path().join("out");

        let err = sanity_check(&config(vec![apk], out.clone())).unwrap_err();
        assert!(matches!(err, DecompileError::OutputNotFound(p) if p == out));
        Ok(())
    }

    #[test]
    fn test_output_must_be_directory() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let out = temp.path().join("out");
        fs::write(&out, b"not a dir")?;

        let err = sanity_check(&config(Vec::new(), out)).unwrap_err();
        assert!(matches!(err, DecompileError::OutputNotADirectory(_)));
        Ok(())
    }

    #[test]
    fn test_no_inputs_is_valid() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let packages = sanity_check(&config(Vec::new(), temp.path().into()))?;
        assert!(packages.is_empty());
        Ok(())
    }
}
