//! Path sandbox. Every input/output path must resolve inside one base directory.
//!
//! Resolution is lexical (`.` and `..` folded against the absolute path) so it also
//! works for output files that do not exist yet. Nothing is opened here.

use crate::domain::DomainError;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PathSandbox {
    base: PathBuf,
}

impl PathSandbox {
    /// `base` may be relative; it is anchored at the current working directory.
    pub fn new(base: impl AsRef<Path>) -> Result<Self, DomainError> {
        Ok(Self {
            base: absolutize(base.as_ref())?,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Normalize `raw` and check it lies within the base directory.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, DomainError> {
        if raw.trim().is_empty() {
            return Err(DomainError::PathSecurity("empty path".to_string()));
        }
        let candidate = absolutize(Path::new(raw))?;
        if !candidate.starts_with(&self.base) {
            return Err(DomainError::PathSecurity(format!(
                "{} resolves outside {}",
                raw,
                self.base.display()
            )));
        }
        Ok(candidate)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, DomainError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DomainError::Io(format!("current dir: {}", e)))?
            .join(path)
    };
    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_paths_inside_base() {
        let sandbox = PathSandbox::new("data").unwrap();
        let resolved = sandbox.resolve("data/input.csv").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/input.csv"));

        let folded = sandbox.resolve("data/sub/.././output.csv").unwrap();
        assert!(folded.ends_with("data/output.csv"));
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let sandbox = PathSandbox::new("data").unwrap();
        for raw in [
            "../outside/file.csv",
            "data/../../../etc/passwd",
            "data/../secrets.csv",
            "/etc/passwd",
            "datafile.csv",
            "",
        ] {
            let err = sandbox.resolve(raw).unwrap_err();
            assert!(matches!(err, DomainError::PathSecurity(_)), "{:?} accepted", raw);
        }
    }

    #[test]
    fn test_absolute_base() {
        let dir = tempfile::tempdir().unwrap();
        let sandbox = PathSandbox::new(dir.path()).unwrap();
        let inside = dir.path().join("report.csv");

        assert_eq!(
            sandbox.resolve(inside.to_str().unwrap()).unwrap(),
            normalize(&inside)
        );
        let escape = format!("{}/../x.csv", dir.path().display());
        assert!(sandbox.resolve(&escape).is_err());
    }
}
