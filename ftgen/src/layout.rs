//! Output root location and the two script directories beneath it.

use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::errors::{GenerateError, GenerateResult};

/// Resolved output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Module directory the scripts belong to
    pub root: PathBuf,
    /// Directory for `.sh` scripts
    pub shell_dir: PathBuf,
    /// Directory for `.ps1` scripts
    pub powershell_dir: PathBuf,
}

impl OutputLayout {
    /// Locate the module directory starting at `start`, then derive the script directories.
    /// Nothing is created on disk.
    pub fn locate(start: &Path, config: &GeneratorConfig) -> GenerateResult<Self> {
        let root = find_module_root(start, &config.generator.module_dir)?;
        Ok(Self::from_root(root, config))
    }

    pub fn from_root(root: PathBuf, config: &GeneratorConfig) -> Self {
        Self {
            shell_dir: config.shell_dir(&root),
            powershell_dir: config.powershell_dir(&root),
            root,
        }
    }

    /// Create both script directories if absent.
    pub fn ensure_dirs(&self) -> GenerateResult<()> {
        for dir in [&self.shell_dir, &self.powershell_dir] {
            std::fs::create_dir_all(dir).map_err(|err| GenerateError::io("create directory", dir, err))?;
        }
        Ok(())
    }

    pub fn script_dirs(&self) -> [&Path; 2] {
        [&self.shell_dir, &self.powershell_dir]
    }
}

/// `start` itself when its name is `module_dir`, otherwise a direct child called `module_dir`.
pub fn find_module_root(start: &Path, module_dir: &str) -> GenerateResult<PathBuf> {
    if start.file_name().is_some_and(|name| name == module_dir) {
        return Ok(start.to_path_buf());
    }

    let candidate = start.join(module_dir);
    if candidate.is_dir() {
        return Ok(candidate);
    }

    Err(GenerateError::ModuleRootNotFound {
        module_dir: module_dir.to_string(),
        start: start.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn start_directory_matching_module_name_is_root() {
        let temp = TempDir::new().unwrap();
        let module = temp.path().join("search-service");
        std::fs::create_dir(&module).unwrap();

        assert_eq!(find_module_root(&module, "search-service").unwrap(), module);
    }

    #[test]
    fn child_directory_is_root() {
        let temp = TempDir::new().unwrap();
        let module = temp.path().join("search-service");
        std::fs::create_dir(&module).unwrap();

        assert_eq!(find_module_root(temp.path(), "search-service").unwrap(), module);
    }

    #[test]
    fn child_file_with_module_name_is_not_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("search-service"), "").unwrap();

        let err = find_module_root(temp.path(), "search-service").unwrap_err();
        assert!(matches!(err, GenerateError::ModuleRootNotFound { .. }));
    }

    #[test]
    fn locate_has_no_side_effects_and_ensure_creates() {
        let temp = TempDir::new().unwrap();
        let mut config = GeneratorConfig::default();
        config.generator.module_dir = "svc".to_string();
        std::fs::create_dir(temp.path().join("svc")).unwrap();

        let layout = OutputLayout::locate(temp.path(), &config).unwrap();
        assert!(!layout.shell_dir.exists());
        assert!(!layout.powershell_dir.exists());

        layout.ensure_dirs().unwrap();
        assert!(layout.shell_dir.is_dir());
        assert!(layout.powershell_dir.is_dir());
        assert!(layout.shell_dir.starts_with(temp.path().join("svc")));
    }
}
