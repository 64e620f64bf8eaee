//! Script rendering and writing.
//!
//! One command block is rendered into two executable formats that share a version:
//!
//! - `sh`: a single `docker exec -i <container> redis-cli` call fed the bare commands
//!   through a heredoc. The wrapping call supplies the client binary, so commands carry
//!   no invocation prefix.
//! - `ps1`: one `docker exec <container> redis-cli <command>` line per command, wrapped
//!   in progress messages.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;

use crate::compiler::CommandBlock;
use crate::errors::{GenerateError, GenerateResult};
use crate::generator::validate_migration_name;
use crate::layout::OutputLayout;

const CLIENT_BINARY: &str = "redis-cli";
const HEREDOC_TAG: &str = "REDIS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Shell,
    PowerShell,
}

impl ScriptFormat {
    #[inline]
    pub const fn extension(self) -> &'static str {
        match self {
            ScriptFormat::Shell => "sh",
            ScriptFormat::PowerShell => "ps1",
        }
    }

    /// `V<version>__<name>.<ext>`
    pub fn file_name(self, version: u32, name: &str) -> String {
        format!("V{version}__{name}.{}", self.extension())
    }
}

/// Scripts written by one successful run.
#[derive(Debug, Clone)]
pub struct MigrationArtifact {
    pub version: u32,
    pub name: String,
    pub commands: CommandBlock,
    pub shell_path: PathBuf,
    pub powershell_path: PathBuf,
}

/// Renders and writes migration scripts targeting one container.
#[derive(Debug, Clone)]
pub struct ScriptEmitter {
    container: String,
}

impl ScriptEmitter {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn render(
        &self,
        format: ScriptFormat,
        version: u32,
        name: &str,
        commands: &CommandBlock,
        generated_at: DateTime<Utc>,
    ) -> String {
        let file_name = format.file_name(version, name);
        let mut content = String::new();

        match format {
            ScriptFormat::Shell => {
                let _ = writeln!(content, "#!/bin/bash");
                write_header(&mut content, &file_name, generated_at);
                let _ = writeln!(content, "echo \"Executing migration: {file_name}\"");
                let _ = writeln!(content);
                let _ = writeln!(
                    content,
                    "docker exec -i {} {CLIENT_BINARY} <<'{HEREDOC_TAG}'",
                    self.container
                );
                for line in commands.render_lines("") {
                    let _ = writeln!(content, "{line}");
                }
                let _ = writeln!(content, "{HEREDOC_TAG}");
                let _ = writeln!(content);
                let _ = writeln!(content, "echo \"Migration completed.\"");
            }
            ScriptFormat::PowerShell => {
                write_header(&mut content, &file_name, generated_at);
                let _ = writeln!(content, "Write-Host \"Executing migration: {file_name}\"");
                let _ = writeln!(content);
                let prefix = format!("docker exec {} {CLIENT_BINARY} ", self.container);
                for line in commands.render_lines(&prefix) {
                    let _ = writeln!(content, "{line}");
                }
                let _ = writeln!(content);
                let _ = writeln!(content, "Write-Host \"Migration completed.\"");
            }
        }

        content
    }

    /// Write both scripts. The shell script is written first; if the PowerShell script
    /// then fails, the shell script stays on disk and the error names it.
    ///
    /// `name` must pass [`validate_migration_name`] since it is echoed verbatim in both scripts.
    pub fn emit(
        &self,
        version: u32,
        name: &str,
        commands: &CommandBlock,
        layout: &OutputLayout,
        generated_at: DateTime<Utc>,
    ) -> GenerateResult<MigrationArtifact> {
        validate_migration_name(name)?;
        let shell_path = layout.shell_dir.join(ScriptFormat::Shell.file_name(version, name));
        let shell = self.render(ScriptFormat::Shell, version, name, commands, generated_at);
        std::fs::write(&shell_path, shell).map_err(|err| GenerateError::io("write", &shell_path, err))?;
        make_executable(&shell_path)?;
        info!("wrote {}", shell_path.display());

        let powershell_path = layout
            .powershell_dir
            .join(ScriptFormat::PowerShell.file_name(version, name));
        let powershell = self.render(ScriptFormat::PowerShell, version, name, commands, generated_at);
        std::fs::write(&powershell_path, powershell).map_err(|source| GenerateError::PartialEmit {
            written: shell_path.clone(),
            path: powershell_path.clone(),
            source,
        })?;
        info!("wrote {}", powershell_path.display());

        Ok(MigrationArtifact {
            version,
            name: name.to_string(),
            commands: commands.clone(),
            shell_path,
            powershell_path,
        })
    }
}

fn write_header(content: &mut String, file_name: &str, generated_at: DateTime<Utc>) {
    let _ = writeln!(content, "# Auto-generated RediSearch migration script");
    let _ = writeln!(content, "# Migration: {file_name}");
    let _ = writeln!(content, "# Generated: {}", generated_at.format("%Y-%m-%dT%H:%M:%SZ"));
    let _ = writeln!(content);
}

#[cfg(unix)]
fn make_executable(path: &Path) -> GenerateResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .map_err(|err| GenerateError::io("read permissions of", path, err))?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions).map_err(|err| GenerateError::io("mark executable", path, err))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> GenerateResult<()> {
    Ok(())
}
