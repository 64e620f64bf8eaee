//! Orchestration of one generator run.
//!
//! Validate -> Locate -> Discover -> Compile -> Version -> Emit -> Report. Each phase
//! either succeeds or aborts the run; nothing touches the filesystem before Version.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::compiler::compile;
use crate::config::{GeneratorConfig, SourceKind};
use crate::emitter::{MigrationArtifact, ScriptEmitter};
use crate::errors::{GenerateError, GenerateResult};
use crate::layout::OutputLayout;
use crate::source::{DescriptorSource, RegistrySource, SourceScanner};
use crate::version::next_version;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub layout: OutputLayout,
    /// Indexed entity names, in discovery order.
    pub entities: Vec<String>,
    pub artifact: MigrationArtifact,
}

static MIGRATION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("migration name pattern is valid"));

/// The name becomes part of both filenames and is echoed inside both scripts, so it is
/// limited to ASCII letters, digits, `_`, `-` and `.`.
pub fn validate_migration_name(name: &str) -> GenerateResult<()> {
    if name.is_empty() {
        return Err(GenerateError::usage("migration name must not be empty"));
    }
    if !MIGRATION_NAME.is_match(name) {
        return Err(GenerateError::usage(format!(
            "migration name '{name}' may only contain ASCII letters, digits, '_', '-' and '.'"
        )));
    }
    if name == "." || name == ".." {
        return Err(GenerateError::usage(format!("migration name '{name}' is not a valid file name")));
    }
    Ok(())
}

/// Generator configured for one environment.
pub struct Generator {
    config: GeneratorConfig,
    source: Option<Box<dyn DescriptorSource>>,
}

impl Generator {
    /// Use the source selected by `config.source.kind`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, source: None }
    }

    /// Use an explicit source regardless of configuration.
    pub fn with_source(config: GeneratorConfig, source: impl DescriptorSource + 'static) -> Self {
        Self {
            config,
            source: Some(Box::new(source)),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Locate the output root starting at `start`.
    pub fn locate(&self, start: &Path) -> GenerateResult<OutputLayout> {
        OutputLayout::locate(start, &self.config)
    }

    pub fn run(&self, name: &str, start: &Path, generated_at: DateTime<Utc>) -> GenerateResult<GenerationReport> {
        // Validate
        validate_migration_name(name)?;
        let container = self.config.container()?;

        // Locate
        let layout = self.locate(start)?;
        info!("module root: {}", layout.root.display());

        // Discover
        let namespace = &self.config.generator.namespace;
        let descriptors = match &self.source {
            Some(source) => source.descriptors(namespace)?,
            None => match self.config.source.kind {
                SourceKind::Registry => RegistrySource.descriptors(namespace)?,
                SourceKind::Scan => SourceScanner::new(self.config.scan_dir(&layout.root)).descriptors(namespace)?,
            },
        };
        if descriptors.is_empty() {
            return Err(GenerateError::NoDescriptors {
                namespace: namespace.clone(),
            });
        }
        let entities: Vec<String> = descriptors.iter().map(|d| d.name.clone()).collect();
        info!("indexing {}", entities.join(", "));

        // Compile
        let commands = compile(&descriptors);

        // Version
        layout.ensure_dirs()?;
        let version = next_version(&layout.script_dirs())?;
        info!("next migration version: {version}");

        // Emit
        let artifact = ScriptEmitter::new(container).emit(version, name, &commands, &layout, generated_at)?;

        Ok(GenerationReport {
            layout,
            entities,
            artifact,
        })
    }

    /// Label of the descriptor source this generator will consult.
    pub fn source_label(&self, root: &Path) -> String {
        match &self.source {
            Some(source) => source.describe(),
            None => match self.config.source.kind {
                SourceKind::Registry => RegistrySource.describe(),
                SourceKind::Scan => SourceScanner::new(self.config.scan_dir(root)).describe(),
            },
        }
    }
}
