//! Project pipeline
//!
//! Turns a configuration file into the validated pieces generation needs:
//! 1. Load configuration (TOML/YAML, env overrides)
//! 2. Load and parse the canonical templates
//! 3. Register every descriptor (all-or-nothing)
//! 4. Build the rule set once
//! 5. Validate the output layout

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, ConfigWarning};
use crate::domain::entities::{ArtifactSet, CanonicalTemplate, CanonicalTemplates, Registry};
use crate::domain::ports::TemplateSource;
use crate::domain::services::{Generator, Layout};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::infrastructure::FsTemplateSource;

#[derive(Debug, Clone)]
pub struct Project {
    config_path: PathBuf,
    base_dir: PathBuf,
    config: Config,
    warnings: Vec<ConfigWarning>,
    registry: Registry,
    generator: Generator,
    layout: Layout,
}

/// Directory relative paths in `config_path` are resolved against
pub fn base_dir_of(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Project {
    /// Load a project from its configuration file on disk
    pub fn load(config_path: &Path) -> ScaffoldResult<Self> {
        let (config, warnings) = Config::load_with_warnings(config_path)?;
        for w in &warnings {
            warn!(key = %w.key, line = ?w.line, suggestion = ?w.suggestion, "{}", w);
        }
        let source = FsTemplateSource::local(base_dir_of(config_path));
        Self::from_config(config_path, config, warnings, &source)
    }

    /// Assemble a project from an already-parsed configuration
    pub fn from_config(
        config_path: &Path,
        config: Config,
        warnings: Vec<ConfigWarning>,
        source: &impl TemplateSource,
    ) -> ScaffoldResult<Self> {
        let templates = load_templates(&config, source)?;
        let registry = build_registry(&config, templates)?;
        let generator = Generator::from_factory(&config.rule_factory()?)?.strict(config.strict);
        let layout = config.layout()?;

        info!(
            modules = registry.len(),
            rules = generator.rules().len(),
            "loaded {}",
            config_path.display()
        );

        Ok(Self {
            base_dir: base_dir_of(config_path),
            config_path: config_path.to_path_buf(),
            config,
            warnings,
            registry,
            generator,
            layout,
        })
    }

    /// Override the configured strictness (`--strict`)
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.generator = self.generator.strict(strict);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.output.dir)
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.output.lockfile)
    }

    /// Every file whose change should trigger regeneration
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        watched_paths(&self.config_path, &self.config)
    }

    /// Render every artifact, logging placeholders that matched nothing
    pub fn generate(&self) -> ScaffoldResult<ArtifactSet> {
        let artifacts = self.generator.generate(&self.registry)?;
        for artifact in artifacts.artifacts() {
            let unmatched = artifact.unmatched_placeholders();
            if !unmatched.is_empty() {
                warn!(
                    module = artifact.module_key(),
                    operation = %artifact.operation(),
                    "placeholders matched nothing: {}",
                    unmatched.join(", ")
                );
            }
        }
        info!(
            artifacts = artifacts.len(),
            modules = self.registry.len(),
            "generated artifacts"
        );
        Ok(artifacts)
    }
}

/// The configuration file plus every template it names
pub fn watched_paths(config_path: &Path, config: &Config) -> Vec<PathBuf> {
    let base = base_dir_of(config_path);
    let t = &config.template;
    let mut paths = vec![config_path.to_path_buf(), base.join(&t.path)];
    paths.extend(t.overrides.values().map(|p| base.join(p)));
    paths
}

/// Load the default template plus per-operation overrides
pub fn load_templates(
    config: &Config,
    source: &impl TemplateSource,
) -> ScaffoldResult<CanonicalTemplates> {
    let t = &config.template;
    let mut templates = CanonicalTemplates::new(load_template(&t.path, source)?);
    for (op, name) in &t.overrides {
        debug!(operation = %op, template = %name, "per-operation template");
        templates = templates.with_override(*op, load_template(name, source)?);
    }
    Ok(templates)
}

fn load_template(name: &str, source: &impl TemplateSource) -> ScaffoldResult<CanonicalTemplate> {
    let body = source.load(name)?;
    CanonicalTemplate::parse(body).map_err(|e| ScaffoldError::Template {
        name: name.to_string(),
        source: e,
    })
}

/// Register every configured descriptor, or none
pub fn build_registry(config: &Config, templates: CanonicalTemplates) -> ScaffoldResult<Registry> {
    let mut registry = Registry::new(config.palette.clone(), templates);
    registry.register_all(config.modules.iter().cloned())?;
    Ok(registry)
}
