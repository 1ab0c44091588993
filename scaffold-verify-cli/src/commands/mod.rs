//! Subcommand handlers and the configuration plumbing they share.

pub mod config;
pub mod render;
pub mod verify;

use std::path::Path;

use tracing::debug;

use scaffold_verify_core::config::{DEFAULT_CONFIG_FILE, ScaffoldConfig};
use scaffold_verify_core::error::VerifyError;
use scaffold_verify_core::params::TemplateParams;
use scaffold_verify_harness::{CopierEngine, SystemRunner};

use crate::cli::TemplateArgs;
use crate::error::CliError;

/// Load the configuration file with environment overrides applied.
///
/// A missing file is only tolerated for the default path; an explicit
/// `--config` that does not exist is an error.
pub fn load_config(path: &Path) -> Result<ScaffoldConfig, VerifyError> {
    if path == Path::new(DEFAULT_CONFIG_FILE) {
        ScaffoldConfig::load_or_default(path)
    } else {
        ScaffoldConfig::load(path)
    }
}

/// Apply `--template`, `--vcs-ref` and `--data` on top of the loaded config,
/// then re-validate.
pub fn apply_template_args(
    config: &mut ScaffoldConfig,
    args: &TemplateArgs,
) -> Result<(), CliError> {
    if let Some(template) = &args.template {
        config.template.src = template.display().to_string();
    }
    if let Some(vcs_ref) = &args.vcs_ref {
        config.template.vcs_ref = vcs_ref.clone();
    }
    if !args.data.is_empty() {
        let overrides = TemplateParams::from_assignments(&args.data).map_err(VerifyError::from)?;
        debug!(count = overrides.len(), "applying template data overrides");
        config.template.data.merge(overrides);
    }
    config.validate()?;
    Ok(())
}

/// The `copier` engine configured by `[template].engine`.
pub fn engine(config: &ScaffoldConfig) -> CopierEngine<SystemRunner> {
    CopierEngine::new(config.template.engine.clone(), SystemRunner::new())
}
