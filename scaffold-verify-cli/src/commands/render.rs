//! `scaffold-verify render` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use scaffold_verify_core::config::ScaffoldConfig;
use scaffold_verify_core::error::VerifyError;
use scaffold_verify_core::params::TemplateParams;
use scaffold_verify_harness::{TemplateEngine, VerificationPlan};

use crate::cli::RenderArgs;
use crate::commands::{apply_template_args, engine};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `render` command: render into `--dest` and stop.
pub fn execute(
    args: RenderArgs,
    mut config: ScaffoldConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_template_args(&mut config, &args.template)?;
    let plan = VerificationPlan::from_config(&config)?;

    info!(dest = %args.dest.display(), "rendering template");
    engine(&config)
        .render(&plan.render_request(args.dest.clone()))
        .map_err(VerifyError::from)?;

    writer.render(&RenderOutput {
        template: plan.template_src.display().to_string(),
        destination: args.dest.display().to_string(),
        params: plan.params,
    })
}

/// Render result.
#[derive(Serialize)]
pub struct RenderOutput {
    pub template: String,
    pub destination: String,
    pub params: TemplateParams,
}

impl Render for RenderOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Rendered {} into {}",
            self.template.bold(),
            self.destination.bold()
        )?;
        for (key, value) in self.params.iter() {
            writeln!(w, "  {:<28} {}", key, value)?;
        }
        Ok(())
    }
}
