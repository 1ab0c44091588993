//! `scaffold-verify verify` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use scaffold_verify_core::config::ScaffoldConfig;
use scaffold_verify_core::types::VerificationReport;
use scaffold_verify_harness::{SystemRunner, VerificationPlan, VerificationSession, Verifier};

use crate::cli::VerifyArgs;
use crate::commands::{apply_template_args, engine};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `verify` command.
///
/// Renders the template, syncs dependencies and runs every check.
///
/// # Errors
///
/// * `CliError::Config` if the flags produce an invalid configuration
/// * `CliError::Fixture` if rendering or dependency sync fails
/// * `CliError::ChecksFailed` after the report is printed, if any check failed
pub fn execute(
    args: VerifyArgs,
    mut config: ScaffoldConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_template_args(&mut config, &args.template)?;
    if args.idempotence {
        config.template.idempotence = true;
    }

    let plan = VerificationPlan::from_config(&config)?;
    info!(
        template = %plan.template_src.display(),
        checks = plan.checks.len(),
        "starting verification"
    );

    let runner = SystemRunner::for_generated_project();
    let verifier = Verifier::new(plan, engine(&config), runner);
    let VerificationSession { project, report } = verifier.run()?;

    let kept = if args.keep {
        let path = project.keep();
        info!(path = %path.display(), "rendered project kept");
        Some(path.display().to_string())
    } else {
        None
    };

    let output = VerifyOutput { report, kept };
    writer.render(&output)?;

    if output.report.all_passed() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed {
            failed: output.report.failed_count(),
            total: output.report.checks.len(),
        })
    }
}

/// Verification result as printed to the user.
#[derive(Serialize)]
pub struct VerifyOutput {
    #[serde(flatten)]
    pub report: VerificationReport,
    /// Path of the kept project (`--keep` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kept: Option<String>,
}

impl Render for VerifyOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let report = &self.report;
        writeln!(w, "Template: {}", report.template.bold())?;
        writeln!(w, "Project:  {}", report.project_dir)?;
        if let Some(slug) = report.params.get("project_slug") {
            writeln!(w, "Slug:     {}", slug)?;
        }
        writeln!(w)?;

        for check in &report.checks {
            let status = if check.passed {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            writeln!(w, "  {} {:<20} {:>6} ms", status, check.name, check.elapsed_ms)?;
            if let Some(message) = &check.message {
                for line in message.lines() {
                    writeln!(w, "       {}", line)?;
                }
            }
        }

        writeln!(w)?;
        let failed = report.failed_count();
        let summary = format!("{} passed, {} failed", report.checks.len() - failed, failed);
        if failed == 0 {
            writeln!(w, "Result: {}", summary.green())?;
        } else {
            writeln!(w, "Result: {}", summary.red())?;
        }

        if let Some(kept) = &self.kept {
            writeln!(w, "Kept:   {}", kept)?;
        }
        Ok(())
    }
}
