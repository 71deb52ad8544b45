//! CLI output formatting

use crate::core::PipelineDescriptor;
use crate::environment::ConfigSummary;
use crate::snapshot::RestoreReport;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static BROOM: Emoji<'_, '_> = Emoji("🧹 ", "~ ");

/// Create a spinner for a short-running operation
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format a descriptor as an indented step and flow listing
pub fn format_descriptor(descriptor: &PipelineDescriptor) -> String {
    let mut out = String::new();

    out.push_str(&format!("  Steps ({}):\n", descriptor.steps.len()));
    for step in &descriptor.steps {
        out.push_str(&format!(
            "    {}  {}\n",
            style(&step.id).cyan(),
            style(&step.run).dim()
        ));
    }

    out.push_str(&format!("  Flows ({}):\n", descriptor.flows.len()));
    for flow in &descriptor.flows {
        out.push_str(&format!("    {}\n", style(&flow.name).bold()));
        for chain in &flow.dag {
            out.push_str(&format!("      {}\n", style(chain).dim()));
        }
    }

    out
}

/// Format a configuration summary as a key/value listing
pub fn format_summary(summary: &ConfigSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "  HTTP port:        {}\n",
        style(summary.http_port).cyan()
    ));
    out.push_str(&format!("  OpenId host:      {}\n", summary.openid_host));
    out.push_str(&format!("  Data dir:         {}\n", summary.data_dir.display()));
    out.push_str(&format!("  Cache dir:        {}\n", summary.cache_dir.display()));
    push_path_line(&mut out, "Remotes info", summary.remotes_info.as_deref());
    push_path_line(&mut out, "Users info", summary.users_info.as_deref());
    push_path_line(&mut out, "Secrets file", summary.secrets_file.as_deref());
    if let Some(location) = &summary.default_publish_location {
        out.push_str(&format!("  Publish location: {}\n", location));
    }
    out.push_str(&format!(
        "  Commands:         {}\n",
        style(summary.commands.join(", ")).cyan()
    ));
    out.push_str(&format!(
        "  On load:          {}\n",
        if summary.on_load {
            style("hook bound").green()
        } else {
            style("none").dim()
        }
    ));

    out
}

/// Format a restore report as a single line
pub fn format_restore_report(report: &RestoreReport) -> String {
    format!(
        "{} file(s) restored at {}",
        style(report.files_copied).cyan(),
        style(report.restored_at.format("%H:%M:%S")).dim()
    )
}

fn push_path_line(out: &mut String, label: &str, path: Option<&Path>) {
    if let Some(path) = path {
        out.push_str(&format!("  {:<17} {}\n", format!("{}:", label), path.display()));
    }
}
