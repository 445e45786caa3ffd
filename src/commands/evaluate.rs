use super::CommandContext;
use crate::cli;
use crate::io::output::{create_writer, EvaluationReport, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

/// Explicit flag first, then `[output] default_format`, then terminal.
pub fn resolve_format(ctx: &CommandContext<'_>, flag: Option<cli::OutputFormat>) -> OutputFormat {
    if let Some(format) = flag {
        return format.into();
    }
    match ctx.config.default_format().map(str::parse::<OutputFormat>) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            tracing::warn!("{e} in config. Using terminal output.");
            OutputFormat::Terminal
        }
        None => OutputFormat::Terminal,
    }
}

pub fn handle_evaluate(ctx: &CommandContext<'_>, config: EvaluateConfig) -> Result<()> {
    let register = ctx.load()?;
    let report = EvaluationReport::new(&register, ctx.config.report());
    let format = resolve_format(ctx, config.format);

    let color = !config.plain
        && config.output.is_none()
        && ctx
            .config
            .use_color()
            .unwrap_or_else(|| std::io::stdout().is_terminal());

    let out: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = create_writer(format, out, color);
    writer.write_report(&report)?;
    drop(writer);

    if let Some(path) = &config.output {
        tracing::info!(path = %path.display(), ?format, "Report written");
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
