use super::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::aggregation::{
    residual_matrix, risk_matrix, ModalityRanking, RegisterSummary, ResidualMatrix, RiskMatrix,
};
use crate::config::ReportConfig;
use crate::register::{Modality, Risk, RiskRegister};
use crate::scoring::BandThresholds;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Everything a report shows, computed once from a register.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    pub identity: ReportConfig,
    pub thresholds: BandThresholds,
    pub summary: RegisterSummary,
    pub modalities: Vec<Modality>,
    pub risks: Vec<Risk>,
    pub residual_matrix: ResidualMatrix,
    pub risk_matrix: RiskMatrix,
    pub ranking: ModalityRanking,
}

impl EvaluationReport {
    pub fn new(register: &RiskRegister, identity: ReportConfig) -> Self {
        Self::at(register, identity, Utc::now())
    }

    pub fn at(
        register: &RiskRegister,
        identity: ReportConfig,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let ranking = register.ranking();
        Self {
            generated_at,
            identity,
            thresholds: *register.thresholds(),
            summary: RegisterSummary::from_register(register, &ranking),
            modalities: register.modalities().as_slice().to_vec(),
            risks: register.risks().to_vec(),
            residual_matrix: residual_matrix(register),
            risk_matrix: risk_matrix(register),
            ranking,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &EvaluationReport) -> anyhow::Result<()>;
}

/// `color` only affects the terminal format.
pub fn create_writer<'a>(
    format: OutputFormat,
    out: Box<dyn Write + 'a>,
    color: bool,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal if color => Box::new(TerminalWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::plain(out)),
    }
}
