use super::{cell, percent, score};
use crate::catalog;
use crate::io::output::{EvaluationReport, OutputWriter};
use crate::register::Risk;
use crate::scales::ScaleKind;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_method(report)?;
        self.write_risks(report)?;
        self.write_residual_matrix(report)?;
        self.write_ranking(report)?;
        self.write_conclusion(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# Risk Assessment Report: {}",
            report.summary.project_name
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        let identity = &report.identity;
        let fields = [
            ("Analyst", &identity.analyst),
            ("Unit", &identity.unit),
            ("Agency", &identity.agency),
            ("Contact", &identity.email),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(self.writer, "{label}: {value}  ")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "## Executive Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Risks assessed", &summary.total_risks.to_string())?;
        self.write_row("High inherent risks", &summary.inherent_bands.high.to_string())?;
        self.write_row(
            "Medium inherent risks",
            &summary.inherent_bands.medium.to_string(),
        )?;
        self.write_row("Low inherent risks", &summary.inherent_bands.low.to_string())?;
        self.write_row("Total inherent risk", &score(summary.total_inherent_risk))?;
        self.write_row("Modalities compared", &summary.modality_count.to_string())?;
        self.write_row(
            "Recommended modality",
            summary.best_modality.as_deref().unwrap_or("-"),
        )?;
        self.write_row(
            "Least recommended modality",
            summary.worst_modality.as_deref().unwrap_or("-"),
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {} |", cell(value))?;
        Ok(())
    }

    fn write_method(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Method")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Inherent risk is the impact weight multiplied by the likelihood weight. \
             Residual risk is the inherent risk multiplied by the mitigation factor of each modality. \
             Values up to {} are Low, up to {} Medium, and above that High.",
            score(report.thresholds.low_max),
            score(report.thresholds.medium_max)
        )?;
        writeln!(self.writer)?;
        for kind in [ScaleKind::Impact, ScaleKind::Likelihood] {
            writeln!(self.writer, "| {} | Weight | Description |", kind.label())?;
            writeln!(self.writer, "|---|---|---|")?;
            for level in kind.table() {
                writeln!(
                    self.writer,
                    "| {} | {} | {} |",
                    level.name, level.weight, level.description
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_risks(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risks")?;
        writeln!(self.writer)?;
        if report.risks.is_empty() {
            writeln!(self.writer, "No risks registered.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        for risk in &report.risks {
            self.write_risk(report, risk)?;
        }
        Ok(())
    }

    fn write_risk(&mut self, report: &EvaluationReport, risk: &Risk) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}. {}", risk.id, risk.name)?;
        writeln!(self.writer)?;
        if !risk.description.is_empty() {
            writeln!(self.writer, "{}", risk.description)?;
            writeln!(self.writer)?;
        }
        writeln!(
            self.writer,
            "- Impact: {} ({}). {}",
            risk.impact_level,
            risk.impact_level.weight(),
            risk.impact_justification
        )?;
        writeln!(
            self.writer,
            "- Likelihood: {} ({}). {}",
            risk.likelihood_level,
            risk.likelihood_level.weight(),
            risk.probability_justification
        )?;
        writeln!(
            self.writer,
            "- Inherent risk: {} ({})",
            score(risk.inherent_risk),
            risk.classification
        )?;
        writeln!(self.writer)?;

        if let Some(entry) = catalog::find(&risk.name) {
            writeln!(self.writer, "Impact aspects considered:")?;
            for aspect in entry.impact_aspects {
                writeln!(self.writer, "- {aspect}")?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "Likelihood aspects considered:")?;
            for aspect in entry.likelihood_aspects {
                writeln!(self.writer, "- {aspect}")?;
            }
            writeln!(self.writer)?;
        }

        writeln!(
            self.writer,
            "| Modality | Factor | Residual | Band | Justification |"
        )?;
        writeln!(
            self.writer,
            "|----------|--------|----------|------|---------------|"
        )?;
        for modality in &report.modalities {
            if let Some(mitigation) = risk.mitigation_for(modality.id) {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} |",
                    cell(&modality.name),
                    mitigation.factor,
                    score(mitigation.residual_risk),
                    mitigation.residual_classification,
                    cell(&mitigation.justification)
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_residual_matrix(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        let matrix = &report.residual_matrix;
        if matrix.rows.is_empty() || matrix.modalities.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Residual Risk Matrix")?;
        writeln!(self.writer)?;
        let headers: Vec<String> = matrix.modalities.iter().map(|m| cell(m)).collect();
        writeln!(self.writer, "| Risk | Inherent | {} |", headers.join(" | "))?;
        writeln!(
            self.writer,
            "|------|----------|{}",
            "---|".repeat(matrix.modalities.len())
        )?;
        for row in &matrix.rows {
            let cells: Vec<String> = row.residuals.iter().map(|v| score(*v)).collect();
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                cell(&row.risk_name),
                score(row.inherent_risk),
                cells.join(" | ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_ranking(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        if report.ranking.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Modality Ranking")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Rank | Modality | Total residual | Applicable inherent | Efficacy | Band | Average residual |"
        )?;
        writeln!(
            self.writer,
            "|------|----------|----------------|---------------------|----------|------|------------------|"
        )?;
        for entry in report.ranking.entries() {
            let a = &entry.aggregate;
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} ({}) |",
                entry.rank,
                cell(&a.modality_name),
                score(a.total_residual_risk),
                score(a.total_inherent_risk_applicable),
                percent(a.efficacy_percent),
                a.classification,
                score(a.average_residual_risk),
                a.average_classification
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_conclusion(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Conclusion")?;
        writeln!(self.writer)?;
        match (report.ranking.best(), report.ranking.worst()) {
            (Some(best), Some(worst)) if best.rank != worst.rank => {
                writeln!(
                    self.writer,
                    "**{}** has the lowest total residual risk ({}) and is the recommended modality. \
                     **{}** has the highest ({}).",
                    best.aggregate.modality_name,
                    score(best.aggregate.total_residual_risk),
                    worst.aggregate.modality_name,
                    score(worst.aggregate.total_residual_risk)
                )?;
            }
            (Some(only), _) => {
                writeln!(
                    self.writer,
                    "**{}** is the only modality assessed (total residual risk {}).",
                    only.aggregate.modality_name,
                    score(only.aggregate.total_residual_risk)
                )?;
            }
            _ => writeln!(self.writer, "No modalities registered.")?,
        }
        Ok(())
    }
}
