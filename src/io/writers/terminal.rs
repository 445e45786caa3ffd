use super::{percent, score};
use crate::io::output::{EvaluationReport, OutputWriter};
use crate::scoring::RiskBand;
use colored::*;
use comfy_table::{Cell, Color, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: true,
        }
    }

    /// No ANSI escapes, for piping and tests.
    pub fn plain(writer: W) -> Self {
        Self {
            writer,
            color: false,
        }
    }

    fn paint(&self, text: &str, band: RiskBand) -> String {
        if !self.color {
            return text.to_string();
        }
        match band {
            RiskBand::Low => text.green().to_string(),
            RiskBand::Medium => text.yellow().to_string(),
            RiskBand::High => text.red().to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().blue().to_string()
        } else {
            text.to_string()
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        if !self.color {
            table.force_no_tty();
        }
        table
    }
}

fn band_cell(text: String, band: RiskBand) -> Cell {
    let color = match band {
        RiskBand::Low => Color::Green,
        RiskBand::Medium => Color::Yellow,
        RiskBand::High => Color::Red,
    };
    Cell::new(text).fg(color)
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_summary(report)?;
        self.print_risks(report)?;
        self.print_ranking(report)?;
        self.print_recommendation(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        let title = format!("Risk Assessment: {}", report.summary.project_name);
        writeln!(self.writer, "{}", self.heading(&title))?;
        writeln!(self.writer, "{}", "=".repeat(title.chars().count()))?;
        if let Some(analyst) = &report.identity.analyst {
            writeln!(self.writer, "Analyst: {analyst}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Risks assessed: {}", summary.total_risks)?;
        let bands = RiskBand::ALL
            .iter()
            .rev()
            .map(|band| {
                let text = format!("{} {}", summary.inherent_bands.get(*band), band);
                self.paint(&text, *band)
            })
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.writer, "  Inherent bands: {bands}")?;
        writeln!(
            self.writer,
            "  Total inherent risk: {}",
            score(summary.total_inherent_risk)
        )?;
        writeln!(self.writer, "  Modalities compared: {}", summary.modality_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_risks(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        if report.risks.is_empty() {
            writeln!(self.writer, "No risks registered.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = self.table();
        let mut header = vec![
            "Id".to_string(),
            "Risk".to_string(),
            "Impact".to_string(),
            "Likelihood".to_string(),
            "Inherent".to_string(),
        ];
        header.extend(report.residual_matrix.modalities.iter().cloned());
        table.set_header(header);

        for (risk, row) in report.risks.iter().zip(&report.residual_matrix.rows) {
            let mut cells = vec![
                Cell::new(risk.id),
                Cell::new(&risk.name),
                Cell::new(risk.impact_level),
                Cell::new(risk.likelihood_level),
                band_cell(score(risk.inherent_risk), risk.classification),
            ];
            cells.extend(
                row.residuals
                    .iter()
                    .map(|v| band_cell(score(*v), report.thresholds.classify(*v))),
            );
            table.add_row(cells);
        }
        writeln!(self.writer, "{}", self.heading("Residual risk by modality"))?;
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_ranking(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        if report.ranking.is_empty() {
            return Ok(());
        }
        let mut table = self.table();
        table.set_header(vec![
            "Rank",
            "Modality",
            "Total residual",
            "Efficacy",
            "Band",
            "Average",
        ]);
        for entry in report.ranking.entries() {
            let a = &entry.aggregate;
            table.add_row(vec![
                Cell::new(entry.rank),
                Cell::new(&a.modality_name),
                Cell::new(score(a.total_residual_risk)),
                Cell::new(percent(a.efficacy_percent)),
                band_cell(a.classification.to_string(), a.classification),
                band_cell(
                    format!(
                        "{} ({})",
                        score(a.average_residual_risk),
                        a.average_classification
                    ),
                    a.average_classification,
                ),
            ]);
        }
        writeln!(self.writer, "{}", self.heading("Modality ranking"))?;
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_recommendation(&mut self, report: &EvaluationReport) -> anyhow::Result<()> {
        let (Some(best), Some(worst)) = (report.ranking.best(), report.ranking.worst()) else {
            writeln!(self.writer, "No modalities registered.")?;
            return Ok(());
        };
        let check = if self.color {
            "✓".green().to_string()
        } else {
            "✓".to_string()
        };
        writeln!(
            self.writer,
            "{check} Recommended: {} (total residual {})",
            best.aggregate.modality_name,
            score(best.aggregate.total_residual_risk)
        )?;
        if worst.rank != best.rank {
            let cross = if self.color {
                "✗".red().to_string()
            } else {
                "✗".to_string()
            };
            writeln!(
                self.writer,
                "{cross} Least recommended: {} (total residual {})",
                worst.aggregate.modality_name,
                score(worst.aggregate.total_residual_risk)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::register::{RiskRegister, ScoringPolicy};
    use crate::testkit::scenario_register;

    fn render(register: &RiskRegister) -> String {
        let report = EvaluationReport::new(register, ReportConfig::default());
        let mut buffer = Vec::new();
        TerminalWriter::plain(&mut buffer)
            .write_report(&report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_plain_report_contents() {
        let output = render(&scenario_register());
        assert!(output.starts_with("Risk Assessment: Regional HQ\n"));
        assert!(output.contains("  Inherent bands: 1 High, 1 Medium, 1 Low\n"));
        assert!(output.contains("Deadline"));
        assert!(output.contains("69.9%"));
        assert!(output.contains("✓ Recommended: B (total residual 22.0)"));
        assert!(output.contains("✗ Least recommended: C (total residual 68.0)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_register() {
        let output = render(&RiskRegister::new("Empty", ScoringPolicy::default()));
        assert!(output.contains("No risks registered."));
        assert!(output.ends_with("No modalities registered.\n"));
    }
}
