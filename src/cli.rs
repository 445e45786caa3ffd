use crate::scales::Level;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(
    about = "Risk scoring and contracting-modality comparison for public works",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Register file to read and update
    #[arg(
        long,
        global = true,
        env = "RISKMAP_REGISTER",
        default_value = "risk-register.json"
    )]
    pub register: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .riskmap.toml and an empty register seeded with default modalities
    Init {
        /// Overwrite an existing register and configuration file
        #[arg(long)]
        force: bool,

        /// Project name stored in the register
        #[arg(long, default_value = "Unnamed project")]
        project: String,
    },

    /// Manage contracting modalities
    Modality {
        #[command(subcommand)]
        action: ModalityCommand,
    },

    /// Manage risks
    Risk {
        #[command(subcommand)]
        action: RiskCommand,
    },

    /// Overwrite mitigation factors of whole modalities in one step
    Reassess {
        /// NAME=FACTOR, applied to every risk
        #[arg(long = "factor", value_parser = parse_factor, required = true)]
        factors: Vec<FactorArg>,
    },

    /// Score the register and rank the modalities
    Evaluate {
        /// Output format (defaults to [output] default_format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors in terminal output
        #[arg(long)]
        plain: bool,
    },

    /// List the predefined risks and the aspects to weigh for each
    Catalog {
        /// Show a single entry
        #[arg(long)]
        name: Option<String>,
    },

    /// Rename the project
    Project {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModalityCommand {
    /// Add a modality; existing risks get the default factor for it
    Add { name: String },
    /// Remove a modality and its mitigation entries
    Remove { name: String },
    /// Rename a modality, keeping its mitigation entries
    Rename { old: String, new: String },
    /// List modalities
    List,
}

#[derive(Subcommand, Debug)]
pub enum RiskCommand {
    /// Register a risk with one factor per modality
    Add(RiskAddArgs),
    /// Change fields of an existing risk
    Edit(RiskEditArgs),
    /// Remove a risk by id
    Remove {
        #[arg(value_parser = parse_risk_id)]
        id: u64,
    },
    /// List risks with their scores
    List,
}

#[derive(Args, Debug)]
pub struct RiskAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Impact level: label ("Very high"), key (very_high) or weight (10)
    #[arg(long, value_parser = parse_level)]
    pub impact: Level,

    /// Likelihood level: label, key or weight
    #[arg(long, value_parser = parse_level)]
    pub likelihood: Level,

    #[arg(long)]
    pub impact_justification: String,

    #[arg(long)]
    pub likelihood_justification: String,

    /// NAME=FACTOR, once per modality
    #[arg(long = "factor", value_parser = parse_factor)]
    pub factors: Vec<FactorArg>,

    /// NAME=TEXT, why the factor was chosen
    #[arg(long = "note", value_parser = parse_note)]
    pub notes: Vec<NoteArg>,
}

#[derive(Args, Debug)]
pub struct RiskEditArgs {
    #[arg(value_parser = parse_risk_id)]
    pub id: u64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_level)]
    pub impact: Option<Level>,

    #[arg(long, value_parser = parse_level)]
    pub likelihood: Option<Level>,

    #[arg(long)]
    pub impact_justification: Option<String>,

    #[arg(long)]
    pub likelihood_justification: Option<String>,

    /// NAME=FACTOR, only the listed modalities change
    #[arg(long = "factor", value_parser = parse_factor)]
    pub factors: Vec<FactorArg>,

    /// NAME=TEXT
    #[arg(long = "note", value_parser = parse_note)]
    pub notes: Vec<NoteArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorArg {
    pub modality: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteArg {
    pub modality: String,
    pub text: String,
}

/// Split on the last `=` so modality names may contain one.
pub fn parse_factor(s: &str) -> Result<FactorArg, String> {
    let (name, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=FACTOR, got '{s}'"))?;
    let factor = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    if name.trim().is_empty() {
        return Err(format!("missing modality name in '{s}'"));
    }
    Ok(FactorArg {
        modality: name.trim().to_string(),
        factor,
    })
}

/// Split on the first `=`; the text may contain more.
pub fn parse_note(s: &str) -> Result<NoteArg, String> {
    let (name, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TEXT, got '{s}'"))?;
    if name.trim().is_empty() {
        return Err(format!("missing modality name in '{s}'"));
    }
    Ok(NoteArg {
        modality: name.trim().to_string(),
        text: text.to_string(),
    })
}

pub fn parse_level(s: &str) -> Result<Level, String> {
    s.parse::<Level>().map_err(|e| e.to_string())
}

/// Accepts `7` or the displayed form `R7`.
pub fn parse_risk_id(s: &str) -> Result<u64, String> {
    let digits = s.trim().trim_start_matches(['R', 'r']);
    digits
        .parse::<u64>()
        .map_err(|_| format!("'{s}' is not a risk id"))
}
