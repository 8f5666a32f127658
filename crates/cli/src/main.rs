use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use triage_core::{assemble, Cuil, CuilInputState, EmergencyIntakeDraft, SeverityLevel};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Emergency intake validation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format raw CUIL input the way the input field does
    CuilFormat {
        /// Raw field text (punctuation and extra digits are dropped)
        raw: String,
    },
    /// Strictly check a complete CUIL
    CuilCheck {
        /// CUIL with or without hyphens
        cuil: String,
    },
    /// Validate an emergency intake draft stored as JSON
    ValidateIntake {
        /// Path to the draft JSON file
        draft: PathBuf,
    },
    /// List emergency levels, most severe first
    SeverityLevels,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run(cli, &mut stdout.lock(), &mut stderr.lock())
}

fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> Result<ExitCode, Box<dyn Error>> {
    match cli.command {
        Some(Commands::CuilFormat { raw }) => {
            let state = CuilInputState::transition(&raw);
            writeln!(out, "{} ({})", state.value(), state.validity())?;
        }
        Some(Commands::CuilCheck { cuil }) => match Cuil::parse(&cuil) {
            Ok(cuil) => writeln!(out, "Valid CUIL: {}", cuil)?,
            Err(e) => {
                writeln!(err, "Invalid CUIL: {}", e)?;
                return Ok(ExitCode::FAILURE);
            }
        },
        Some(Commands::ValidateIntake { draft }) => {
            let contents = std::fs::read_to_string(&draft)?;
            return validate_intake(&contents, out, err);
        }
        Some(Commands::SeverityLevels) => {
            for level in SeverityLevel::ALL {
                writeln!(out, "{}", level)?;
            }
        }
        None => {
            writeln!(out, "Use 'triage --help' for commands")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints the submission payload for a draft, or the reason it cannot be submitted.
fn validate_intake(
    contents: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(contents);
    let draft: EmergencyIntakeDraft = match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(draft) => draft,
        Err(e) => {
            let path = e.path().to_string();
            writeln!(err, "Draft schema mismatch at {}: {}", path, e.into_inner())?;
            return Ok(ExitCode::FAILURE);
        }
    };

    match assemble(&draft) {
        Ok(payload) => writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?,
        Err(e) => {
            writeln!(err, "{}", e)?;
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
