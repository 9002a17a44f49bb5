//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `qbank_core` linkage.
//! - Classify questions piped on stdin against a bank snapshot.
//!
//! Usage: `qbank_cli [--bank bank.json] [--course NAME] [--instructor NAME]
//! [--survey-profile] < questions.txt`
//! Without a bank file the default seed bank is used. Results are printed as
//! a JSON array on stdout; the bank is never written.

use clap::Parser;
use qbank_core::{
    classify_block, default_question_bank, parse_bank_json, MaskNames, MatchConfig, SystemClock,
};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "qbank_cli",
    version,
    about = "Classify pasted survey questions against a question bank"
)]
struct Cli {
    /// Bank snapshot as a JSON array (defaults to the seed bank)
    #[arg(short = 'b', long = "bank")]
    bank: Option<PathBuf>,

    /// Course name replaced by {{COURSE}}
    #[arg(short = 'c', long = "course", default_value = "")]
    course: String,

    /// Instructor name replaced by {{INSTRUCTOR}}
    #[arg(short = 'i', long = "instructor", default_value = "")]
    instructor: String,

    /// Use the stricter survey thresholds and digit/symbol stripping
    #[arg(long = "survey-profile")]
    survey_profile: bool,
}

impl Cli {
    fn mask_names(&self) -> MaskNames {
        MaskNames::new(self.course.clone(), self.instructor.clone())
    }

    fn match_config(&self) -> MatchConfig {
        if self.survey_profile {
            MatchConfig::survey_profile()
        } else {
            MatchConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    eprintln!("qbank_core ping={}", qbank_core::ping());
    eprintln!("qbank_core version={}", qbank_core::core_version());

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, String> {
    let bank = match &cli.bank {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|err| {
                format!("failed to read bank file `{}`: {err}", path.display())
            })?;
            parse_bank_json(&raw).map_err(|err| err.to_string())?
        }
        None => default_question_bank(&SystemClock),
    };

    let mut block = String::new();
    std::io::stdin()
        .read_to_string(&mut block)
        .map_err(|err| format!("failed to read stdin: {err}"))?;

    let results = classify_block(&block, &cli.mask_names(), &bank, &cli.match_config())
        .map_err(|err| err.to_string())?;
    serde_json::to_string_pretty(&results).map_err(|err| err.to_string())
}
