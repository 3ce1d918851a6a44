use clap::Args;
use leadership_index::error::{AppError, InputError};
use leadership_index::scoring::{compute, ScoreInput, ScoreReport};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON submission to score (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Print the report on a single line
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let body = read_submission(args.input.as_deref())?;
    let report = score_submission(&body)?;
    println!("{}", render_report(&report, args.compact)?);
    Ok(())
}

fn read_submission(path: Option<&Path>) -> Result<Vec<u8>, InputError> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut body = Vec::new();
            io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

/// Strict counterpart of the HTTP endpoint: input that is not JSON is an error.
fn score_submission(body: &[u8]) -> Result<ScoreReport, InputError> {
    let input = ScoreInput::from_json_slice(body)?;
    Ok(compute(&input))
}

fn render_report(report: &ScoreReport, compact: bool) -> Result<String, InputError> {
    let rendered = if compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    };
    rendered.map_err(InputError::Encode)
}
