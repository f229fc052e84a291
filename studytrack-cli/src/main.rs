use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use studytrack_core::StudyEngine;

mod logging;
mod shell;

#[derive(Parser, Debug)]
#[command(name = "studytrack", version, about = "In-memory study planning shell")]
struct Cli {
    /// Log level; falls back to STUDYTRACK_LOG, then "info"
    #[arg(long, value_enum)]
    log_level: Option<logging::LogLevel>,

    /// Pin "today" (YYYY-MM-DD) for reproducible sessions
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level)?;

    let engine = match cli.today {
        Some(date) => StudyEngine::with_today(date),
        None => StudyEngine::new(),
    };

    shell::run(&engine)
}
