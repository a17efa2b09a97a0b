//! One-off summarisation from the command line

use super::{build_summariser, CommandError};
use crate::cli::SummariseArgs;
use crate::config::YtsumConfig;
use colored::*;
use tracing::info;
use ytsum_core::types::SummaryRequest;

/// Handle the summarise command
pub async fn handle_summarise_command(args: SummariseArgs, config: &YtsumConfig) -> Result<(), CommandError> {
    let summariser = build_summariser(config)?;

    let request = SummaryRequest::new(args.url, args.video_language, args.summary_language);
    info!("Summarising {:?}", request.youtube_link_url);

    match summariser.summarise(Some(&request)).await {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", "✗ Summarisation failed".red().bold());
            eprintln!("Error: {}", e.to_string().red());
            Err(e.into())
        }
    }
}
