//! Tintoretto CLI binary.
//!
//! This binary provides command-line access to the transposition pipeline:
//! - Run the full pipeline and write the story artifacts
//! - Build and save a world bible on its own
//! - Validate existing prose against a banned-term list

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands, check_story, run_pipeline, write_bible};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    let outcome = match cli.command {
        Commands::Run {
            context,
            scene,
            model,
            bible,
            work,
            out_dir,
        } => {
            run_pipeline(
                &context,
                &scene,
                model.as_deref(),
                bible.as_deref(),
                work.as_deref(),
                &out_dir,
            )
            .await
        }

        Commands::Bible {
            context,
            model,
            work,
            out_dir,
        } => write_bible(&context, model.as_deref(), work.as_deref(), &out_dir).await,

        Commands::Check { file, work } => match check_story(&file, work.as_deref()) {
            Ok(passed) => {
                if !passed {
                    std::process::exit(1);
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        if e.kind().is_configuration() {
            eprintln!("\nConfiguration Error: {e}");
            eprintln!("Check GEMINI_API_KEY and the paths passed on the command line.");
        } else {
            eprintln!("\nPipeline Error: {e}");
        }
        std::process::exit(1);
    }
}
