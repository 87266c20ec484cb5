//! CLI frontend for the Caper heist story.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use caper_engine::EngineConfig;

#[derive(Parser)]
#[command(
    name = "caper",
    about = "Caper: a choose-your-path heist in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story, resuming the saved game if there is one
    Play {
        /// Directory scene document locations are resolved against
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Location of the base scene document, relative to the root
        #[arg(short, long, default_value = "scenes/scenes.json")]
        scenes: String,

        /// Directory holding the save slot
        #[arg(long, default_value = ".caper")]
        save_dir: PathBuf,

        /// Scene a new game starts in
        #[arg(long, default_value = "start")]
        start: String,

        /// Ignore and delete any saved game
        #[arg(long)]
        new: bool,
    },

    /// Check a scene document for broken links and unreachable scenes
    Check {
        /// Directory scene document locations are resolved against
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Location of the scene document, relative to the root
        #[arg(short, long, default_value = "scenes/scenes.json")]
        scenes: String,

        /// Scene the walk starts from
        #[arg(long, default_value = "start")]
        start: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            root,
            scenes,
            save_dir,
            start,
            new,
        } => {
            let config = EngineConfig::default()
                .with_base_document(scenes)
                .with_start_scene(start);
            commands::play::run(&root, config, &save_dir, new)
        }
        Commands::Check {
            root,
            scenes,
            start,
        } => commands::check::run(&root, &scenes, &start),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
