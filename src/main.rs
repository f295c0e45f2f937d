use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use geotag_map::constants::CONFIG_FILE;
use geotag_map::pipeline;
use geotag_map::settings::Settings;

#[derive(Parser)]
#[command(
    name = "geotag_map",
    version,
    about = "Show geotagged photos and curated locations on an interactive map"
)]
struct Cli {
    /// Directories to search recursively for .jpg/.jpeg/.heic photos.
    /// Prompts for them when omitted.
    directories: Vec<PathBuf>,

    /// Spreadsheet with additional locations (one sheet per category)
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Decode photos one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Log per-file decoding details
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective settings back to the configuration file
    #[arg(long)]
    save_config: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "geotag_map=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).context("Failed to read from stdin")?;
    Ok(answer.trim().to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    if let Some(output) = cli.output {
        settings.output_file = output;
    }
    if cli.sequential {
        settings.parallel = false;
    }

    let interactive = cli.directories.is_empty();
    let directories = if interactive {
        println!(
            "\nThis program searches for *.jpg, *.jpeg and *.heic pictures in the given folders, \
             extracts their geotags and shows the locations on a map. Additional locations \
             are loaded from a spreadsheet with one sheet per category and the columns \
             title, location and text.\n"
        );
        let answer = prompt(concat!(
            "Please copy a folder path from your explorer or several folder paths ",
            "separated by commas to search for photos: "
        ))?;
        answer
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect()
    } else {
        cli.directories
    };

    match cli.overlay {
        Some(overlay) => settings.overlay_file = overlay,
        None if interactive => {
            let answer = prompt(&format!(
                "\nDo you have additional locations you want to show? \
                 Enter the spreadsheet file name [{}]: ",
                settings.overlay_file.display()
            ))?;
            if !answer.is_empty() {
                settings.overlay_file = PathBuf::from(answer);
            }
        }
        None => {}
    }

    if cli.save_config {
        settings
            .save(&cli.config)
            .with_context(|| format!("Failed to save {}", cli.config.display()))?;
        println!("💾 Settings saved to {}", cli.config.display());
    }

    let now = chrono::Local::now().naive_local();
    pipeline::run(&directories, &settings, now)?;

    if interactive {
        prompt("\nYou can close the window now or type enter.")?;
    }
    Ok(())
}
