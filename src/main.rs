use clap::Parser;
use ratrix::{Config, PaletteName, ProgressEvent, generate_matrix};
use std::path::PathBuf;
use std::process;

/// Render a TV show's per-episode IMDb ratings as a matrix image blended
/// over its poster.
#[derive(Parser, Debug)]
#[command(name = "ratrix", version, about)]
struct Cli {
    /// Name of the show to search for
    show: String,

    /// Path of the image file to write (format follows the extension)
    output: PathBuf,

    /// Color palette: elementary (default) or gruvbox
    #[arg(long, default_value = "elementary")]
    palette: String,
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Searching { query } => {
            println!("Searching for '{query}'..");
        }
        ProgressEvent::ShowFound {
            title,
            total_seasons,
        } => {
            println!("Gathering information about '{title}'..");
            println!("Total seasons: {total_seasons}..");
        }
        ProgressEvent::FetchingSeason { number, total } => {
            println!("Gathering information about season {number:3}/{total}..");
        }
        ProgressEvent::DownloadingPoster => {
            println!("Downloading poster..");
        }
        ProgressEvent::Rendering => {
            println!("Adjusting the image dimensions and drawing the matrix..");
        }
        ProgressEvent::Saving { path } => {
            println!("Saving the resulting image to {}..", path.display());
        }
        ProgressEvent::Complete { .. } => {
            println!("Completed successfully!");
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // The API key is required before any network access
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    config.palette = PaletteName::from_name(&cli.palette);

    if let Err(e) = generate_matrix(&cli.show, &cli.output, &config, handle_progress_event) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
