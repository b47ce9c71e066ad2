//! # Affiche CLI
//!
//! Command-line interface for generating posters.
//!
//! ## Usage
//!
//! ```bash
//! # Poster from background.png, logo.png and positions.json in the current directory
//! affiche generate --title "Summer Fair" --subtitle "June 21"
//!
//! # Add pictures arranged around the center
//! affiche generate --title "Gallery" --asset a.png --asset b.jpg --asset c.png
//!
//! # Custom inputs and output, keeping a copy in output/
//! affiche generate --background bg.jpg --positions layout.json \
//!     --body "Doors open at seven." --output night.jpg --save-copy output
//! ```

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing::level_filters::LevelFilter;

use affiche::{
    PosterError, files,
    font::default_search_dirs,
    poster::{self, FontSizes, PositionFile, PosterComposer, PosterConfig, PosterRequest},
};

/// Affiche - poster generator
#[derive(Parser, Debug)]
#[command(name = "affiche")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a poster image
    Generate {
        /// Background image
        #[arg(long, default_value = "background.png")]
        background: PathBuf,

        /// Logo image (skipped if missing)
        #[arg(long, default_value = "logo.png")]
        logo: PathBuf,

        /// Additional image placed around the center (repeatable)
        #[arg(long = "asset", value_name = "FILE")]
        assets: Vec<PathBuf>,

        /// Position map JSON (defaults apply if missing)
        #[arg(long, default_value = "positions.json")]
        positions: PathBuf,

        /// Title text (position 1)
        #[arg(long, default_value = "")]
        title: String,

        /// Subtitle text (position 2)
        #[arg(long, default_value = "")]
        subtitle: String,

        /// Body text (position 3), wrapped at 40 columns
        #[arg(long, default_value = "")]
        body: String,

        /// Title font size
        #[arg(long, default_value_t = poster::request::DEFAULT_TITLE_SIZE,
              value_parser = clap::value_parser!(u32).range(48..=300))]
        title_size: u32,

        /// Subtitle font size
        #[arg(long, default_value_t = poster::request::DEFAULT_SUBTITLE_SIZE,
              value_parser = clap::value_parser!(u32).range(28..=180))]
        subtitle_size: u32,

        /// Body font size
        #[arg(long, default_value_t = poster::request::DEFAULT_BODY_SIZE,
              value_parser = clap::value_parser!(u32).range(18..=120))]
        body_size: u32,

        /// Title font file
        #[arg(long, value_name = "FILE")]
        title_font: Option<PathBuf>,

        /// Font file for subtitle and body
        #[arg(long, value_name = "FILE")]
        text_font: Option<PathBuf>,

        /// Extra directory searched for fonts (repeatable)
        #[arg(long = "font-dir", value_name = "DIR")]
        font_dirs: Vec<PathBuf>,

        /// Output file (always JPEG-encoded)
        #[arg(long, default_value = "generated_poster.jpg")]
        output: PathBuf,

        /// Also save a copy into this directory
        #[arg(long, value_name = "DIR")]
        save_copy: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<(), PosterError> {
    match command {
        Commands::Generate {
            background,
            logo,
            assets,
            positions,
            title,
            subtitle,
            body,
            title_size,
            subtitle_size,
            body_size,
            title_font,
            text_font,
            font_dirs,
            output,
            save_copy,
        } => {
            let background = files::load_optional(&background, "background");
            let logo = files::load_optional(&logo, "logo");
            let assets = files::load_assets(&assets);

            let mut search_dirs = default_search_dirs();
            search_dirs.extend(font_dirs);

            let config = PosterConfig {
                title_font,
                text_font,
                font_dirs: Some(search_dirs),
                ..PosterConfig::from_position_file(PositionFile::load(&positions))
            };
            let composer = PosterComposer::new(config);

            let request = PosterRequest {
                background,
                logo,
                title,
                subtitle,
                body,
                footer: None,
                assets,
                sizes: FontSizes {
                    title: title_size,
                    subtitle: subtitle_size,
                    body: body_size,
                },
            };

            let poster = composer.compose(&request)?;
            let bytes = files::encode_jpeg(&poster, files::JPEG_QUALITY)?;
            let written = files::write_output(&bytes, &output, save_copy.as_deref())?;

            for path in &written {
                info!(path = %path.display(), bytes = bytes.len(), "poster written");
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}
