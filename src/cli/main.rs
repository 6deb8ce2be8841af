use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use exif_edit::acquire::{self, download_target};
use exif_edit::config::Config;
use exif_edit::display::{self, Palette};
use exif_edit::exif;
use exif_edit::session::{self, Session, Source};

#[derive(Parser, Debug)]
#[command(
    name = "exif-edit",
    version,
    about = "View and edit JPEG EXIF metadata (tags, GPS) and save a modified copy"
)]
struct Cli {
    /// Image to open (prompts for a path or URL when omitted)
    #[arg(value_name = "PATH", conflicts_with = "url")]
    path: Option<PathBuf>,

    /// Download the image from this URL first
    #[arg(long, value_name = "URL", requires = "save_as")]
    url: Option<String>,

    /// File name for the downloaded image (`.jpg` is appended)
    #[arg(long, value_name = "NAME")]
    save_as: Option<String>,

    /// Display all EXIF metadata and exit
    #[arg(long)]
    show: bool,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    tokio::spawn(async {
        if interrupted(tokio::signal::ctrl_c()).await {
            // The session may be blocked on stdin; leave without waiting for it.
            println!();
            let _ = io::stdout().flush();
            std::process::exit(0);
        }
    });

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `true` once Ctrl-C arrives, `false` if the handler could not be installed.
async fn interrupted(signal: impl Future<Output = io::Result<()>>) -> bool {
    match signal.await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Cannot listen for Ctrl-C: {e}");
            false
        }
    }
}

/// Flag combinations clap cannot express.
fn check_args(cli: &Cli) -> Result<()> {
    if cli.show && cli.path.is_none() && cli.url.is_none() {
        anyhow::bail!("--show needs a PATH or --url. Use --help for usage.");
    }
    if cli.save_as.as_deref().is_some_and(|name| name.trim().is_empty()) {
        anyhow::bail!("--save-as needs a non-empty file name.");
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Handle --init
    if cli.init {
        let path = Config::default().save(cli.config.as_deref())?;
        println!("Default config written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    check_args(&cli)?;

    let config = Config::load(cli.config.as_deref())?;
    let palette = Palette::new(config.output.color && !cli.no_color);

    let source = match (cli.path, cli.url) {
        (Some(path), _) => Source::Local(path),
        (None, Some(url)) => Source::Download {
            url,
            name: cli.save_as.unwrap_or_default(),
        },
        (None, None) => {
            let asked = tokio::task::spawn_blocking(|| {
                session::ask_source(&mut io::stdin().lock(), &mut io::stdout())
            })
            .await
            .context("Prompt task failed")??;
            match asked {
                Some(source) => source,
                None => return Ok(ExitCode::SUCCESS),
            }
        }
    };

    let path = match source {
        Source::Local(path) => path,
        Source::Download { url, name } => {
            let dest = download_target(&name);
            match acquire::download(&url, &dest, &config.download_options()).await {
                Ok(path) => {
                    println!("Image downloaded to {}", path.display());
                    path
                }
                Err(e) => {
                    eprintln!("Download failed: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    };

    let metadata = match exif::read(&path) {
        Ok(metadata) => metadata,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Handle --show
    if cli.show {
        display::write_metadata(&mut io::stdout().lock(), &path, &metadata.tags, &palette)?;
        return Ok(ExitCode::SUCCESS);
    }

    let options = config.write_options();
    let summary = tokio::task::spawn_blocking(move || {
        Session::new(io::stdin().lock(), io::stdout(), path, metadata, options, palette).run()
    })
    .await
    .context("Session task failed")??;

    if summary.interrupted {
        log::debug!("input closed; leaving");
    }
    log::debug!("saved {} file(s)", summary.saved.len());
    Ok(ExitCode::SUCCESS)
}
