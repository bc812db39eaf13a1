use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use station_announcer::catalogue::Catalogue;
use station_announcer::config::AnnouncerConfig;
use station_announcer::darwin::load_board;
use station_announcer::domain::ClockTime;
use station_announcer::live::LiveAnnouncer;
use station_announcer::playback::{Announcer, AudioPlayer, ManifestPlayer, StdoutPlayer};
use station_announcer::script::Announcement;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How often `live --watch` re-reads the board.
const WATCH_INTERVAL: Duration = Duration::from_secs(30);

const USAGE: &str = "\
usage:
  station-announcer <announcement.json> [--download <manifest.json>]
  station-announcer live <board.json> [HH:MM] [--watch]";

enum Command {
    Announce {
        path: PathBuf,
        download: Option<PathBuf>,
    },
    Live {
        board: PathBuf,
        at: Option<ClockTime>,
        watch: bool,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args {
        [live, board, rest @ ..] if live == "live" => {
            let mut at = None;
            let mut watch = false;
            for arg in rest {
                if arg == "--watch" {
                    watch = true;
                } else {
                    at = Some(ClockTime::parse_hhmm(arg).map_err(|e| e.to_string())?);
                }
            }
            Ok(Command::Live {
                board: board.into(),
                at,
                watch,
            })
        }
        [path] => Ok(Command::Announce {
            path: path.into(),
            download: None,
        }),
        [path, flag, manifest] if flag == "--download" => Ok(Command::Announce {
            path: path.into(),
            download: Some(manifest.into()),
        }),
        _ => Err(USAGE.to_string()),
    }
}

async fn announce_file(
    config: AnnouncerConfig,
    catalogue: Catalogue,
    path: PathBuf,
    download: Option<PathBuf>,
) -> Result<(), String> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let announcement: Announcement = serde_json::from_str(&json)
        .map_err(|e| format!("invalid announcement {}: {e}", path.display()))?;

    let result = match download {
        Some(manifest) => {
            let announcer = Announcer::new(config, catalogue, ManifestPlayer::new(manifest));
            announcer.announce(&announcement, true).await
        }
        None => {
            let announcer = Announcer::new(config, catalogue, StdoutPlayer);
            announcer.announce(&announcement, false).await
        }
    };
    result.map(|_| ()).map_err(|e| e.to_string())
}

async fn poll_once<P: AudioPlayer>(
    live: &LiveAnnouncer<P>,
    board: &Path,
    at: Option<ClockTime>,
) -> Result<(), String> {
    let board = load_board(board).await.map_err(|e| e.to_string())?;
    let now = at.unwrap_or_else(|| ClockTime::from(chrono::Local::now().time()));

    match live.poll(&board, now).await.map_err(|e| e.to_string())? {
        Some(announced) => info!(service_id = %announced.service_id, "announced"),
        None => info!(station = %board.crs, %now, "nothing to announce"),
    }
    Ok(())
}

async fn run_live(
    config: AnnouncerConfig,
    catalogue: Catalogue,
    board: PathBuf,
    at: Option<ClockTime>,
    watch: bool,
) -> Result<(), String> {
    let live = LiveAnnouncer::new(Announcer::new(config, catalogue, StdoutPlayer));

    if !watch {
        return poll_once(&live, &board, at).await;
    }

    let mut interval = tokio::time::interval(WATCH_INTERVAL);
    loop {
        interval.tick().await;
        // A bad board is usually a half-written file; try again next tick.
        if let Err(e) = poll_once(&live, &board, at).await {
            warn!(error = %e, "live poll failed");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::from(2);
        }
    };

    // Optional config file from environment
    let config = match std::env::var("ANNOUNCER_CONFIG") {
        Ok(path) => match AnnouncerConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => AnnouncerConfig::default(),
    };

    // Recordings catalogue, bundled unless overridden
    let catalogue = match std::env::var("ANNOUNCER_CATALOGUE") {
        Ok(path) => Catalogue::from_json_file(path),
        Err(_) => Catalogue::builtin(),
    };
    let catalogue = match catalogue {
        Ok(catalogue) => catalogue,
        Err(e) => {
            error!(error = %e, "failed to load audio catalogue");
            return ExitCode::FAILURE;
        }
    };
    info!(stations = catalogue.station_count(), "loaded audio catalogue");

    let result = match command {
        Command::Announce { path, download } => {
            announce_file(config, catalogue, path, download).await
        }
        Command::Live { board, at, watch } => run_live(config, catalogue, board, at, watch).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
