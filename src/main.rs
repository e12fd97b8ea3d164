use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotwire::{cli, config, error, types::AuthState};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the Spotify API
    Auth,

    /// Remove the cached token
    Logout,

    /// Manage credentials and defaults
    Config(ConfigOptions),

    /// Show the authenticated user's profile
    Profile,

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// List the tracks of a playlist
    Tracks(TracksOptions),

    /// List your liked songs
    Liked(LikedOptions),

    /// List your top tracks
    Top(TopOptions),

    /// Download tracks or playlists via spotdl
    Download(DownloadOptions),

    /// Manage the spotdl Python environment
    Env(EnvOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage credentials and defaults")]
pub struct ConfigOptions {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Store Spotify application credentials
    Set(ConfigSetOpts),

    /// Set the default downloads folder
    Folder(ConfigFolderOpts),

    /// Show the current configuration
    Show,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigSetOpts {
    /// Spotify application client id
    #[clap(long)]
    pub client_id: String,

    /// Spotify application client secret
    #[clap(long)]
    pub client_secret: String,

    /// Redirect URI registered with the application (defaults to the local
    /// callback server)
    #[clap(long)]
    pub redirect_uri: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigFolderOpts {
    /// Destination folder for downloads
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Filter playlists by name
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Playlist id, URL, or URI
    pub playlist: String,

    /// Number of pages to fetch
    #[clap(long, conflicts_with = "all")]
    pub pages: Option<usize>,

    /// Fetch all pages
    #[clap(long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LikedOptions {
    /// Number of pages to fetch
    #[clap(long, conflicts_with = "all")]
    pub pages: Option<usize>,

    /// Fetch all pages
    #[clap(long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Number of tracks to show (max 50)
    #[clap(long)]
    pub limit: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Download tracks or playlists via spotdl")]
pub struct DownloadOptions {
    #[command(subcommand)]
    pub command: DownloadSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DownloadSubcommand {
    /// Download a single track
    Track(DownloadTrackOpts),

    /// Download a whole playlist
    Playlist(DownloadPlaylistOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadTrackOpts {
    /// Track id, URL, or URI
    pub track: String,

    /// Destination folder (overrides the configured default)
    #[clap(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadPlaylistOpts {
    /// Playlist id, URL, or URI
    pub playlist: String,

    /// Destination folder (overrides the configured default)
    #[clap(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage the spotdl Python environment")]
pub struct EnvOptions {
    #[command(subcommand)]
    pub command: EnvSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EnvSubcommand {
    /// Check Python, ffmpeg, and the spotdl environment
    Check,

    /// Create the spotdl environment
    Setup,

    /// Delete and recreate the spotdl environment
    Rebuild(EnvRebuildOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct EnvRebuildOpts {
    /// Confirm deleting the existing environment
    #[clap(long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<AuthState>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,

        Command::Config(opt) => match opt.command {
            ConfigSubcommand::Set(o) => {
                cli::set_credentials(o.client_id, o.client_secret, o.redirect_uri).await
            }
            ConfigSubcommand::Folder(o) => cli::set_folder(o.path).await,
            ConfigSubcommand::Show => cli::show_config().await,
        },

        Command::Profile => cli::profile().await,
        Command::Playlists(opt) => cli::list_playlists(opt.search).await,
        Command::Tracks(opt) => cli::list_tracks(opt.playlist, opt.pages, opt.all).await,
        Command::Liked(opt) => cli::liked_songs(opt.pages, opt.all).await,
        Command::Top(opt) => cli::top_tracks(opt.limit).await,

        Command::Download(opt) => match opt.command {
            DownloadSubcommand::Track(o) => cli::download_track(o.track, o.output).await,
            DownloadSubcommand::Playlist(o) => cli::download_playlist(o.playlist, o.output).await,
        },

        Command::Env(opt) => match opt.command {
            EnvSubcommand::Check => cli::env_check().await,
            EnvSubcommand::Setup => cli::env_setup().await,
            EnvSubcommand::Rebuild(o) => cli::env_rebuild(o.yes).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
