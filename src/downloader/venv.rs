use std::{
    env,
    path::{Path, PathBuf},
};

use tokio::process::Command;

use crate::{config, errors::DownloadError};

/// The managed Python virtual environment spotdl runs inside.
///
/// All platform differences (entry-point layout, PATH handling) are resolved
/// here so the invoker only ever sees a validated, ready-to-spawn command
/// built from an argument vector. No shell is involved, so URLs and paths
/// are never interpolated into a command string.
pub struct Venv {
    dir: PathBuf,
}

impl Venv {
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The venv at the application's standard location.
    pub fn default_location() -> Self {
        Self::at(config::venv_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.spotdl_path().is_file()
    }

    /// Path of the spotdl entry point inside the venv.
    pub fn spotdl_path(&self) -> PathBuf {
        executable_path(&self.dir, "spotdl")
    }

    /// Path of the pip entry point inside the venv, used during setup.
    pub fn pip_path(&self) -> PathBuf {
        executable_path(&self.dir, "pip")
    }

    /// Builds a command running the venv's spotdl.
    ///
    /// Fails fast with [`DownloadError::EnvironmentMissing`] when the entry
    /// point does not exist so the caller can surface the rebuild hint
    /// instead of attempting the download. When a bundled ffmpeg directory
    /// is present it is prepended to `PATH` so spotdl picks it up.
    pub fn spotdl_command(&self) -> Result<Command, DownloadError> {
        let bin = self.spotdl_path();
        if !bin.is_file() {
            return Err(DownloadError::EnvironmentMissing(self.dir.clone()));
        }

        let mut cmd = Command::new(bin);
        if let Some(path) = path_with_ffmpeg(&config::ffmpeg_dir()) {
            cmd.env("PATH", path);
        }
        Ok(cmd)
    }
}

/// Entry-point location inside a venv: `bin/<name>` on Unix,
/// `Scripts\<name>.exe` on Windows.
pub fn executable_path(venv_dir: &Path, name: &str) -> PathBuf {
    #[cfg(windows)]
    {
        venv_dir.join("Scripts").join(format!("{}.exe", name))
    }
    #[cfg(not(windows))]
    {
        venv_dir.join("bin").join(name)
    }
}

/// `PATH` with the bundled ffmpeg directory prepended, or `None` when the
/// directory does not exist (the system ffmpeg is used then).
fn path_with_ffmpeg(ffmpeg_dir: &Path) -> Option<std::ffi::OsString> {
    if !ffmpeg_dir.is_dir() {
        return None;
    }

    let current = env::var_os("PATH").unwrap_or_default();
    let paths = std::iter::once(ffmpeg_dir.to_path_buf()).chain(env::split_paths(&current));
    env::join_paths(paths).ok()
}
