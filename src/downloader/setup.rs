use std::path::PathBuf;

use tokio::process::Command;

use crate::{Res, config, info};

use super::Venv;

/// Result of probing the system Python installation.
#[derive(Debug, Clone)]
pub struct PythonCheck {
    pub compatible: bool,
    pub version: String,
    pub message: Option<String>,
}

/// Parses the output of `python3 --version` ("Python 3.11.4") into a
/// major/minor pair.
pub fn parse_python_version(output: &str) -> Option<(u32, u32)> {
    let rest = output.trim().strip_prefix("Python ")?;
    let mut parts = rest.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// Classifies a Python version for spotdl compatibility.
///
/// spotdl works best with 3.9-3.11; 3.12 is known to have package
/// compatibility issues and anything older than 3.9 is unsupported.
pub fn classify_python_version(major: u32, minor: u32) -> PythonCheck {
    let version = format!("{}.{}", major, minor);
    if major == 3 && (9..=11).contains(&minor) {
        PythonCheck {
            compatible: true,
            version,
            message: None,
        }
    } else if major == 3 && minor >= 12 {
        PythonCheck {
            compatible: false,
            version,
            message: Some(
                "Python 3.12+ may have compatibility issues with some required packages. \
                 Consider installing Python 3.11."
                    .to_string(),
            ),
        }
    } else {
        PythonCheck {
            compatible: false,
            version,
            message: Some("Python version is too old. spotdl requires Python 3.9 or newer.".to_string()),
        }
    }
}

/// Probes the system `python3` and classifies its version.
pub async fn check_python() -> PythonCheck {
    let output = Command::new("python3").arg("--version").output().await;

    match output {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            // Some Pythons print the version on stderr.
            let text = if text.trim().is_empty() {
                String::from_utf8_lossy(&out.stderr).into_owned()
            } else {
                text.into_owned()
            };
            match parse_python_version(&text) {
                Some((major, minor)) => classify_python_version(major, minor),
                None => PythonCheck {
                    compatible: false,
                    version: "unknown".to_string(),
                    message: Some("Unable to determine Python version.".to_string()),
                },
            }
        }
        _ => PythonCheck {
            compatible: false,
            version: "not found".to_string(),
            message: Some(
                "Python 3 not found or not accessible. Please install Python 3.9-3.11.".to_string(),
            ),
        },
    }
}

/// Locates an ffmpeg binary: the bundled directory first, then common
/// system install locations.
pub fn find_ffmpeg() -> Option<PathBuf> {
    let bundled = config::ffmpeg_dir().join(if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" });
    if bundled.is_file() {
        return Some(bundled);
    }

    let common_paths = [
        "/opt/homebrew/bin/ffmpeg",
        "/usr/local/bin/ffmpeg",
        "/usr/bin/ffmpeg",
        "/opt/local/bin/ffmpeg",
    ];
    for path in common_paths {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
    }

    None
}

/// Creates the virtual environment and installs spotdl into it.
///
/// Runs `python3 -m venv`, upgrades pip, then installs spotdl. Each step is
/// fatal on failure; partial environments are caught by the existence check
/// on the next download attempt.
pub async fn create_venv(venv: &Venv) -> Res<()> {
    info!("Creating virtual environment at {}", venv.dir().display());
    run_step(
        Command::new("python3").arg("-m").arg("venv").arg(venv.dir()),
        "create virtual environment",
    )
    .await?;

    info!("Upgrading pip...");
    run_step(
        Command::new(venv.pip_path())
            .arg("install")
            .arg("--upgrade")
            .arg("pip"),
        "upgrade pip",
    )
    .await?;

    info!("Installing spotdl (this can take a few minutes)...");
    run_step(
        Command::new(venv.pip_path()).arg("install").arg("spotdl"),
        "install spotdl",
    )
    .await?;

    Ok(())
}

/// Deletes the virtual environment directory. Destructive; callers must get
/// explicit user confirmation first.
pub async fn remove_venv(venv: &Venv) -> Res<()> {
    if venv.dir().exists() {
        async_fs::remove_dir_all(venv.dir()).await?;
    }
    Ok(())
}

async fn run_step(cmd: &mut Command, what: &str) -> Res<()> {
    let output = cmd
        .output()
        .await
        .map_err(|e| format!("failed to {}: {}", what, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("failed to {}: {}", what, stderr.trim()).into());
    }
    Ok(())
}
