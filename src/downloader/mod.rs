//! # Downloader Module
//!
//! Orchestrates the external `spotdl` tool: resolving the managed Python
//! virtual environment into a runnable command, spawning download jobs,
//! mapping subprocess results onto the download registry, and setting the
//! environment up in the first place.
//!
//! Each download is an independent subprocess; there is no admission control
//! or retry policy. Cancellation kills the child process and updates the job
//! only after the kill has been confirmed.

mod invoker;
mod setup;
mod venv;

pub use invoker::JobOutcome;
pub use invoker::LONG_RUNNING_NOTICE_SECS;
pub use invoker::run_job;
pub use invoker::stderr_signals_broken_env;
pub use setup::PythonCheck;
pub use setup::check_python;
pub use setup::classify_python_version;
pub use setup::create_venv;
pub use setup::find_ffmpeg;
pub use setup::parse_python_version;
pub use setup::remove_venv;
pub use venv::Venv;
pub use venv::executable_path;
