use std::fmt;

use crate::utils;

/// Lifecycle state of one download job.
///
/// Transitions are explicit: a job starts in `Started`, moves to `InProgress`
/// once the subprocess is running, and ends in exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Started,
    InProgress,
    Failed,
    Completed,
    Canceled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Failed | JobStatus::Completed | JobStatus::Canceled
        )
    }

    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Started | JobStatus::InProgress)
    }

    /// Whether moving from `self` to `to` is a legal transition.
    ///
    /// Terminal states accept nothing; `Started` may move to any other state
    /// and `InProgress` to any terminal state.
    pub fn can_transition(&self, to: JobStatus) -> bool {
        match self {
            JobStatus::Started => to != JobStatus::Started,
            JobStatus::InProgress => to.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Started => "Started",
            JobStatus::InProgress => "In Progress",
            JobStatus::Failed => "Failed",
            JobStatus::Completed => "Completed",
            JobStatus::Canceled => "Canceled",
        };
        write!(f, "{}", label)
    }
}

/// Operational record of one triggered download.
///
/// Records accumulate for the session and are never evicted; they back the
/// downloads table printed after `spotwire download`.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub download_id: String,
    pub track_id: Option<String>,
    pub display_name: String,
    pub artist: String,
    pub status: JobStatus,
    pub start_time: u64,
    pub elapsed: Option<u64>,
    pub error: Option<String>,
    pub is_playlist: bool,
}

impl DownloadJob {
    /// New job for a single track. The id is the track id combined with the
    /// trigger timestamp so repeated downloads of one track stay distinct.
    pub fn track(track_id: &str, display_name: &str, artist: &str) -> Self {
        let now = utils::now_millis();
        Self {
            download_id: format!("{}-{}", track_id, now),
            track_id: Some(track_id.to_string()),
            display_name: display_name.to_string(),
            artist: artist.to_string(),
            status: JobStatus::Started,
            start_time: now,
            elapsed: None,
            error: None,
            is_playlist: false,
        }
    }

    /// New aggregated job for a whole playlist.
    pub fn playlist(playlist_id: &str, playlist_name: &str) -> Self {
        let now = utils::now_millis();
        Self {
            download_id: format!("playlist-{}-{}", playlist_id, now),
            track_id: None,
            display_name: format!("Playlist: {}", playlist_name),
            artist: String::new(),
            status: JobStatus::Started,
            start_time: now,
            elapsed: None,
            error: None,
            is_playlist: true,
        }
    }
}

/// Fields that may change after a job was created.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub error: Option<String>,
    pub elapsed: Option<u64>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn failed(error: String, elapsed: u64) -> Self {
        Self {
            status: Some(JobStatus::Failed),
            error: Some(error),
            elapsed: Some(elapsed),
        }
    }

    pub fn completed(elapsed: u64) -> Self {
        Self {
            status: Some(JobStatus::Completed),
            error: None,
            elapsed: Some(elapsed),
        }
    }
}

/// In-memory collection of download jobs, iterated in insertion order.
pub struct DownloadRegistry {
    jobs: Vec<DownloadJob>,
}

impl DownloadRegistry {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Inserts a job. The caller guarantees a unique `download_id`.
    pub fn add(&mut self, job: DownloadJob) {
        self.jobs.push(job);
    }

    /// Applies an update to the job with the given id.
    ///
    /// Unknown ids are a silent no-op. Jobs in a terminal state are
    /// immutable: the whole update is dropped, with or without a status
    /// change, so a stale error string can never attach to a completed job.
    /// Status changes the transition table rejects are dropped the same way.
    /// Returns whether the update was applied.
    pub fn update(&mut self, download_id: &str, update: JobUpdate) -> bool {
        let Some(job) = self.jobs.iter_mut().find(|j| j.download_id == download_id) else {
            return false;
        };

        if job.status.is_terminal() {
            return false;
        }

        if let Some(status) = update.status {
            if !job.status.can_transition(status) {
                return false;
            }
            job.status = status;
        }
        if let Some(error) = update.error {
            job.error = Some(error);
        }
        if let Some(elapsed) = update.elapsed {
            job.elapsed = Some(elapsed);
        }
        true
    }

    pub fn list(&self) -> &[DownloadJob] {
        &self.jobs
    }

    pub fn get(&self, download_id: &str) -> Option<&DownloadJob> {
        self.jobs.iter().find(|j| j.download_id == download_id)
    }

    /// Whether any job for the given track is still running. Used by callers
    /// to disable a duplicate trigger; the registry itself does not
    /// deduplicate.
    pub fn is_active(&self, track_id: &str) -> bool {
        self.jobs
            .iter()
            .any(|j| j.track_id.as_deref() == Some(track_id) && j.status.is_active())
    }
}

impl Default for DownloadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
