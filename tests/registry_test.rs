use spotwire::management::{DownloadJob, DownloadRegistry, JobStatus, JobUpdate};

// Helper to create a registry with one job and return its id
fn registry_with_track_job() -> (DownloadRegistry, String) {
    let mut registry = DownloadRegistry::new();
    let job = DownloadJob::track("track1", "Song One", "Artist A");
    let id = job.download_id.clone();
    registry.add(job);
    (registry, id)
}

#[test]
fn test_status_classification() {
    assert!(JobStatus::Started.is_active());
    assert!(JobStatus::InProgress.is_active());
    assert!(!JobStatus::Completed.is_active());

    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Canceled.is_terminal());
    assert!(!JobStatus::Started.is_terminal());
    assert!(!JobStatus::InProgress.is_terminal());
}

#[test]
fn test_status_transitions() {
    // Started may move anywhere except itself
    assert!(JobStatus::Started.can_transition(JobStatus::InProgress));
    assert!(JobStatus::Started.can_transition(JobStatus::Failed));
    assert!(JobStatus::Started.can_transition(JobStatus::Canceled));
    assert!(!JobStatus::Started.can_transition(JobStatus::Started));

    // InProgress may only finish
    assert!(JobStatus::InProgress.can_transition(JobStatus::Completed));
    assert!(JobStatus::InProgress.can_transition(JobStatus::Failed));
    assert!(JobStatus::InProgress.can_transition(JobStatus::Canceled));
    assert!(!JobStatus::InProgress.can_transition(JobStatus::Started));
    assert!(!JobStatus::InProgress.can_transition(JobStatus::InProgress));

    // Terminal states accept nothing
    for terminal in [JobStatus::Failed, JobStatus::Completed, JobStatus::Canceled] {
        assert!(!terminal.can_transition(JobStatus::Started));
        assert!(!terminal.can_transition(JobStatus::InProgress));
        assert!(!terminal.can_transition(JobStatus::Completed));
    }
}

#[test]
fn test_status_labels() {
    assert_eq!(JobStatus::Started.to_string(), "Started");
    assert_eq!(JobStatus::InProgress.to_string(), "In Progress");
    assert_eq!(JobStatus::Failed.to_string(), "Failed");
    assert_eq!(JobStatus::Completed.to_string(), "Completed");
    assert_eq!(JobStatus::Canceled.to_string(), "Canceled");
}

#[test]
fn test_track_job_construction() {
    let job = DownloadJob::track("track1", "Song One", "Artist A");

    assert!(job.download_id.starts_with("track1-"));
    assert_eq!(job.track_id.as_deref(), Some("track1"));
    assert_eq!(job.display_name, "Song One");
    assert_eq!(job.artist, "Artist A");
    assert_eq!(job.status, JobStatus::Started);
    assert!(!job.is_playlist);
    assert_eq!(job.elapsed, None);
    assert_eq!(job.error, None);
}

#[test]
fn test_playlist_job_construction() {
    let job = DownloadJob::playlist("pl1", "Road Trip");

    assert!(job.download_id.starts_with("playlist-pl1-"));
    assert_eq!(job.track_id, None);
    assert_eq!(job.display_name, "Playlist: Road Trip");
    assert!(job.is_playlist);
}

#[test]
fn test_registry_lists_in_insertion_order() {
    let mut registry = DownloadRegistry::new();
    registry.add(DownloadJob::track("t1", "One", "A"));
    registry.add(DownloadJob::track("t2", "Two", "B"));
    registry.add(DownloadJob::playlist("p1", "Mix"));

    let names: Vec<&str> = registry
        .list()
        .iter()
        .map(|j| j.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["One", "Two", "Playlist: Mix"]);
}

#[test]
fn test_registry_update_applies_fields() {
    let (mut registry, id) = registry_with_track_job();

    assert!(registry.update(&id, JobUpdate::status(JobStatus::InProgress)));
    assert_eq!(registry.get(&id).unwrap().status, JobStatus::InProgress);

    assert!(registry.update(&id, JobUpdate::failed("network down".to_string(), 12)));
    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("network down"));
    assert_eq!(job.elapsed, Some(12));
}

#[test]
fn test_registry_unknown_id_is_noop() {
    let (mut registry, id) = registry_with_track_job();

    assert!(!registry.update("no-such-id", JobUpdate::status(JobStatus::Failed)));

    // The existing job is untouched
    assert_eq!(registry.get(&id).unwrap().status, JobStatus::Started);
    assert_eq!(registry.list().len(), 1);
}

#[test]
fn test_registry_rejects_illegal_transition_entirely() {
    let (mut registry, id) = registry_with_track_job();

    registry.update(&id, JobUpdate::completed(30));
    assert_eq!(registry.get(&id).unwrap().status, JobStatus::Completed);

    // A late failure report must not touch the completed record at all
    assert!(!registry.update(&id, JobUpdate::failed("late stderr".to_string(), 99)));
    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.error, None);
    assert_eq!(job.elapsed, Some(30));
}

#[test]
fn test_registry_terminal_job_rejects_statusless_patch() {
    let (mut registry, id) = registry_with_track_job();
    registry.update(&id, JobUpdate::completed(30));

    // An error/elapsed patch without a status change must bounce off a
    // terminal record just like a status change would
    let patch = JobUpdate {
        status: None,
        error: Some("late stderr".to_string()),
        elapsed: Some(99),
    };
    assert!(!registry.update(&id, patch));

    let job = registry.get(&id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.error, None);
    assert_eq!(job.elapsed, Some(30));
}

#[test]
fn test_registry_active_tracking() {
    let (mut registry, id) = registry_with_track_job();

    assert!(registry.is_active("track1"));
    assert!(!registry.is_active("track2"));

    registry.update(&id, JobUpdate::status(JobStatus::InProgress));
    assert!(registry.is_active("track1"));

    registry.update(&id, JobUpdate::completed(5));
    assert!(!registry.is_active("track1"));
}

#[test]
fn test_registry_same_track_twice() {
    // The registry does not deduplicate; a finished job must not mask a
    // second, still running one
    let mut registry = DownloadRegistry::new();
    let first = DownloadJob::track("track1", "Song One", "Artist A");
    let first_id = first.download_id.clone();
    registry.add(first);
    registry.update(&first_id, JobUpdate::completed(4));

    registry.add(DownloadJob::track("track1", "Song One", "Artist A"));

    assert_eq!(registry.list().len(), 2);
    assert!(registry.is_active("track1"));
}
