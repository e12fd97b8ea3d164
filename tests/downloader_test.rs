use std::path::Path;

use spotwire::downloader::{
    classify_python_version, executable_path, parse_python_version, stderr_signals_broken_env,
};

#[test]
fn test_executable_path_layout() {
    let venv = Path::new("/data/spotwire/venv");
    let path = executable_path(venv, "spotdl");

    #[cfg(windows)]
    assert_eq!(path, venv.join("Scripts").join("spotdl.exe"));

    #[cfg(not(windows))]
    assert_eq!(path, venv.join("bin").join("spotdl"));
}

#[test]
fn test_stderr_broken_env_detection() {
    // Python import failures point at a broken venv
    assert!(stderr_signals_broken_env(
        "Traceback (most recent call last):\nModuleNotFoundError: No module named 'spotdl'"
    ));
    assert!(stderr_signals_broken_env(
        "ImportError: cannot import name 'Downloader'"
    ));

    // Ordinary failures do not suggest a rebuild
    assert!(!stderr_signals_broken_env(""));
    assert!(!stderr_signals_broken_env("LookupError: No results found for song"));
    assert!(!stderr_signals_broken_env("urllib3 connection timed out"));
}

#[test]
fn test_parse_python_version() {
    assert_eq!(parse_python_version("Python 3.11.4"), Some((3, 11)));
    assert_eq!(parse_python_version("Python 3.9.0\n"), Some((3, 9)));
    assert_eq!(parse_python_version("  Python 3.12.1"), Some((3, 12)));

    // Missing prefix or garbage
    assert_eq!(parse_python_version("3.11.4"), None);
    assert_eq!(parse_python_version("Python three.eleven"), None);
    assert_eq!(parse_python_version(""), None);
}

#[test]
fn test_classify_python_version() {
    // Supported range
    for minor in 9..=11 {
        let check = classify_python_version(3, minor);
        assert!(check.compatible, "3.{} should be compatible", minor);
        assert!(check.message.is_none());
    }

    // Too new: incompatible with an explanation
    let check = classify_python_version(3, 12);
    assert!(!check.compatible);
    assert!(check.message.is_some());
    assert_eq!(check.version, "3.12");

    let check = classify_python_version(3, 13);
    assert!(!check.compatible);

    // Too old
    let check = classify_python_version(3, 8);
    assert!(!check.compatible);
    assert!(check.message.unwrap().contains("too old"));

    let check = classify_python_version(2, 7);
    assert!(!check.compatible);
}
