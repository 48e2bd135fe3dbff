use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_session_env() {
    unsafe {
        std::env::remove_var("SIGNBRIDGE_STORAGE_KEY");
        std::env::remove_var("SIGNBRIDGE_STORAGE_PATH");
        std::env::remove_var("SIGNBRIDGE_LATENCY_MS");
        std::env::remove_var("SIGNBRIDGE_AVATAR_BASE_URL");
        std::env::remove_var("SIGNBRIDGE_DEFAULT_NAME");
    }
}

#[test]
fn default_values() {
    let cfg = SessionConfig::default();
    assert_eq!(cfg.storage_key, "user");
    assert_eq!(cfg.latency, Duration::from_millis(1000));
    assert_eq!(cfg.avatar_base_url, DEFAULT_AVATAR_BASE_URL);
    assert_eq!(cfg.default_name, "John Doe");
    assert!(cfg.storage_path.ends_with("signbridge/local_storage.json"));
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_session_env() };
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg, SessionConfig::default());

    unsafe {
        std::env::set_var("SIGNBRIDGE_STORAGE_KEY", "session");
        std::env::set_var("SIGNBRIDGE_STORAGE_PATH", "/tmp/sb/store.json");
        std::env::set_var("SIGNBRIDGE_LATENCY_MS", "25");
        std::env::set_var("SIGNBRIDGE_AVATAR_BASE_URL", "https://avatars.test/svg/");
        std::env::set_var("SIGNBRIDGE_DEFAULT_NAME", "Guest User");
    }
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.storage_key, "session");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/sb/store.json"));
    assert_eq!(cfg.latency, Duration::from_millis(25));
    assert_eq!(cfg.avatar_base_url, "https://avatars.test/svg");
    assert_eq!(cfg.default_name, "Guest User");

    unsafe {
        std::env::set_var("SIGNBRIDGE_LATENCY_MS", "soon");
    }
    let err = SessionConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("SIGNBRIDGE_LATENCY_MS"));
    assert!(err.contains("soon"));

    unsafe {
        clear_session_env();
        std::env::set_var("SIGNBRIDGE_STORAGE_KEY", "   ");
    }
    let cfg = SessionConfig::from_env().unwrap();
    assert_eq!(cfg.storage_key, "user");

    unsafe { clear_session_env() };
}
