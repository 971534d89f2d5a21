//! Integration tests for Airlock

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn airlock(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("airlock");
        cmd.arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--state-dir")
            .arg(temp.path().join("state"));
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("airlock")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Offline-First Request Router"));
    }

    #[test]
    fn version_flag_displays() {
        cargo_bin_cmd!("airlock")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("airlock"));
    }

    #[test]
    fn version_command_reports_generation() {
        let temp = TempDir::new().unwrap();
        airlock(&temp)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"version":"airlock-v3"}"#));
    }

    #[test]
    fn version_command_uses_configured_app_label() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[cache]\napp = \"metal-selector-pro\"\n",
        )
        .unwrap();

        airlock(&temp)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"version":"metal-selector-pro-v3"}"#,
            ));
    }

    #[test]
    fn init_writes_and_refuses_overwrite() {
        let temp = TempDir::new().unwrap();

        airlock(&temp)
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Wrote default config"));

        assert!(temp.path().join("config.toml").exists());

        airlock(&temp)
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        airlock(&temp).args(["init", "--force"]).assert().success();
    }

    #[test]
    fn status_empty_state() {
        let temp = TempDir::new().unwrap();
        airlock(&temp)
            .arg("status")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("airlock-v3")
                    .and(predicate::str::contains("No partitions")),
            );
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        airlock(&temp)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache partitions found"));
    }

    #[test]
    fn cache_clear_empty() {
        let temp = TempDir::new().unwrap();
        airlock(&temp)
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to clear"));
    }

    #[test]
    fn activate_sweeps_seeded_stale_partition() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("state/partitions/static-v1")).unwrap();
        std::fs::create_dir_all(temp.path().join("state/partitions/static-v3")).unwrap();

        airlock(&temp)
            .arg("activate")
            .assert()
            .success()
            .stdout(predicate::str::contains("deleted stale partition static-v1"));

        assert!(!temp.path().join("state/partitions/static-v1").exists());
        assert!(temp.path().join("state/partitions/static-v3").exists());
    }

    #[test]
    fn fetch_rejects_invalid_url() {
        let temp = TempDir::new().unwrap();
        airlock(&temp)
            .args(["fetch", "not a url"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid URL"));
    }

    #[test]
    fn fetch_unreachable_without_cache_fails() {
        let temp = TempDir::new().unwrap();
        // Nothing listens on the discard port; connection is refused fast.
        airlock(&temp)
            .args(["fetch", "http://127.0.0.1:9/api/foo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Network request failed"));
    }
}
