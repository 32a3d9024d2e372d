use assert_cmd::cargo::cargo_bin_cmd;

const BYT_ENV: [&str; 8] = [
    "BYT_API_BASE_URL",
    "BYT_API_TIMEOUT",
    "BYT_API_ACCEPT_INVALID_CERTS",
    "BYT_OPERATOR_NAME",
    "BYT_OPERATOR_ROLE",
    "BYT_CART_ITEMS",
    "BYT_LOG",
    "BYT_LOG_FILE",
];

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn help_lists_the_flags() {
    let mut cmd = cargo_bin_cmd!("byt-admin");
    let text = stdout_of(cmd.arg("--help"));
    for flag in [
        "--config",
        "--base-url",
        "--operator",
        "--role",
        "--logged-out",
        "--offline-demo",
        "--print-config",
    ] {
        assert!(text.contains(flag), "help missing {flag}");
    }
}

#[test]
fn print_config_applies_cli_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("byt-admin");
    for key in BYT_ENV {
        cmd.env_remove(key);
    }
    cmd.current_dir(dir.path())
        .args(["--print-config", "--base-url", "http://localhost:8080", "--role", "2"]);

    let text = stdout_of(&mut cmd);
    assert!(text.contains("base_url = \"http://localhost:8080/\""), "{text}");
    assert!(text.contains("role = 2"), "{text}");
    assert!(text.contains("timeout = \"30s\""), "{text}");
}

#[test]
fn print_config_reads_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.toml");
    std::fs::write(&path, "[operator]\nname = \"marta\"\n\n[cart]\nitems = 4\n").unwrap();

    let mut cmd = cargo_bin_cmd!("byt-admin");
    for key in BYT_ENV {
        cmd.env_remove(key);
    }
    cmd.current_dir(dir.path())
        .arg("--print-config")
        .arg("--config")
        .arg(&path);

    let text = stdout_of(&mut cmd);
    assert!(text.contains("name = \"marta\""), "{text}");
    assert!(text.contains("items = 4"), "{text}");
}

#[test]
fn bad_base_url_fails_with_the_key_named() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("byt-admin");
    for key in BYT_ENV {
        cmd.env_remove(key);
    }
    let output = cmd
        .current_dir(dir.path())
        .args(["--print-config", "--base-url", "ftp://example.com"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("failed to load configuration"), "{text}");
}
