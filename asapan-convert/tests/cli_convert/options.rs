use super::*;

#[test]
fn no_tags_drops_description_and_tag() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("palo.txt");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--no-tags")
        .assert()
        .success();

    let text = fs::read_to_string(&output).expect("output");
    assert!(!text.contains(" description "));
    assert!(!text.contains(" tag "));
    for block in text.trim_end().split("\n\n").skip(1) {
        assert_eq!(block.lines().count(), 10);
    }
}

#[test]
fn custom_tag_name_applies_to_every_rule() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("palo.txt");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--tag-name")
        .arg("custom")
        .assert()
        .success();

    let text = fs::read_to_string(&output).expect("output");
    assert_eq!(text.matches(" tag custom\n").count(), 3);
    assert!(!text.contains("from-asa"));
}

#[test]
fn config_file_is_applied_and_flags_override_it() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let settings = dir.path().join("asapan.toml");
    fs::write(&settings, "include_tags = false\ntag_name = \"from-file\"\n")
        .expect("settings write");

    let output = dir.path().join("from-file.txt");
    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--config")
        .arg(path_as_str(&settings))
        .assert()
        .success();
    let text = fs::read_to_string(&output).expect("output");
    assert!(!text.contains(" tag "));

    let settings_tagged = dir.path().join("tagged.toml");
    fs::write(&settings_tagged, "tag_name = \"from-file\"\n").expect("settings write");
    let output = dir.path().join("override.txt");
    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--config")
        .arg(path_as_str(&settings_tagged))
        .arg("--tag-name")
        .arg("from-flag")
        .assert()
        .success();
    let text = fs::read_to_string(&output).expect("output");
    assert!(text.contains(" tag from-flag\n"));
    assert!(!text.contains("from-file"));
}

#[test]
fn invalid_config_file_fails() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let settings = dir.path().join("bad.toml");
    fs::write(&settings, "format = \"yaml\"\n").expect("settings write");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&dir.path().join("out.txt")))
        .arg("--config")
        .arg(path_as_str(&settings))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn json_summary_is_machine_readable() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("palo.txt");

    let assert = converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--summary")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let json_start = stdout.find('{').expect("json object");
    let summary: serde_json::Value =
        serde_json::from_str(&stdout[json_start..]).expect("valid json");
    assert_eq!(summary["objects"], 2);
    assert_eq!(summary["groups"], 1);
    assert_eq!(summary["group_members"], 2);
    assert_eq!(summary["rules"], 3);
    assert_eq!(summary["skipped_lines"], serde_json::json!([]));
}

#[test]
fn json_summary_lists_skipped_lines() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, "access-list a permit tcp\naccess-list a permit ip any any\n");
    let output = dir.path().join("palo.txt");

    let assert = converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--on-malformed")
        .arg("skip")
        .arg("--summary")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let json_start = stdout.find('{').expect("json object");
    let summary: serde_json::Value =
        serde_json::from_str(&stdout[json_start..]).expect("valid json");
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["skipped_lines"][0]["index"], 1);
    assert_eq!(summary["skipped_lines"][0]["line"], "access-list a permit tcp");
}
