use super::*;

#[test]
fn converts_to_set_commands_by_default() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("palo.txt");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stdout(predicate::str::contains("Palo Alto config written to:"))
        .stdout(predicate::str::contains("rules=3 skipped=0"));

    let text = fs::read_to_string(&output).expect("output");
    assert!(text.starts_with("set address \"WEBSRV\" ip-netmask 10.0.0.5\n"));
    assert!(text.contains("set address \"LAN\" ip-netmask 192.168.10.0/24\n"));
    assert!(text.contains("set address \"DNS_SERVERS_2\" ip-netmask 1.1.1.1\n"));
    assert!(text.contains(
        "set address-group DNS_SERVERS static [ \"DNS_SERVERS_1\" \"DNS_SERVERS_2\" ]\n"
    ));
    assert!(text.contains("set rulebase security rules test_1 source 10.0.0.5\n"));
    assert!(text.contains("set rulebase security rules test_1 service tcp-443\n"));
    assert!(text.contains(
        "set rulebase security rules INSIDE_TO_OUTSIDE_2 destination [ DNS_SERVERS_1 DNS_SERVERS_2 ]\n"
    ));
    assert!(text.contains("set rulebase security rules INSIDE_TO_OUTSIDE_2 from INSIDE\n"));
    assert!(text.contains("set rulebase security rules acl1_3 source 192.168.1.0/24\n"));
    assert!(text.contains("set rulebase security rules acl1_3 action deny\n"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");

    for out in [&first, &second] {
        converter()
            .arg(path_as_str(&input))
            .arg("-o")
            .arg(path_as_str(out))
            .assert()
            .success();
    }

    assert_eq!(
        fs::read(&first).expect("first"),
        fs::read(&second).expect("second")
    );
}

#[test]
fn malformed_rule_aborts_without_output_by_default() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, "access-list a permit ip any any\naccess-list a permit tcp\n");
    let output = dir.path().join("palo.txt");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed access-list rule #2 at line 2"));

    assert!(!output.exists());
}

#[test]
fn malformed_rule_is_skipped_when_requested() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(
        &dir,
        "access-list a permit tcp\naccess-list a permit ip any any\n",
    );
    let output = dir.path().join("palo.txt");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--on-malformed")
        .arg("skip")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped access-list rule #1 at line 1"));

    let text = fs::read_to_string(&output).expect("output");
    assert!(text.contains("set rulebase security rules a_2 action allow"));
    assert!(!text.contains("rules a_1 "));
}

#[test]
fn refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite source file"));

    assert_eq!(fs::read_to_string(&input).expect("input"), ASA_CONFIG);
}

#[test]
fn missing_input_reports_path() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.cfg");

    converter()
        .arg(path_as_str(&missing))
        .arg("--output")
        .arg(path_as_str(&dir.path().join("out.txt")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
