use super::*;

#[test]
fn xml_flag_writes_panorama_document() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("panorama.xml");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--xml")
        .arg("--dg")
        .arg("Branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("Panorama XML written to:"));

    let bytes = fs::read(&output).expect("output");
    assert!(bytes.starts_with(b"<?xml"));
    let doc = parse(&bytes).expect("xml parse");
    assert_eq!(doc.tag, "config");

    let device = doc
        .get_child("devices")
        .and_then(|d| d.get_named("entry", "localhost.localdomain"))
        .expect("device entry");
    let address = device
        .get_child("shared")
        .and_then(|s| s.get_child("address"))
        .expect("shared address");
    assert_eq!(address.get_children("entry").len(), 4);

    let rules = device
        .get_child("device-group")
        .and_then(|dg| dg.get_named("entry", "Branches"))
        .and_then(|dg| dg.get_child("pre-rulebase"))
        .and_then(|p| p.get_child("security"))
        .and_then(|s| s.get_child("rules"))
        .expect("rules");
    let names: Vec<&str> = rules
        .get_children("entry")
        .iter()
        .filter_map(|e| e.attributes.get("name").map(String::as_str))
        .collect();
    assert_eq!(names, vec!["test_1", "INSIDE_TO_OUTSIDE_2", "acl1_3"]);

    let second = rules
        .get_named("entry", "INSIDE_TO_OUTSIDE_2")
        .expect("second rule");
    assert_eq!(
        second
            .get_child("source")
            .expect("source")
            .child_texts("member"),
        vec!["192.168.10.0/24"]
    );
    assert_eq!(
        second
            .get_child("destination")
            .expect("destination")
            .child_texts("member"),
        vec!["DNS_SERVERS_1", "DNS_SERVERS_2"]
    );
    assert_eq!(second.get_text(&["service", "member"]), Some("udp-53"));
    assert_eq!(second.get_text(&["tag", "member"]), Some("from-asa"));
}

#[test]
fn xml_without_tags_has_no_description_or_tag() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);
    let output = dir.path().join("panorama.xml");

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--format")
        .arg("xml")
        .arg("--no-tags")
        .assert()
        .success();

    let text = fs::read_to_string(&output).expect("output");
    assert!(text.contains("<entry name=\"MyDeviceGroup\">"));
    assert!(!text.contains("<description>"));
    assert!(!text.contains("<tag>"));
}

#[test]
fn format_and_xml_flags_conflict() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(&dir, ASA_CONFIG);

    converter()
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&dir.path().join("out.xml")))
        .arg("--format")
        .arg("set")
        .arg("--xml")
        .assert()
        .failure();
}
