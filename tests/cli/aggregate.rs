use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

fn write_module(test: &CliTest, module: &str, items: &str) -> Result<()> {
    test.write_file(
        &format!("{module}/configuration-metadata.json"),
        &format!("{{ \"items\": [{items}] }}"),
    )
}

const SERVER_ITEMS: &str = r#"
    { "itemType": "group", "name": "server", "type": "app.xml", "sourceType": "app.xml" },
    { "itemType": "property", "name": "server.port", "type": "String", "sourceType": "app.xml", "defaultValue": "8080" }
"#;

const CLIENT_ITEMS: &str = r#"
    { "itemType": "group", "name": "client", "type": "client.xml", "sourceType": "client.xml" },
    { "itemType": "property", "name": "client.timeout", "type": "String", "sourceType": "client.xml" }
"#;

fn read_output(test: &CliTest, path: &str) -> Result<Value> {
    Ok(serde_json::from_str(&test.read_file(path)?)?)
}

#[test]
fn test_aggregate_two_modules() -> Result<()> {
    let test = CliTest::new()?;
    write_module(&test, "module-b", CLIENT_ITEMS)?;
    write_module(&test, "module-a", SERVER_ITEMS)?;

    let output = test
        .aggregate_command()
        .args(["module-b", "module-a"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let model = read_output(&test, "project-properties.json")?;
    assert_eq!(model["kind"], "markdown");
    assert_eq!(model["renderTarget"], "project-properties.md");

    // Sections are sorted by name regardless of argument order.
    let sections = model["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["name"], "module-a");
    assert_eq!(sections[1]["name"], "module-b");
    assert_eq!(sections[0]["groups"][0]["groupName"], "server");
    assert_eq!(sections[0]["groups"][0]["properties"][0]["key"], "port");

    let aggregated = model["aggregatedProperties"].as_array().unwrap();
    let names: Vec<&str> = aggregated
        .iter()
        .filter_map(|p| p["fqName"].as_str())
        .collect();
    assert_eq!(names, vec!["client.timeout", "server.port"]);
    Ok(())
}

#[test]
fn test_aggregate_missing_input_fails_by_default() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.aggregate_command().arg("absent-module").output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_aggregate_allow_missing_input() -> Result<()> {
    let test = CliTest::new()?;
    write_module(&test, "module-a", SERVER_ITEMS)?;

    let output = test
        .aggregate_command()
        .args(["module-a", "absent-module", "--allow-missing-input"])
        .output()?;
    assert_eq!(output.status.code(), Some(1)); // the warning is reported

    let model = read_output(&test, "project-properties.json")?;
    let sections = model["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    let absent = sections
        .iter()
        .find(|s| s["name"] == "absent-module")
        .unwrap();
    assert!(absent["groups"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_aggregate_keep_duplicates() -> Result<()> {
    let test = CliTest::new()?;
    write_module(&test, "module-a", SERVER_ITEMS)?;
    write_module(&test, "module-b", SERVER_ITEMS)?;

    let output = test
        .aggregate_command()
        .args(["module-a", "module-b", "--keep-duplicates"])
        .output()?;
    assert!(output.status.success());

    let model = read_output(&test, "project-properties.json")?;
    assert_eq!(model["aggregatedProperties"].as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn test_aggregate_with_config_file() -> Result<()> {
    let test = CliTest::new()?;
    write_module(&test, "module-a", SERVER_ITEMS)?;
    write_module(&test, "module-b", CLIENT_ITEMS)?;
    test.write_file(
        "aggregation.json",
        r#"{
  "name": "Demo properties",
  "kind": "asciidoc",
  "output": "docs/props.json",
  "inputs": [
    { "path": "module-a", "name": "Server module" },
    { "path": "module-b", "excludedProperties": ["client.timeout"] }
  ]
}"#,
    )?;

    let output = test
        .aggregate_command()
        .args(["--config", "aggregation.json"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let model = read_output(&test, "docs/props.json")?;
    assert_eq!(model["name"], "Demo properties");
    assert_eq!(model["kind"], "asciidoc");
    assert_eq!(model["renderTarget"], "docs/props.adoc");

    let sections = model["sections"].as_array().unwrap();
    let server = sections
        .iter()
        .find(|s| s["name"] == "Server module")
        .expect("named section");
    assert!(!server["groups"].as_array().unwrap().is_empty());

    let names: Vec<&str> = model["aggregatedProperties"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["fqName"].as_str())
        .collect();
    assert_eq!(names, vec!["server.port"]);
    Ok(())
}

#[test]
fn test_aggregate_corrupt_input_becomes_empty_section() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("module-a/configuration-metadata.json", "{ not json")?;

    let output = test.aggregate_command().arg("module-a").output()?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"), "stderr: {stderr}");

    let model = read_output(&test, "project-properties.json")?;
    assert!(model["sections"][0]["groups"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_generate_then_aggregate_end_to_end() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "module-a/conf/app.xml",
        &crate::spring_xml(r#"<bean class="A"><property name="p" value="${server.port:8080}"/></bean>"#),
    )?;
    test.write_file(
        "module-b/conf/client.xml",
        &crate::spring_xml(r#"<a value="${server.timeout}"/>"#),
    )?;

    for module in ["module-a", "module-b"] {
        let output = test
            .generate_command()
            .args(["--project-dir", module])
            .output()?;
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    test.write_file(
        "aggregation.json",
        r#"{
  "inputs": [
    { "path": "module-a/META-INF", "name": "module-a" },
    { "path": "module-b/META-INF", "name": "module-b" }
  ]
}"#,
    )?;
    let output = test
        .aggregate_command()
        .args(["--config", "aggregation.json"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let model = read_output(&test, "project-properties.json")?;
    let names: Vec<&str> = model["aggregatedProperties"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["fqName"].as_str())
        .collect();
    assert_eq!(names, vec!["server.port", "server.timeout"]);

    // Grouping stays scoped to each module's own source.
    let section_a = &model["sections"][0];
    assert_eq!(section_a["name"], "module-a");
    assert_eq!(section_a["groups"][0]["groupName"], "server.port");
    assert_eq!(section_a["groups"][0]["type"], "app.xml");
    Ok(())
}

#[test]
fn test_aggregate_without_inputs_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.aggregate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
