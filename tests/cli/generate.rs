use anyhow::Result;
use serde_json::Value;

use crate::{spring_xml, CliTest};

fn metadata_items(test: &CliTest) -> Result<Vec<Value>> {
    let content = test.read_file("META-INF/configuration-metadata.json")?;
    let parsed: Value = serde_json::from_str(&content)?;
    Ok(parsed["items"].as_array().cloned().unwrap_or_default())
}

#[test]
fn test_generate_writes_metadata() -> Result<()> {
    let test = CliTest::with_file(
        "conf/app.xml",
        &spring_xml(r#"<bean class="A"><property name="p" value="${server.port:8080}"/></bean>"#),
    )?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let items = metadata_items(&test)?;
    let property = items
        .iter()
        .find(|i| i["itemType"] == "property")
        .expect("a property item");
    assert_eq!(property["name"], "server.port");
    assert_eq!(property["type"], "String");
    assert_eq!(property["sourceType"], "app.xml");
    assert_eq!(property["defaultValue"], "8080");
    Ok(())
}

#[test]
fn test_generate_derives_prefix_group() -> Result<()> {
    let test = CliTest::with_file(
        "conf/app.xml",
        &spring_xml(r#"<a value="${server.http.port}"/><b value="${server.http.host}"/>"#),
    )?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());

    let items = metadata_items(&test)?;
    let group = items
        .iter()
        .find(|i| i["itemType"] == "group")
        .expect("a group item");
    assert_eq!(group["name"], "server.http");
    assert_eq!(group["type"], "app.xml");
    Ok(())
}

#[test]
fn test_generate_without_sources_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());
    assert!(!test
        .root()
        .join("META-INF/configuration-metadata.json")
        .exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing to write"), "stdout: {stdout}");
    Ok(())
}

#[test]
fn test_generate_malformed_file_warns_but_succeeds_partially() -> Result<()> {
    let test = CliTest::with_file(
        "conf/good.xml",
        &spring_xml(r#"<a value="${ok.value}"/>"#),
    )?;
    test.write_file(
        "conf/broken.xml",
        "<beans xmlns=\"http://www.springframework.org/schema/beans\"><a></beans>",
    )?;

    let output = test.generate_command().output()?;
    // Warnings surface through the exit code.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"), "stderr: {stderr}");

    let items = metadata_items(&test)?;
    assert!(items.iter().any(|i| i["name"] == "ok.value"));
    Ok(())
}

#[test]
fn test_generate_merges_previous_non_regenerated_items() -> Result<()> {
    let test = CliTest::with_file(
        "conf/app.xml",
        &spring_xml(r#"<a value="${fresh.value}"/>"#),
    )?;
    test.write_file(
        "META-INF/configuration-metadata.json",
        r#"{
  "items": [
    { "itemType": "property", "name": "stale.value", "type": "String", "sourceType": "old.xml" },
    { "itemType": "property", "name": "kept.value", "type": "String", "sourceType": "com.example.Config" }
  ]
}"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());

    let items = metadata_items(&test)?;
    let names: Vec<&str> = items
        .iter()
        .filter(|i| i["itemType"] == "property")
        .filter_map(|i| i["name"].as_str())
        .collect();
    assert!(names.contains(&"fresh.value"));
    assert!(names.contains(&"kept.value"));
    // XML-derived items are rebuilt from source, never carried forward.
    assert!(!names.contains(&"stale.value"));
    Ok(())
}

#[test]
fn test_generate_respects_config_ignores() -> Result<()> {
    let test = CliTest::with_file(
        "conf/app.xml",
        &spring_xml(r#"<a value="${keep.me}"/>"#),
    )?;
    test.write_file(
        "target/generated.xml",
        &spring_xml(r#"<a value="${skip.me}"/>"#),
    )?;
    test.write_file(".propdocrc.json", r#"{ "ignores": ["**/target/**"] }"#)?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());

    let items = metadata_items(&test)?;
    assert!(items.iter().any(|i| i["name"] == "keep.me"));
    assert!(!items.iter().any(|i| i["name"] == "skip.me"));
    Ok(())
}

#[test]
fn test_generate_blank_group_strategy() -> Result<()> {
    let test = CliTest::with_file(
        "conf/app.xml",
        &spring_xml(r#"<a value="${server.port}"/>"#),
    )?;

    let output = test
        .generate_command()
        .args(["--groups", "blank"])
        .output()?;
    assert!(output.status.success());

    let items = metadata_items(&test)?;
    let group = items.iter().find(|i| i["itemType"] == "group").unwrap();
    assert_eq!(group["name"], "");
    assert_eq!(group["type"], "app.xml");
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("aggregate"));
    Ok(())
}
