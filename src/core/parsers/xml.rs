//! Tolerant XML parsing for configuration sources.
//!
//! Produces a plain element tree carrying names, attributes, text content
//! and the comment immediately preceding each element. Namespace prefixes
//! are kept as-is; the scanner only cares about raw names and values.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub comment: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Local part of the element name, with any namespace prefix stripped.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }
}

/// Parses an XML file and returns its document element.
pub fn parse_xml_file(path: &Path) -> Result<XmlNode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_xml_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses an XML string and returns its document element.
pub fn parse_xml_str(content: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    // Index 0 is a synthetic root holding the document element.
    let mut stack: Vec<XmlNode> = vec![XmlNode::default()];
    let mut pending_comment: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut node = element_from_start(&start)?;
                node.comment = pending_comment.take();
                stack.push(node);
            }
            Event::Empty(start) => {
                let mut node = element_from_start(&start)?;
                node.comment = pending_comment.take();
                attach_to_parent(&mut stack, node);
            }
            Event::End(_) => {
                let node = stack.pop().unwrap_or_default();
                attach_to_parent(&mut stack, node);
            }
            Event::Text(text) => {
                let value = text.unescape()?.into_owned();
                if let Some(top) = stack.last_mut() {
                    append_text(top, &value);
                }
            }
            Event::CData(cdata) => {
                let value = String::from_utf8_lossy(&cdata).into_owned();
                if let Some(top) = stack.last_mut() {
                    append_text(top, &value);
                }
            }
            Event::Comment(comment) => {
                pending_comment = Some(String::from_utf8_lossy(&comment).into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let mut root = stack.swap_remove(0);
    root.children
        .drain(..)
        .next()
        .context("document has no root element")
}

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<XmlNode> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(XmlNode {
        name,
        attributes,
        ..XmlNode::default()
    })
}

fn attach_to_parent(stack: &mut [XmlNode], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn append_text(node: &mut XmlNode, value: &str) {
    match &mut node.text {
        Some(existing) => existing.push_str(value),
        None => node.text = Some(value.to_string()),
    }
}

/// Reads up to `scan_lines` lines from the head of `path` and reports
/// whether any of the `markers` occurs in them. I/O errors count as no
/// match; the caller decides whether to surface them.
pub fn has_marker(path: &Path, markers: &[String], scan_lines: usize) -> bool {
    let Ok(file) = fs::File::open(path) else {
        return false;
    };
    BufReader::new(file)
        .lines()
        .take(scan_lines)
        .map_while(|line| line.ok())
        .any(|line| markers.iter().any(|marker| line.contains(marker)))
}
