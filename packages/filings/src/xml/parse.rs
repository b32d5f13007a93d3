//! Conversion of filing markup into a generic [`Node`] tree.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::tree::{Node, TEXT_KEY};
use crate::error::Result;

/// Parse filing markup into a generic tree.
///
/// The returned node is an object keyed by the root element's tag. While
/// converting:
/// - tag names lose their namespace prefix and are lower-cased;
/// - attributes keep their case and sit next to child elements;
/// - repeated keys become a [`Node::List`] in document order, but a single
///   occurrence stays unwrapped;
/// - an element without attributes or children becomes [`Node::Text`].
///
/// # Examples
/// ```
/// use nport_filings::parse_document;
///
/// let tree = parse_document(r#"<nport:Root xmlns:nport="urn:x" id="7"><Item>a</Item></nport:Root>"#).unwrap();
/// assert_eq!(tree.lookup(&["root", "id"]).and_then(|n| n.text()), Some("7"));
/// assert_eq!(tree.lookup(&["root", "item"]).and_then(|n| n.text()), Some("a"));
/// ```
pub fn parse_document(xml: &str) -> Result<Node> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)?;
    let root = doc.root_element();

    let mut map = BTreeMap::new();
    map.insert(normalized_tag(root), convert_element(root));
    Ok(Node::Object(map))
}

/// Tag name without namespace prefix, lower-cased.
fn normalized_tag(node: roxmltree::Node<'_, '_>) -> String {
    node.tag_name().name().to_lowercase()
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Node {
    let mut map = BTreeMap::new();

    for attr in node.attributes() {
        insert_merged(
            &mut map,
            attr.name().to_string(),
            Node::Text(attr.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            insert_merged(&mut map, normalized_tag(child), convert_element(child));
        } else if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return Node::Text(text.to_string());
    }
    if !text.is_empty() {
        insert_merged(&mut map, TEXT_KEY.to_string(), Node::Text(text.to_string()));
    }
    Node::Object(map)
}

/// Insert a value, turning a repeated key into a list.
fn insert_merged(map: &mut BTreeMap<String, Node>, key: String, value: Node) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            if let Node::List(items) = existing {
                items.push(value);
            } else {
                let first = std::mem::replace(existing, Node::List(Vec::new()));
                *existing = Node::List(vec![first, value]);
            }
        }
    }
}
