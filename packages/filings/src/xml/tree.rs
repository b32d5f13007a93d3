//! Tree representation and tolerant key-path lookups.

use std::collections::BTreeMap;

use serde::Serialize;

/// Ordered list of object keys to walk from a starting node.
pub type KeyPath = &'static [&'static str];

/// Key holding the text content of an element that also has attributes or
/// child elements.
pub const TEXT_KEY: &str = "_";

/// Attribute EDGAR uses to carry the value of empty identifier elements,
/// e.g. `<ticker value="AAPL"/>`.
const VALUE_KEY: &str = "value";

/// A node in the generic document tree.
///
/// Absence is expressed as `Option::None` by every lookup, never as a variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Object(BTreeMap<String, Node>),
    List(Vec<Node>),
}

impl Node {
    /// Get a direct child by key. Non-object nodes have no children.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Walk a key path. A missing key or a non-object intermediate yields `None`.
    ///
    /// # Examples
    /// ```
    /// use nport_filings::parse_document;
    ///
    /// let tree = parse_document("<a><b><c>1</c></b></a>").unwrap();
    /// assert_eq!(tree.lookup(&["a", "b", "c"]).and_then(|n| n.text()), Some("1"));
    /// assert!(tree.lookup(&["a", "x", "c"]).is_none());
    /// ```
    pub fn lookup(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// View this node as a sequence.
    ///
    /// A list yields its elements; any other node is a one-element sequence.
    /// This resolves the single-vs-repeated ambiguity of the source markup.
    pub fn items(&self) -> &[Node] {
        match self {
            Node::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Scalar text of this node, if it has one.
    ///
    /// Objects expose their element text or their `value` attribute; lists
    /// expose the text of their first item.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Object(map) => map
                .get(TEXT_KEY)
                .or_else(|| map.get(VALUE_KEY))
                .and_then(Node::text),
            Node::List(items) => items.first().and_then(Node::text),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// Empty text counts as blank, like an element with no content.
    fn is_blank(&self) -> bool {
        matches!(self, Node::Text(text) if text.is_empty())
    }
}

/// Resolve the first candidate path that points at a non-blank node.
pub fn first_node<'a>(node: &'a Node, candidates: &[KeyPath]) -> Option<&'a Node> {
    candidates
        .iter()
        .filter_map(|path| node.lookup(path))
        .find(|found| !found.is_blank())
}

/// Resolve the first candidate path that yields non-empty text.
///
/// Candidates are tried in order; empty values fall through to the next.
pub fn first_present<'a>(node: &'a Node, candidates: &[KeyPath]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|path| node.lookup(path))
        .filter_map(Node::text)
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn object(entries: &[(&str, Node)]) -> Node {
        Node::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_lookup_through_text_is_absent() {
        let node = object(&[("issuer", text("Apple"))]);
        assert!(node.lookup(&["issuer", "name"]).is_none());
    }

    #[test]
    fn test_lookup_through_list_is_absent() {
        let node = object(&[("issuer", Node::List(vec![text("a"), text("b")]))]);
        assert!(node.lookup(&["issuer", "name"]).is_none());
    }

    #[test]
    fn test_items_wraps_single_node() {
        let single = object(&[("name", text("A"))]);
        assert_eq!(single.items().len(), 1);

        let list = Node::List(vec![single.clone(), single]);
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn test_text_of_object_prefers_element_text() {
        let node = object(&[(TEXT_KEY, text("inner")), ("value", text("attr"))]);
        assert_eq!(node.text(), Some("inner"));

        let node = object(&[("value", text("AAPL"))]);
        assert_eq!(node.text(), Some("AAPL"));

        let node = object(&[("other", text("x"))]);
        assert_eq!(node.text(), None);
    }

    #[test]
    fn test_first_present_skips_empty_values() {
        let node = object(&[("name", text("")), ("Name", text("Second"))]);
        assert_eq!(first_present(&node, &[&["name"], &["Name"]]), Some("Second"));
    }

    #[test]
    fn test_first_present_respects_precedence() {
        let node = object(&[("name", text("First")), ("Name", text("Second"))]);
        assert_eq!(first_present(&node, &[&["name"], &["Name"]]), Some("First"));
        assert_eq!(first_present(&node, &[&["missing"]]), None);
    }

    #[test]
    fn test_first_node_skips_blank() {
        let node = object(&[("formData", text("")), ("formdata", object(&[]))]);
        let found = first_node(&node, &[&["formData"], &["formdata"]]);
        assert_eq!(found, Some(&object(&[])));
    }
}
