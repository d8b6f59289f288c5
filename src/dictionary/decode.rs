/*!
 * Tolerant traversal of loosely-typed JSON payloads.
 *
 * Every access returns another `Node`, which may be absent. Absence
 * propagates through further accesses, so a chain such as
 * `node.get("hwi").get("prs").at(0).get("mw").as_str()` never fails and
 * simply yields `None` when any step is missing or has the wrong shape.
 */

use serde_json::Value;

/// Possibly-absent view into a JSON value
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    /// Object member by key
    pub fn get(self, key: &str) -> Self {
        Self(self.0.and_then(|v| v.get(key)))
    }

    /// Array element by index
    pub fn at(self, index: usize) -> Self {
        Self(self.0.and_then(|v| v.as_array()).and_then(|a| a.get(index)))
    }

    pub fn is_present(self) -> bool {
        self.0.is_some()
    }

    pub fn is_object(self) -> bool {
        self.0.is_some_and(Value::is_object)
    }

    pub fn value(self) -> Option<&'a Value> {
        self.0
    }

    /// String content, or `None` for anything that is not a string
    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    /// Non-blank string content
    pub fn text(self) -> Option<&'a str> {
        self.as_str().filter(|s| !s.trim().is_empty())
    }

    /// Array elements; empty for absent or non-array values
    pub fn items(self) -> impl Iterator<Item = Node<'a>> {
        self.0
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Node::new)
    }

    /// String elements of an array, skipping anything that is not a string
    pub fn strings(self) -> Vec<&'a str> {
        self.items().filter_map(Node::as_str).collect()
    }

    /// Interpret the node as a tagged pair `["tag", payload]`
    pub fn tagged(self) -> Option<(&'a str, Node<'a>)> {
        let tag = self.at(0).as_str()?;
        Some((tag, self.at(1)))
    }
}
