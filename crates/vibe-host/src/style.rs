//! Computed style snapshot for a node

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolved style values for one node, as a browser would report them.
///
/// `display`, `position`, and `visibility` get dedicated fields because the
/// engine branches on them; everything else lives in the property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: String,
    pub position: String,
    pub visibility: String,
    pub properties: BTreeMap<String, String>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        // Browser initial values for an element node.
        Self {
            display: "block".to_string(),
            position: "static".to_string(),
            visibility: "visible".to_string(),
            properties: BTreeMap::new(),
        }
    }
}

impl ComputedStyle {
    pub fn with_display(display: &str) -> Self {
        Self {
            display: display.to_string(),
            ..Self::default()
        }
    }

    /// Set a property, routing the dedicated fields appropriately.
    pub fn set(&mut self, name: &str, value: &str) {
        match name {
            "display" => self.display = value.to_string(),
            "position" => self.position = value.to_string(),
            "visibility" => self.visibility = value.to_string(),
            _ => {
                self.properties.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Look up a property by name, dedicated fields included.
    pub fn property(&self, name: &str) -> Option<&str> {
        match name {
            "display" => Some(&self.display),
            "position" => Some(&self.position),
            "visibility" => Some(&self.visibility),
            _ => self.properties.get(name).map(String::as_str),
        }
    }

    /// Whether the node is rendered at all (`display: none` excludes the
    /// node and its subtree from layout).
    pub fn is_rendered(&self) -> bool {
        self.display != "none"
    }

    /// Whether the node is rendered and visible.
    pub fn is_visible(&self) -> bool {
        self.is_rendered() && self.visibility != "hidden"
    }
}
