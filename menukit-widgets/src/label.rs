// SPDX-License-Identifier: MIT OR Apache-2.0

/// A node of a menu item's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelNode {
    /// Plain text.
    Text(String),
    /// A nested element.
    Element {
        /// Tag name.
        tag: String,
        /// Class names.
        classes: Vec<String>,
        /// Child nodes.
        children: Vec<LabelNode>,
    },
}

impl LabelNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        LabelNode::Text(text.into())
    }

    /// Create an element node.
    pub fn element(tag: impl Into<String>, children: Vec<LabelNode>) -> Self {
        LabelNode::Element {
            tag: tag.into(),
            classes: Vec::new(),
            children,
        }
    }

    /// Add a class to an element node. Text nodes are returned unchanged.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let LabelNode::Element { classes, .. } = &mut self {
            classes.push(class.into());
        }
        self
    }

    fn is_icon(&self, markers: &[String]) -> bool {
        match self {
            LabelNode::Text(_) => false,
            LabelNode::Element { tag, classes, .. } => markers
                .iter()
                .any(|marker| marker == tag || classes.contains(marker)),
        }
    }

    fn collect_text(&self, markers: &[String], out: &mut String) {
        match self {
            LabelNode::Text(text) => {
                out.push_str(text);
            }
            LabelNode::Element { children, .. } => {
                if self.is_icon(markers) {
                    return;
                }
                for child in children {
                    child.collect_text(markers, out);
                }
            }
        }
    }
}

impl From<&str> for LabelNode {
    fn from(text: &str) -> Self {
        LabelNode::text(text)
    }
}

impl From<String> for LabelNode {
    fn from(text: String) -> Self {
        LabelNode::Text(text)
    }
}

/// Visible text of `content`, without icon subtrees and with whitespace collapsed.
pub fn extract_label(content: &[LabelNode], icon_markers: &[String]) -> String {
    let mut raw = String::new();
    for node in content {
        node.collect_text(icon_markers, &mut raw);
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
