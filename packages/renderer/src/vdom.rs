use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attribute and style maps are ordered so identical input always serializes
/// to identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Stable key for list items
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Visible error marker (shows problems inline instead of dropping content)
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>, block_id: Option<String>) -> Self {
        VNode::Error {
            message: message.into(),
            block_id,
        }
    }

    /// `<tag class="...">`
    pub fn with_tag_class(tag: impl Into<String>, class: impl Into<String>) -> Self {
        VNode::element(tag).with_attr("class", class)
    }

    /// `<tag class="...">text</tag>`
    pub fn text_element(
        tag: impl Into<String>,
        class: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        VNode::with_tag_class(tag, class).with_child(VNode::text(content))
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append a class to the `class` attribute
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let class = class.into();
            let merged = match attributes.get("class") {
                Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
                _ => class,
            };
            attributes.insert("class".to_string(), merged);
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, new_styles: BTreeMap<String, String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(new_styles);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append a child only when it is present
    pub fn with_optional_child(self, child: Option<VNode>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|part| part == class))
            .unwrap_or(false)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }

    /// All text content in document order, joined by single spaces
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            VNode::Text { content } => {
                if !content.is_empty() {
                    out.push(content);
                }
            }
            VNode::Error { message, .. } => out.push(message),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for every node matching `predicate`
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&VNode) -> bool) -> Vec<&'a VNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if predicate(node) {
                found.push(node);
            }
        });
        found
    }

    /// Visit this node and all descendants, parents first
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a VNode)) {
        visit(self);
        if let VNode::Element { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_queries() {
        let node = VNode::with_tag_class("section", "se2-block")
            .with_class("se2-block--hero")
            .with_attr("data-block-id", "b1")
            .with_style("padding", "24px")
            .with_child(VNode::text_element("h1", "title", "민수"))
            .with_child(VNode::text("수진"));

        assert!(node.has_class("se2-block"));
        assert!(node.has_class("se2-block--hero"));
        assert_eq!(node.attr("data-block-id"), Some("b1"));
        assert_eq!(node.style("padding"), Some("24px"));
        assert_eq!(node.text_content(), "민수 수진");
        assert_eq!(node.find_all(&|n| matches!(n, VNode::Text { .. })).len(), 2);
    }

    #[test]
    fn test_builders_ignore_non_elements() {
        let node = VNode::text("plain").with_attr("class", "x").with_child(VNode::text("y"));
        assert_eq!(node, VNode::text("plain"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(VNode::error("boom", Some("b1".into()))).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["blockId"], serde_json::Value::Null);
        assert_eq!(json["block_id"], "b1");
    }
}
