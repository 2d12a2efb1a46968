//! A small typed element tree.
//!
//! Components build [`Element`] values from data; serialization to HTML is a
//! separate step, so rendering logic can be inspected without a document.
//! All text and attribute values are escaped when serialized.

use crate::format::escape_html;
use serde::Serialize;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(el) => el.text_content(),
            Node::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// This element and all descendant elements matching `pred`, in document order
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if pred(self) {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                el.collect(pred, found);
            }
        }
    }

    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        self.find_all(&|el: &Element| el.has_class(class))
    }

    pub fn find_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        self.find_all(&|el: &Element| el.tag == tag)
    }

    pub fn find_by_id<'a>(&'a self, id: &str) -> Option<&'a Element> {
        self.find_all(&|el: &Element| el.get_attr("id") == Some(id))
            .into_iter()
            .next()
    }

    /// Detach the first descendant with the given id
    pub fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        let position = self
            .children
            .iter()
            .position(|c| matches!(c, Node::Element(el) if el.get_attr("id") == Some(id)));
        if let Some(position) = position {
            return match self.children.remove(position) {
                Node::Element(el) => Some(el),
                Node::Text(_) => None,
            };
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(el) => el.remove_by_id(id),
            Node::Text(_) => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_escaping() {
        let el = Element::new("p")
            .class("note")
            .attr("title", "a \"quoted\" value")
            .text("<script>alert(1)</script>");
        insta::assert_snapshot!(el.to_html(), @r#"<p class="note" title="a &quot;quoted&quot; value">&lt;script&gt;alert(1)&lt;/script&gt;</p>"#);
    }

    #[test]
    fn test_void_elements() {
        let el = Element::new("div").child(Element::new("img").attr("src", "a.png"));
        assert_eq!(el.to_html(), r#"<div><img src="a.png"></div>"#);
    }

    #[test]
    fn test_set_attr_replaces() {
        let el = Element::new("div").class("grid-view").class("list-view");
        assert_eq!(el.attrs.len(), 1);
        assert!(el.has_class("list-view"));
        assert!(!el.has_class("grid-view"));
    }

    #[test]
    fn test_queries() {
        let tree = Element::new("section")
            .class("card featured")
            .child(Element::new("h3").id("title").text("Name"))
            .child(Element::new("p").class("card-body").text("Body"));

        assert_eq!(tree.find_by_class("card").len(), 1);
        assert_eq!(tree.find_by_tag("p").len(), 1);
        assert_eq!(tree.find_by_id("title").map(|e| e.text_content()), Some("Name".to_string()));
        assert_eq!(tree.text_content(), "NameBody");
    }

    #[test]
    fn test_remove_by_id() {
        let mut tree = Element::new("div").child(
            Element::new("div")
                .class("error-message")
                .child(Element::new("h3").text("Oops"))
                .child(Element::new("button").id("again").text("Retry")),
        );

        let removed = tree.remove_by_id("again");
        assert_eq!(removed.map(|el| el.tag), Some("button".to_string()));
        assert!(tree.find_by_id("again").is_none());
        assert_eq!(tree.text_content(), "Oops");
        assert!(tree.remove_by_id("again").is_none());
    }
}
