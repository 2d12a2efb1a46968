use crate::markup::{Element, Node};
use crate::source::DataSource;

/// An in-memory render target standing in for a page container element.
///
/// Components only replace its children or its class; they never build
/// surrounding page structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
    class: Option<String>,
    children: Vec<Node>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Replace all content with a single node
    pub fn replace_with(&mut self, node: impl Into<Node>) {
        self.children.clear();
        self.children.push(node.into());
    }

    /// The container as an element, including its current content
    pub fn to_element(&self) -> Element {
        let mut el = Element::new("div").id(self.id.clone());
        if let Some(class) = &self.class {
            el = el.class(class.clone());
        }
        el.children = self.children.clone();
        el
    }

    /// Serialized content only, without the container element itself
    pub fn inner_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }

    /// Direct children carrying `class`
    pub fn children_with_class(&self, class: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|el| el.has_class(class))
            .collect()
    }
}

/// The pieces a component renders with: its container and its data source.
/// Built once at startup and owned by the component.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub container: Container,
    pub source: DataSource,
}

impl RenderContext {
    pub fn new(container_id: impl Into<String>, source: DataSource) -> Self {
        Self {
            container: Container::new(container_id),
            source,
        }
    }
}
