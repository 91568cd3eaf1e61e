//! Intermediate element tree for a single descriptor record
//!
//! The streamer accumulates exactly one record subtree at a time into an
//! [`ElementNode`]. Repeated sibling tags stay in document order as separate
//! children; nothing is keyed by name, so no sibling overwrites another.

use super::walker::Attribute;

/// Content of an element: nested elements and text runs, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// Child element
    Element(ElementNode),
    /// Text run
    Text(String),
}

/// An XML element with its attributes and mixed content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    /// Element name
    pub tag: String,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Children and text in document order
    pub content: Vec<NodeContent>,
}

impl ElementNode {
    /// Create an empty element
    pub fn new(tag: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            content: Vec::new(),
        }
    }

    /// Append a text run, merging with a directly preceding run
    pub fn push_text(&mut self, text: &str) {
        if let Some(NodeContent::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(NodeContent::Text(text.to_string()));
        }
    }

    /// Append a completed child element
    pub fn push_child(&mut self, child: ElementNode) {
        self.content.push(NodeContent::Element(child));
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// All child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.content.iter().filter_map(|c| match c {
            NodeContent::Element(e) => Some(e),
            NodeContent::Text(_) => None,
        })
    }

    /// Whether the element has any child elements
    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Child elements with the given tag, in document order
    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ElementNode> + 'a {
        self.elements().filter(move |e| e.tag == tag)
    }

    /// First child element with the given tag
    pub fn child(&self, tag: &str) -> Option<&ElementNode> {
        self.elements().find(|e| e.tag == tag)
    }

    /// First element reached by following a `/`-separated tag path
    ///
    /// `find("DescriptorName/String")` returns the first `String` under the
    /// first `DescriptorName`.
    pub fn find(&self, path: &str) -> Option<&ElementNode> {
        path.split('/')
            .try_fold(self, |node, tag| node.child(tag))
    }

    /// All elements matching a `/`-separated tag path, in document order
    ///
    /// Every step fans out over repeated siblings, so
    /// `find_all("ConceptList/Concept")` yields each concept of each list.
    pub fn find_all<'a>(&'a self, path: &'a str) -> Vec<&'a ElementNode> {
        let mut current = vec![self];
        for tag in path.split('/') {
            current = current
                .into_iter()
                .flat_map(|node| node.children(tag))
                .collect();
        }
        current
    }

    /// Concatenated text of this element and all descendants, in document
    /// order. Inline markup is dropped but its text is kept.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for c in &self.content {
            match c {
                NodeContent::Text(t) => out.push_str(t),
                NodeContent::Element(e) => e.collect_text(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> ElementNode {
        let mut node = ElementNode::new(tag, Vec::new());
        node.push_text(text);
        node
    }

    fn sample() -> ElementNode {
        let mut list = ElementNode::new("TreeNumberList", Vec::new());
        list.push_text("\n  ");
        list.push_child(leaf("TreeNumber", "D03.633"));
        list.push_text("\n  ");
        list.push_child(leaf("TreeNumber", "D04.345"));

        let mut name = ElementNode::new("DescriptorName", Vec::new());
        name.push_child(leaf("String", "Calcimycin"));

        let mut record = ElementNode::new("DescriptorRecord", Vec::new());
        record.push_child(leaf("DescriptorUI", "D000001"));
        record.push_child(name);
        record.push_child(list);
        record
    }

    #[test]
    fn test_find_path() {
        let record = sample();
        assert_eq!(
            record.find("DescriptorName/String").unwrap().text_content(),
            "Calcimycin"
        );
        assert!(record.find("DescriptorName/Missing").is_none());
    }

    #[test]
    fn test_repeated_siblings_keep_order() {
        let record = sample();
        let numbers: Vec<String> = record
            .find_all("TreeNumberList/TreeNumber")
            .iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(numbers, vec!["D03.633", "D04.345"]);
    }

    #[test]
    fn test_mixed_content_concatenation() {
        let mut note = ElementNode::new("ScopeNote", Vec::new());
        note.push_text("An ");
        note.push_child(leaf("i", "ionophorous"));
        note.push_text(" antibiotic");
        assert_eq!(note.text_content(), "An ionophorous antibiotic");
    }

    #[test]
    fn test_adjacent_text_runs_merge() {
        let mut node = ElementNode::new("String", Vec::new());
        node.push_text("R");
        node.push_text("&D");
        assert_eq!(node.content.len(), 1);
        assert!(!node.has_elements());
    }
}
