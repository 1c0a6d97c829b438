//! The slice of the DOM the translator needs.

/// A single element.
pub trait Element {
    /// Tag name; compared case-insensitively.
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, name: &str, value: &str);
    /// Replace the children with one text node.
    fn set_text_content(&mut self, text: &str);
    /// Replace the children with parsed markup.
    fn set_inner_html(&mut self, html: &str);
}

/// A page of elements.
pub trait Document {
    type Element: Element;

    /// Every element carrying attribute `name`, in document order.
    fn elements_with_attribute(&mut self, name: &str) -> Vec<&mut Self::Element>;

    fn element_by_id(&mut self, id: &str) -> Option<&mut Self::Element>;
}

/// In-memory element: tag, attributes, serialized children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticElement {
    tag: String,
    attributes: Vec<(String, String)>,
    inner_html: String,
}

impl StaticElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            inner_html: String::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.inner_html = html.to_string();
        self
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }
}

/// Escape text the way a serialized text node is escaped.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

impl Element for StaticElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text_content(&mut self, text: &str) {
        self.inner_html = escape_text(text);
    }

    fn set_inner_html(&mut self, html: &str) {
        self.inner_html = html.to_string();
    }
}

/// Flat, in-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocument {
    elements: Vec<StaticElement>,
}

impl StaticDocument {
    pub fn new(elements: Vec<StaticElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[StaticElement] {
        &self.elements
    }

    pub fn get_by_id(&self, id: &str) -> Option<&StaticElement> {
        self.elements.iter().find(|e| e.attribute("id") == Some(id))
    }
}

impl Document for StaticDocument {
    type Element = StaticElement;

    fn elements_with_attribute(&mut self, name: &str) -> Vec<&mut StaticElement> {
        self.elements
            .iter_mut()
            .filter(|e| e.attribute(name).is_some())
            .collect()
    }

    fn element_by_id(&mut self, id: &str) -> Option<&mut StaticElement> {
        self.elements
            .iter_mut()
            .find(|e| e.attribute("id") == Some(id))
    }
}
