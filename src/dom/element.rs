//! Elements and their class lists.

use serde::Serialize;
use std::fmt;

/// Ordered set of class tokens on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns false if it was already present.
    pub fn add(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns false if it was not present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Force a token on or off.
    pub fn set(&mut self, token: &str, present: bool) {
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// A single addressable element of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    id: String,
    #[serde(rename = "class")]
    classes: ClassList,
    text: String,
}

impl Element {
    /// Create an element with no classes and no text.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: ClassList::new(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    #[allow(dead_code)]
    pub fn class_list(&self) -> &ClassList {
        &self.classes
    }

    pub fn class_list_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    #[allow(dead_code)]
    pub fn text_content(&self) -> &str {
        &self.text
    }

    /// Replace the text content.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Render as a single markup line.
    pub fn to_markup(&self) -> String {
        let id = escape(&self.id);
        let text = escape(&self.text);
        if self.classes.is_empty() {
            format!("<div id=\"{}\">{}</div>", id, text)
        } else {
            format!(
                "<div id=\"{}\" class=\"{}\">{}</div>",
                id,
                escape(&self.classes.to_string()),
                text
            )
        }
    }
}

/// Escape text for use in markup content and quoted attribute values.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
