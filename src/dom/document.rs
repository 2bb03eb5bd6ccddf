//! Document: the set of elements on the page, addressable by id.

use serde::Serialize;

use super::element::Element;

/// Page document. Elements keep their insertion order for rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an element by id.
    #[allow(dead_code)]
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Look up an element by id for modification.
    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Append an element, replacing any existing element with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.get_element_by_id_mut(element.id()) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    /// Remove an element by id.
    #[allow(dead_code)]
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}
