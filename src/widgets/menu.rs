//! Sidebar menu toggle.

use tracing::debug;

use crate::config::PageConfig;
use crate::error::PageError;
use crate::page::Page;

/// Opens and closes the sidebar by flipping a marker class on it.
///
/// The open state is owned here and written through to the element, so the
/// marker is present exactly when an odd number of toggles has succeeded.
#[derive(Debug)]
pub struct MenuToggle {
    page: Page,
    target_id: String,
    marker: String,
    open: bool,
}

impl MenuToggle {
    /// Create a closed toggle for the configured sidebar.
    pub fn new(page: Page, config: &PageConfig) -> Self {
        Self {
            page,
            target_id: config.sidebar_id.clone(),
            marker: config.marker_class.clone(),
            open: false,
        }
    }

    /// Flip the sidebar and return the new state.
    ///
    /// Fails with [`PageError::ElementNotFound`] when the page has no
    /// sidebar element; the state is left unchanged in that case.
    pub fn toggle(&mut self) -> Result<bool, PageError> {
        let open = !self.open;

        self.page.write(|doc| {
            let sidebar = doc
                .get_element_by_id_mut(&self.target_id)
                .ok_or_else(|| PageError::ElementNotFound {
                    id: self.target_id.clone(),
                })?;
            sidebar.class_list_mut().set(&self.marker, open);
            Ok::<_, PageError>(())
        })?;

        self.open = open;
        debug!(
            "Sidebar '{}' {}",
            self.target_id,
            if open { "opened" } else { "closed" }
        );
        Ok(open)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
