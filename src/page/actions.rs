//! Page actions raised by external triggers.
//!
//! Triggers (stdin lines in the binary, or any in-process caller) send
//! actions through a global channel consumed by the page's action loop.

use once_cell::sync::OnceCell;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::error::PageError;

/// Channel for sending page actions to the action loop.
static ACTION_SENDER: OnceCell<mpsc::Sender<PageAction>> = OnceCell::new();

/// Page action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Open or close the sidebar menu.
    ToggleMenu,
    /// Render the current page.
    Render,
    /// Stop the page.
    Quit,
}

impl PageAction {
    /// Map a trigger line to an action.
    pub fn from_trigger(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "menu" | "m" => Some(Self::ToggleMenu),
            "show" | "s" => Some(Self::Render),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Initialize the action channel.
///
/// Returns `None` if the channel was already initialized.
pub fn init_action_channel() -> Option<mpsc::Receiver<PageAction>> {
    let (tx, rx) = mpsc::channel(10);
    ACTION_SENDER.set(tx).ok()?;
    Some(rx)
}

/// A sender for the global action channel, once it is initialized.
pub fn action_sender() -> Option<mpsc::Sender<PageAction>> {
    ACTION_SENDER.get().cloned()
}

/// Queue an action without waiting. Fails when the channel is full or closed.
///
/// For synchronous callers that cannot wait; trigger sources that can block
/// use [`forward_triggers`] instead so no action is dropped.
#[allow(dead_code)]
pub fn send_action(action: PageAction) -> Result<(), PageError> {
    let sender = ACTION_SENDER.get().ok_or(PageError::ActionChannelClosed)?;
    sender.try_send(action).map_err(|e| {
        error!("Failed to send page action: {}", e);
        PageError::ActionChannelClosed
    })?;
    debug!("Queued page action {:?}", action);
    Ok(())
}

/// Read trigger lines and forward them as actions until quit or end of input.
///
/// Blocks on both the reader and a full channel, so it must run on its own
/// thread. End of input sends a final `Quit`.
pub fn forward_triggers<R: BufRead>(reader: R, sender: &mpsc::Sender<PageAction>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read trigger input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(action) = PageAction::from_trigger(&line) else {
            warn!("Unknown command '{}' (try menu, show, quit)", line.trim());
            continue;
        };

        if sender.blocking_send(action).is_err() {
            debug!("Action loop has stopped; no longer reading triggers");
            break;
        }
        if action == PageAction::Quit {
            return;
        }
    }
    let _ = sender.blocking_send(PageAction::Quit);
}
