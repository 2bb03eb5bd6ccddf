//! The page's action loop.

use std::future::Future;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::actions::PageAction;
use super::{Page, RenderFormat};
use crate::widgets::MenuToggle;

/// Handle page actions until `Quit`, a closed channel, or `shutdown` resolves.
///
/// A failed toggle is logged and the loop keeps going.
pub async fn run_action_loop<F>(
    page: &Page,
    menu: &mut MenuToggle,
    actions: &mut mpsc::Receiver<PageAction>,
    format: RenderFormat,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            action = actions.recv() => match action {
                Some(PageAction::ToggleMenu) => match menu.toggle() {
                    Ok(open) => {
                        info!("Menu {}", if open { "opened" } else { "closed" });
                        print_page(page, format);
                    }
                    // The page has no sidebar: report like a host console would.
                    Err(e) => error!("Menu toggle failed: {}", e),
                },
                Some(PageAction::Render) => print_page(page, format),
                Some(PageAction::Quit) => {
                    info!("Quit requested");
                    break;
                }
                None => {
                    info!("Trigger input closed");
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }
    }
}

fn print_page(page: &Page, format: RenderFormat) {
    match page.render(format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => error!("{}", e),
    }
}
