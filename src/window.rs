//! Top-level window construction: chrome, icon, embedded view wiring.

use gtk::gdk;
use gtk::prelude::*;
use tracing::{debug, warn};

use crate::application::ClashApplication;
use crate::chrome::{self, Compositor};
use crate::icon;
use crate::view::EmbeddedView;

pub const WINDOW_TITLE: &str = "Clash";
pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 720;

/// Background behind the embedded view. Override here if necessary, e.g.
/// "#00000000" for transparent.
const BACKGROUND_COLOR: &str = "#000000";

pub fn build(
    app: &ClashApplication,
    compositor: Compositor,
    entrypoint_arguments: Vec<String>,
) -> gtk::ApplicationWindow {
    let window = gtk::ApplicationWindow::new(app);
    chrome::apply(&window, compositor, WINDOW_TITLE);
    window.set_default_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    apply_window_icon(&window);

    let background = gdk::RGBA::parse(BACKGROUND_COLOR).unwrap_or(gdk::RGBA::BLACK);
    let view = EmbeddedView::new(entrypoint_arguments, background);
    debug!(
        arguments = view.entrypoint_arguments().len(),
        "handing entry-point arguments to the embedded view"
    );
    window.set_child(Some(&view));

    // Show the window once the embedded surface has rendered something.
    let window_weak = window.downgrade();
    view.connect_first_frame(move |_| {
        if let Some(window) = window_weak.upgrade() {
            window.present();
        }
    });

    view.grab_focus();
    window
}

/// Set the taskbar/window icon from the resolved file. GTK 4 looks window
/// icons up by name, so the winning file's directory is registered as an
/// icon search path and the file stem becomes the icon name. Failure leaves
/// whatever default icon the session provides.
fn apply_window_icon(window: &gtk::ApplicationWindow) {
    match icon::resolve_window_icon() {
        Ok(resolved) => {
            debug!(
                path = %resolved.path.display(),
                width = resolved.texture.width(),
                height = resolved.texture.height(),
                "resolved window icon"
            );
            if let Some(name) = icon::icon_name_for(&window.display(), &resolved.path) {
                window.set_icon_name(Some(&name));
            }
        }
        Err(err) => warn!("failed to set window icon: {err}"),
    }
}
