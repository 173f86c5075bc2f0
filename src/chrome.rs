//! Window chrome selection.
//!
//! GNOME sessions get a header bar as that is the common style there (e.g.
//! Ubuntu desktop). Other X11 window managers may do more exotic layout,
//! e.g. tiling, so those keep a traditional title bar. Wayland compositors
//! are assumed to handle header bars.

use gtk::prelude::*;
use tracing::debug;

/// Compositor classification, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    /// Session type could not be determined.
    Unknown,
    /// Known to render client-side header bars sensibly.
    HeaderBarCapable,
    /// May do its own window layout; keep a traditional title bar.
    TitleBarOnly,
}

impl Compositor {
    /// Unknown compositors get the header bar, matching the common case.
    pub fn use_header_bar(self) -> bool {
        !matches!(self, Compositor::TitleBarOnly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionBackend {
    Wayland,
    X11,
    Unknown,
}

/// Classify the running compositor from the session environment.
pub fn detect() -> Compositor {
    let backend = session_backend(
        std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
        std::env::var("WAYLAND_DISPLAY").ok().as_deref(),
        std::env::var("DISPLAY").ok().as_deref(),
    );
    let compositor = classify(backend, std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref());
    debug!(?compositor, "classified compositor");
    compositor
}

/// Pick the titlebar style for `window`. The window title is set either way;
/// with a header bar GTK displays it from there.
pub fn apply(window: &gtk::ApplicationWindow, compositor: Compositor, title: &str) {
    window.set_title(Some(title));
    if compositor.use_header_bar() {
        let header_bar = gtk::HeaderBar::new();
        header_bar.set_show_title_buttons(true);
        window.set_titlebar(Some(&header_bar));
    }
}

fn session_backend(
    session_type: Option<&str>,
    wayland_display: Option<&str>,
    x11_display: Option<&str>,
) -> SessionBackend {
    match session_type {
        Some(s) if s.eq_ignore_ascii_case("wayland") => SessionBackend::Wayland,
        Some(s) if s.eq_ignore_ascii_case("x11") => SessionBackend::X11,
        // Login managers don't always export XDG_SESSION_TYPE; the display
        // sockets are the next best signal.
        _ if wayland_display.is_some_and(|d| !d.is_empty()) => SessionBackend::Wayland,
        _ if x11_display.is_some_and(|d| !d.is_empty()) => SessionBackend::X11,
        _ => SessionBackend::Unknown,
    }
}

fn classify(backend: SessionBackend, current_desktop: Option<&str>) -> Compositor {
    match backend {
        SessionBackend::Wayland => Compositor::HeaderBarCapable,
        SessionBackend::X11 if current_desktop.is_some_and(is_gnome) => {
            Compositor::HeaderBarCapable
        }
        SessionBackend::X11 => Compositor::TitleBarOnly,
        SessionBackend::Unknown => Compositor::Unknown,
    }
}

/// `XDG_CURRENT_DESKTOP` is a colon-separated list, e.g. `ubuntu:GNOME`.
fn is_gnome(current_desktop: &str) -> bool {
    current_desktop
        .split(':')
        .any(|entry| entry.trim().eq_ignore_ascii_case("gnome"))
}
