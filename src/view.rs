/*
* Copyright © 2026 Clash Shell Developers
*
* This file is part of Clash Shell.
* Clash Shell is free software: you can redistribute it and/or modify it under the terms of the
* GNU General Public License as published by the Free Software Foundation,
* either version 3 of the License, or (at your option) any later version.
* Clash Shell is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
* without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
* See the GNU General Public License for more details.
* You should have received a copy of the GNU General Public License along with Clash Shell. If not, see <https://www.gnu.org/licenses/>.
*/

//! The embedded rendering surface.
//!
//! Hosts the runtime's view inside the window: it receives the background
//! color and the entry-point argument list, paints the background, and emits
//! `first-frame` once its native resources exist. The window is presented
//! from that signal, never before. An engine-backed view replaces the
//! placeholder rendering while keeping the same contract.

use gtk::gdk;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;

mod imp {
    use std::cell::{Cell, RefCell};

    use gtk::gdk;
    use gtk::glib::subclass::Signal;
    use gtk::glib::{self, object_subclass};
    use gtk::graphene;
    use gtk::prelude::*;
    use gtk::subclass::prelude::*;
    use once_cell::sync::Lazy;
    use tracing::trace;

    pub struct EmbeddedView {
        pub(super) background: RefCell<gdk::RGBA>,
        pub(super) entrypoint_arguments: RefCell<Vec<String>>,
        first_frame_scheduled: Cell<bool>,
    }

    impl Default for EmbeddedView {
        fn default() -> Self {
            Self {
                background: RefCell::new(gdk::RGBA::BLACK),
                entrypoint_arguments: RefCell::new(Vec::new()),
                first_frame_scheduled: Cell::new(false),
            }
        }
    }

    #[object_subclass]
    impl ObjectSubclass for EmbeddedView {
        const NAME: &'static str = "ClashEmbeddedView";
        type Type = super::EmbeddedView;
        type ParentType = gtk::Widget;
    }

    impl ObjectImpl for EmbeddedView {
        fn signals() -> &'static [Signal] {
            static SIGNALS: Lazy<Vec<Signal>> =
                Lazy::new(|| vec![Signal::builder("first-frame").build()]);
            SIGNALS.as_ref()
        }

        fn constructed(&self) {
            self.parent_constructed();
            self.obj().set_focusable(true);
        }
    }

    impl WidgetImpl for EmbeddedView {
        fn realize(&self) {
            self.parent_realize();
            if self.first_frame_scheduled.replace(true) {
                return;
            }
            // The runtime reports its first frame asynchronously once the
            // view is realized; the window must only be presented from the
            // main loop, not from inside realize.
            let view = self.obj().downgrade();
            glib::idle_add_local_once(move || {
                if let Some(view) = view.upgrade() {
                    trace!("embedded view produced its first frame");
                    view.emit_by_name::<()>("first-frame", &[]);
                }
            });
        }

        fn snapshot(&self, snapshot: &gtk::Snapshot) {
            let widget = self.obj();
            let bounds = graphene::Rect::new(
                0.0,
                0.0,
                widget.width() as f32,
                widget.height() as f32,
            );
            snapshot.append_color(&self.background.borrow(), &bounds);
        }
    }
}

glib::wrapper! {
    pub struct EmbeddedView(ObjectSubclass<imp::EmbeddedView>)
        @extends gtk::Widget;
}

impl EmbeddedView {
    pub fn new(entrypoint_arguments: Vec<String>, background: gdk::RGBA) -> Self {
        let view: Self = glib::Object::builder().build();
        view.imp().entrypoint_arguments.replace(entrypoint_arguments);
        view.imp().background.replace(background);
        view
    }

    /// Arguments forwarded from the process command line, with the binary
    /// path already stripped.
    pub fn entrypoint_arguments(&self) -> Vec<String> {
        self.imp().entrypoint_arguments.borrow().clone()
    }

    pub fn connect_first_frame<F: Fn(&Self) + 'static>(&self, f: F) -> glib::SignalHandlerId {
        self.connect_local("first-frame", false, move |values| {
            let view = values[0]
                .get::<EmbeddedView>()
                .expect("first-frame emitted by something that is not an EmbeddedView");
            f(&view);
            None
        })
    }
}
