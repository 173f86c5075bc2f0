use gtk::{gio, glib, subclass::prelude::ObjectSubclassIsExt};

use crate::APP_ID;

mod imp {
    use std::cell::{Cell, RefCell};

    use gtk::gdk;
    use gtk::glib::object_subclass;
    use gtk::prelude::*;
    use gtk::subclass::prelude::*;
    use tracing::{debug, warn};

    use crate::chrome::{self, Compositor};
    use crate::icon::{self, IconError};
    use crate::window;
    use crate::APP_ID;

    #[derive(Debug, Default)]
    pub struct ClashApplication {
        pub(super) entrypoint_arguments: RefCell<Vec<String>>,
        compositor: Cell<Option<Compositor>>,
    }

    #[object_subclass]
    impl ObjectSubclass for ClashApplication {
        const NAME: &'static str = "ClashApplication";
        type Type = super::ClashApplication;
        type ParentType = gtk::Application;
    }

    impl ObjectImpl for ClashApplication {
        fn dispose(&self) {
            self.entrypoint_arguments.take();
        }
    }

    impl ApplicationImpl for ClashApplication {
        fn startup(&self) {
            self.parent_startup();
            self.compositor.set(Some(chrome::detect()));
            self.apply_default_icon();
        }

        fn activate(&self) {
            self.parent_activate();
            let entrypoint_arguments = self.entrypoint_arguments.borrow().clone();
            let compositor = self.compositor.get().unwrap_or(Compositor::Unknown);
            let window = window::build(&self.obj(), compositor, entrypoint_arguments);
            debug!(title = ?window.title(), "created main window");
        }

        fn shutdown(&self) {
            debug!("application shutting down");
            self.parent_shutdown();
        }
    }

    impl GtkApplicationImpl for ClashApplication {}

    impl ClashApplication {
        /// Default icon for the application menu and system indicators. The
        /// theme entry named after the application id wins; the loose icon
        /// files in the working directory are the fallback.
        fn apply_default_icon(&self) {
            let Some(display) = gdk::Display::default() else {
                debug!("no display; leaving the default icon unset");
                return;
            };
            if gtk::IconTheme::for_display(&display).has_icon(APP_ID) {
                gtk::Window::set_default_icon_name(APP_ID);
                return;
            }
            match icon::resolve_default_icon() {
                Ok(resolved) => {
                    if let Some(name) = icon::icon_name_for(&display, &resolved.path) {
                        gtk::Window::set_default_icon_name(&name);
                    }
                }
                Err(IconError::NotFound) => debug!("no default icon fallback file"),
                Err(err) => warn!("failed to set default icon: {err}"),
            }
        }
    }
}

glib::wrapper! {
    pub struct ClashApplication(ObjectSubclass<imp::ClashApplication>)
        @extends gio::Application, gtk::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl ClashApplication {
    pub fn new(entrypoint_arguments: Vec<String>) -> Self {
        let app: Self = glib::Object::builder()
            .property("application-id", APP_ID)
            .property("flags", gio::ApplicationFlags::NON_UNIQUE)
            .build();
        app.imp().entrypoint_arguments.replace(entrypoint_arguments);
        app
    }
}
