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

use gtk::gio;
use gtk::glib;
use gtk::prelude::*;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use application::ClashApplication;

mod application;
mod chrome;
mod icon;
mod view;
mod window;

const APP_ID: &str = "com.github.worthies.clash";

fn main() -> glib::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Helps GTK and desktop environments map the running process to its
    // .desktop file.
    glib::set_prgname(Some(APP_ID));

    // Strip the binary path; everything else goes to the embedded runtime
    // untouched.
    let entrypoint_arguments: Vec<String> = std::env::args().skip(1).collect();

    let app = ClashApplication::new(entrypoint_arguments);

    if let Err(err) = app.register(None::<&gio::Cancellable>) {
        warn!("failed to register application: {err}");
        return glib::ExitCode::FAILURE;
    }

    // The argument list was captured above; run the main loop with an empty
    // vector so GLib never reinterprets runtime arguments as options.
    app.run_with_args::<&str>(&[])
}
