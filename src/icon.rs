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

//! Window and application icon resolution.
//!
//! Packaged builds ship their icons in the asset bundle next to the
//! executable; development builds usually run from the project root where
//! only the loose `runner/icon.png` / `icon.png` copies exist. Candidates
//! are probed in that order and the first file that decodes wins.

use std::path::{Path, PathBuf};

use gtk::{gdk, glib};
use thiserror::Error;
use tracing::warn;

/// Bundle-relative candidates, tried before the working-directory fallbacks.
/// Cinnamon renders some alpha-channel icons as fully transparent in the
/// taskbar, so the opaque variant takes priority.
const BUNDLE_CANDIDATES: [&str; 2] = [
    "data/flutter_assets/assets/taskbar_icon_noalpha.png",
    "data/flutter_assets/icon.png",
];

/// Working-directory fallbacks, shared with the default-icon lookup.
const LOOSE_CANDIDATES: [&str; 2] = ["runner/icon.png", "icon.png"];

#[derive(Debug, Error)]
pub enum IconError {
    /// No candidate file existed on disk.
    #[error("no usable icon file found")]
    NotFound,
    /// A candidate existed but could not be decoded.
    #[error("failed to load icon from {}: {}", .path.display(), .source)]
    Undecodable { path: PathBuf, source: glib::Error },
}

/// The winning candidate and its decoded image.
pub struct ResolvedIcon {
    pub path: PathBuf,
    pub texture: gdk::Texture,
}

/// Resolve the window/taskbar icon through the full candidate sequence.
pub fn resolve_window_icon() -> Result<ResolvedIcon, IconError> {
    let exe_dir = executable_dir();
    let candidates = window_icon_candidates(exe_dir.as_deref());
    let (path, texture) = resolve_from(&candidates, decode)?;
    Ok(ResolvedIcon { path, texture })
}

/// Resolve the application default icon from the loose fallbacks only.
pub fn resolve_default_icon() -> Result<ResolvedIcon, IconError> {
    let candidates: Vec<PathBuf> = LOOSE_CANDIDATES.iter().map(PathBuf::from).collect();
    let (path, texture) = resolve_from(&candidates, decode)?;
    Ok(ResolvedIcon { path, texture })
}

/// Make a loose icon file resolvable by name: register its directory as an
/// icon search path and return the name GTK will find it under (the file
/// stem). The path must exist, it is canonicalized to feed the theme an
/// absolute search path.
pub fn icon_name_for(display: &gdk::Display, path: &Path) -> Option<String> {
    let path = path.canonicalize().ok()?;
    let dir = path.parent()?;
    let name = path.file_stem()?.to_str()?.to_owned();
    gtk::IconTheme::for_display(display).add_search_path(dir);
    Some(name)
}

/// Candidate list for the window icon, highest priority first. Bundle
/// candidates are skipped entirely when the executable directory is unknown.
fn window_icon_candidates(exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(BUNDLE_CANDIDATES.len() + LOOSE_CANDIDATES.len());
    if let Some(dir) = exe_dir {
        candidates.extend(BUNDLE_CANDIDATES.iter().map(|rel| dir.join(rel)));
    }
    candidates.extend(LOOSE_CANDIDATES.iter().map(PathBuf::from));
    candidates
}

fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

fn decode(path: &Path) -> Result<gdk::Texture, glib::Error> {
    gdk::Texture::from_filename(path)
}

/// Probe `candidates` in order, decoding the first one that exists. A file
/// that exists but fails to decode is diagnosed and resolution moves on to
/// the next candidate; the error reported when nothing resolves is the
/// highest-priority decode failure, or [`IconError::NotFound`] when no
/// candidate existed at all.
fn resolve_from<T, D>(candidates: &[PathBuf], decode: D) -> Result<(PathBuf, T), IconError>
where
    D: Fn(&Path) -> Result<T, glib::Error>,
{
    let mut first_failure = None;
    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        match decode(candidate) {
            Ok(image) => return Ok((candidate.clone(), image)),
            Err(err) => {
                warn!(path = %candidate.display(), error = %err, "failed to decode icon");
                if first_failure.is_none() {
                    first_failure = Some(IconError::Undecodable {
                        path: candidate.clone(),
                        source: err,
                    });
                }
            }
        }
    }
    Err(first_failure.unwrap_or(IconError::NotFound))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    // Stand-in decoder: files starting with "good" decode to their bytes,
    // anything else is treated as corrupt.
    fn stub_decode(path: &Path) -> Result<Vec<u8>, glib::Error> {
        let bytes = fs::read(path)
            .map_err(|err| glib::Error::new(glib::FileError::Io, &err.to_string()))?;
        if bytes.starts_with(b"good") {
            Ok(bytes)
        } else {
            Err(glib::Error::new(glib::FileError::Inval, "not an image"))
        }
    }

    #[test]
    fn candidates_are_ordered_bundle_first() {
        let exe_dir = Path::new("/opt/clash");
        let candidates = window_icon_candidates(Some(exe_dir));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/opt/clash/data/flutter_assets/assets/taskbar_icon_noalpha.png"),
                PathBuf::from("/opt/clash/data/flutter_assets/icon.png"),
                PathBuf::from("runner/icon.png"),
                PathBuf::from("icon.png"),
            ]
        );
    }

    #[test]
    fn bundle_candidates_skipped_without_executable_dir() {
        let candidates = window_icon_candidates(None);
        assert_eq!(
            candidates,
            vec![PathBuf::from("runner/icon.png"), PathBuf::from("icon.png")]
        );
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent.png");
        let second = dir.path().join("second.png");
        let third = dir.path().join("third.png");
        fs::write(&second, "good-second").unwrap();
        fs::write(&third, "good-third").unwrap();

        let (path, image) =
            resolve_from(&[absent, second.clone(), third], stub_decode).unwrap();
        assert_eq!(path, second);
        assert_eq!(image, b"good-second");
    }

    #[test]
    fn later_candidates_not_consulted_after_success() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        fs::write(&first, "good-first").unwrap();
        fs::write(&second, "good-second").unwrap();

        let probed = RefCell::new(Vec::new());
        let decode = |path: &Path| {
            probed.borrow_mut().push(path.to_path_buf());
            stub_decode(path)
        };
        resolve_from(&[first.clone(), second], decode).unwrap();
        assert_eq!(probed.into_inner(), vec![first]);
    }

    #[test]
    fn all_absent_is_not_found() {
        let dir = TempDir::new().unwrap();
        let candidates = [dir.path().join("a.png"), dir.path().join("b.png")];
        let err = resolve_from(&candidates, stub_decode).unwrap_err();
        assert!(matches!(err, IconError::NotFound));
    }

    #[test]
    fn only_low_priority_candidate_present() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        fs::write(&second, "good-second").unwrap();

        let (path, _) = resolve_from(&[first, second.clone()], stub_decode).unwrap();
        assert_eq!(path, second);
    }

    #[test]
    fn corrupt_candidate_falls_through_to_next() {
        let dir = TempDir::new().unwrap();
        let corrupt = dir.path().join("corrupt.png");
        let valid = dir.path().join("valid.png");
        fs::write(&corrupt, "garbage").unwrap();
        fs::write(&valid, "good-valid").unwrap();

        let (path, _) = resolve_from(&[corrupt, valid.clone()], stub_decode).unwrap();
        assert_eq!(path, valid);
    }

    #[test]
    fn all_corrupt_reports_highest_priority_failure() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        fs::write(&first, "garbage").unwrap();
        fs::write(&second, "garbage").unwrap();

        let err = resolve_from(&[first.clone(), second], stub_decode).unwrap_err();
        match err {
            IconError::Undecodable { path, .. } => assert_eq!(path, first),
            other => panic!("expected Undecodable, got {other:?}"),
        }
    }
}
