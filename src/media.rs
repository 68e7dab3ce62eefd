use std::fs;
use std::io;
use std::path::Path;

use crate::models::MediaItem;

/// Remove the stored files behind a residence's media entries after the
/// row is gone. Best-effort: a file that fails to unlink is logged and
/// skipped, never fatal.
pub fn remove_media_files(uploads_dir: &Path, media: &[MediaItem]) {
    for item in media {
        // media urls look like /uploads/<filename>; anything else (or a
        // traversal attempt) is not ours to delete
        let Some(name) = item.url.rsplit('/').next() else {
            continue;
        };
        if name.is_empty() || name == "." || name == ".." {
            continue;
        }

        let path = uploads_dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => log::debug!("removed media file {}", path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                log::warn!("failed to remove media file {}: {err}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    #[test]
    fn missing_files_are_ignored() {
        let media = vec![MediaItem {
            url: "/uploads/does-not-exist.jpg".to_owned(),
            kind: MediaKind::Image,
        }];
        // must not panic or error
        remove_media_files(Path::new("/tmp"), &media);
    }

    #[test]
    fn removes_existing_files() {
        let dir = std::env::temp_dir();
        let file = dir.join("residence-api-media-test.jpg");
        fs::write(&file, b"x").unwrap();

        let media = vec![MediaItem {
            url: "/uploads/residence-api-media-test.jpg".to_owned(),
            kind: MediaKind::Image,
        }];
        remove_media_files(&dir, &media);

        assert!(!file.exists());
    }
}
