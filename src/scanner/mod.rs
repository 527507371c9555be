use crate::error::{Result, VillaAdminError};
use crate::http::UploadFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Formats the upload endpoint accepts
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// Images directly inside a folder, sorted by file name
fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1) // top level only
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image(p))
        .collect();

    images.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    images
}

/// Expand the command-line selection into upload order.
///
/// Files are kept in the order given (whatever their extension, the server
/// decides), folders contribute their images sorted by name.
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(VillaAdminError::FileNotFound(path.display().to_string()));
        }
        if path.is_dir() {
            let found = scan_folder(path);
            if found.is_empty() {
                return Err(VillaAdminError::NoImagesFound(path.display().to_string()));
            }
            files.extend(found.into_iter().map(UploadFile::new));
        } else {
            files.push(UploadFile::new(path));
        }
    }

    Ok(files)
}
