pub mod png;
pub mod ppm;

use std::path::{Path, PathBuf};

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::presenters::file::png::PngFilePresenter;
use crate::presenters::file::ppm::PpmFilePresenter;

#[derive(Debug, thiserror::Error)]
pub enum SaveImageError {
    #[error("unsupported image extension for '{path}', expected .png or .ppm")]
    UnsupportedExtension { path: PathBuf },
    #[error("cannot write PPM '{path}': {source}")]
    Ppm {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write PNG '{path}': {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Saves `buffer` as PNG or PPM, picked by the file extension.
pub fn save_image(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), SaveImageError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => PngFilePresenter::new()
            .present(buffer, path)
            .map_err(|source| SaveImageError::Png {
                path: path.to_path_buf(),
                source,
            }),
        Some("ppm") => PpmFilePresenter::new()
            .present(buffer, path)
            .map_err(|source| SaveImageError::Ppm {
                path: path.to_path_buf(),
                source,
            }),
        _ => Err(SaveImageError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }?;

    tracing::info!(path = %path.display(), "saved image");
    Ok(())
}
