//! `.mbz` zoom-point files: a saved view centre and zoom level.
//!
//! Layout, big-endian:
//!
//! | offset | size | field                  |
//! |--------|------|------------------------|
//! | 0      | 8    | header, i64 `0x408`    |
//! | 8      | 8    | x, f64                 |
//! | 16     | 8    | y, f64                 |
//! | 24     | 4    | zoom level, i32        |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const ZOOM_POINT_HEADER: i64 = 0x408;
pub const ZOOM_POINT_EXTENSION: &str = "mbz";
pub const ZOOM_POINT_LEN: usize = 28;

#[derive(Debug, thiserror::Error)]
pub enum ZoomPointError {
    #[error("cannot access zoom point '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not an .{ZOOM_POINT_EXTENSION} file")]
    WrongExtension { path: PathBuf },
    #[error("not a zoom point file: header {found:#x}, expected {ZOOM_POINT_HEADER:#x}")]
    BadHeader { found: i64 },
    #[error("zoom point file is truncated: {len} of {ZOOM_POINT_LEN} bytes")]
    Truncated { len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPoint {
    pub x: f64,
    pub y: f64,
    pub zoom_level: i32,
}

impl ZoomPoint {
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ZOOM_POINT_LEN] {
        let mut bytes = [0; ZOOM_POINT_LEN];
        bytes[0..8].copy_from_slice(&ZOOM_POINT_HEADER.to_be_bytes());
        bytes[8..16].copy_from_slice(&self.x.to_be_bytes());
        bytes[16..24].copy_from_slice(&self.y.to_be_bytes());
        bytes[24..28].copy_from_slice(&self.zoom_level.to_be_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZoomPointError> {
        let truncated = || ZoomPointError::Truncated { len: bytes.len() };
        let field = |range: std::ops::Range<usize>| bytes.get(range).ok_or_else(truncated);

        let header = i64::from_be_bytes(field(0..8)?.try_into().map_err(|_| truncated())?);
        if header != ZOOM_POINT_HEADER {
            return Err(ZoomPointError::BadHeader { found: header });
        }

        let x = f64::from_be_bytes(field(8..16)?.try_into().map_err(|_| truncated())?);
        let y = f64::from_be_bytes(field(16..24)?.try_into().map_err(|_| truncated())?);
        let zoom_level = i32::from_be_bytes(field(24..28)?.try_into().map_err(|_| truncated())?);

        if bytes.len() > ZOOM_POINT_LEN {
            tracing::debug!(len = bytes.len(), "ignoring trailing bytes in zoom point");
        }

        Ok(Self { x, y, zoom_level })
    }
}

fn has_zoom_point_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == ZOOM_POINT_EXTENSION)
}

/// `path` with `.mbz` appended unless it already ends in it.
#[must_use]
pub fn with_zoom_point_extension(path: &Path) -> PathBuf {
    if has_zoom_point_extension(path) {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ZOOM_POINT_EXTENSION);
    PathBuf::from(name)
}

/// Writes `point`, returning the path actually written.
pub fn write_zoom_point(path: impl AsRef<Path>, point: &ZoomPoint) -> Result<PathBuf, ZoomPointError> {
    let path = with_zoom_point_extension(path.as_ref());

    std::fs::write(&path, point.to_bytes()).map_err(|source| ZoomPointError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), ?point, "saved zoom point");
    Ok(path)
}

pub fn read_zoom_point(path: impl AsRef<Path>) -> Result<ZoomPoint, ZoomPointError> {
    let path = path.as_ref();

    if !has_zoom_point_extension(path) {
        return Err(ZoomPointError::WrongExtension {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ZoomPointError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    ZoomPoint::from_bytes(&bytes)
}
