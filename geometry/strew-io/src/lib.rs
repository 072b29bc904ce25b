//! Mesh asset I/O for Strew.
//!
//! Loading and saving of the triangle mesh formats the scattering pipelines
//! accept:
//!
//! - **STL** (Stereolithography) - Binary and ASCII
//! - **OBJ** (Wavefront) - ASCII only
//!
//! # Example
//!
//! ```no_run
//! use strew_io::{load_mesh, save_mesh};
//!
//! // Format detected from the .stl extension
//! let mesh = load_mesh("model.stl").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "model.obj").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, save_obj};
pub use stl::{load_stl, save_stl};

use std::path::Path;

use strew_types::TriMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format, binary or ASCII.
    Stl,
    /// OBJ (Wavefront) format, ASCII only.
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use strew_io::MeshFormat;
    ///
    /// assert_eq!(MeshFormat::from_path("teapot.stl"), Some(MeshFormat::Stl));
    /// assert_eq!(MeshFormat::from_path("teapot.glb"), None);
    /// ```
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the extension,
/// the file cannot be read, or the content is invalid.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL output uses the binary variant.
///
/// # Errors
///
/// Returns an error if the format cannot be determined from the extension
/// or the file cannot be written.
pub fn save_mesh<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => save_stl(mesh, path, true),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strew_types::{axis_cube, MeshTopology};

    #[test]
    fn format_detection() {
        assert_eq!(MeshFormat::from_path("a/b/model.STL"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("model.obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("model"), None);
        assert_eq!(MeshFormat::from_path("model.ply"), None);
    }

    #[test]
    fn load_unknown_extension_fails() {
        let result = load_mesh("model.xyz");
        assert!(matches!(result, Err(IoError::UnknownFormat { .. })));
    }

    #[test]
    fn dispatch_roundtrip() {
        let cube = axis_cube(1.0);
        let dir = tempfile::tempdir().unwrap();

        for name in ["cube.stl", "cube.obj"] {
            let path = dir.path().join(name);
            save_mesh(&cube, &path).unwrap();
            let loaded = load_mesh(&path).unwrap();
            assert_eq!(loaded.face_count(), cube.face_count());
        }
    }
}
