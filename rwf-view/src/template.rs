//! Template files on disk.
use crate::Error;

use std::path::{Path, PathBuf};

/// A template resolved to an existing file.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    path: PathBuf,
}

impl Template {
    /// Compute `<base>/<name>.<extension>` and make sure it's a regular file.
    ///
    /// An empty base resolves relative to the working directory.
    pub fn resolve(base: impl AsRef<Path>, name: &str, extension: &str) -> Result<Self, Error> {
        let path = Self::filename(base, name, extension);

        if !path.is_file() {
            return Err(Error::TemplateNotFound {
                template: name.to_string(),
                path,
            });
        }

        Ok(Template {
            name: name.to_string(),
            path,
        })
    }

    /// Path where the template is expected to be, whether it exists or not.
    pub fn filename(base: impl AsRef<Path>, name: &str, extension: &str) -> PathBuf {
        let file = format!("{}.{}", name, extension);
        let base = base.as_ref();

        if base.as_os_str().is_empty() {
            PathBuf::from(file)
        } else {
            base.join(file)
        }
    }

    /// Name the template was requested by, e.g. `"layouts/main"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
