//! TemplateSource port - where canonical template bodies come from

use super::file_system::FsResult;

pub trait TemplateSource {
    /// Load the raw body of the template named `name`
    ///
    /// `name` is whatever the configuration declares (a relative path for
    /// the filesystem source).
    fn load(&self, name: &str) -> FsResult<String>;
}
