use crate::shared::Result;

/// OutputPresenter port: where a rendered governance report ends up
pub trait OutputPresenter {
    /// Writes the rendered report to stdout or to a file
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written, including
    /// when the target path is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
