use crate::shared::Result;

/// OutputPresenter port for delivering the rendered report to its
/// destination (stdout or a file).
pub trait OutputPresenter {
    fn present(&self, content: &str) -> Result<()>;
}
