pub mod format_error;
pub mod render_error;

pub use format_error::FormatError;
pub use render_error::RenderError;
