pub use crate::app::App;
pub use formilo_types::error::{Error, FlResult};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
