pub use formilo_types::prelude::*;

// vim: ts=4
