pub mod aggregate;

pub use aggregate::{HelpItem, HelpKind};
