//! Full-page loading overlay.
//!
//! Stays up for a minimum time that depends on the connection and until the
//! page's images and stylesheets have settled, never longer than
//! [`schedule::MAX_OVERLAY_MS`].

pub mod schedule;
pub mod view;

pub use view::{hide, init, LoadingOverlay};
