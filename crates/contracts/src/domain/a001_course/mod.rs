pub mod aggregate;

pub use aggregate::{CourseRecord, Instructor};
