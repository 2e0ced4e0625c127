pub mod descriptor;

pub use descriptor::{CategoryDescriptor, DEFAULT_CATEGORY, DEFAULT_COURSE_PAGE_DIR};
