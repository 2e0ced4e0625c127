pub mod a001_course;
pub mod a002_category;
pub mod a003_help_item;
