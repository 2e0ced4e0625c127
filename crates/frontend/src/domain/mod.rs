pub mod a001_course;
pub mod a003_help_item;
