pub mod config;
pub mod dom;
pub mod escape;
pub mod icons;
pub mod search;
pub mod storage;
pub mod theme;
