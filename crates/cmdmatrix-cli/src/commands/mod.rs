pub mod format;
pub mod list;
pub mod report;
pub mod search;
