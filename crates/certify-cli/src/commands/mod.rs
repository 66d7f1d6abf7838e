pub mod init;
pub mod list_courses;
pub mod run;
pub mod validate;
