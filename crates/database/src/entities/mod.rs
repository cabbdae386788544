pub mod course;
pub mod course_template;
pub mod enrollment;
pub mod student;
pub mod waitlist_entry;
