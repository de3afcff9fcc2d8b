pub mod course;

pub use course::{Course, CourseDraft, CourseRecord, Difficulty, MAX_COURSE_ID, SUGGESTED_CATEGORIES};
