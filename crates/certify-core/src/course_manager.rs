//! Registry of courses keyed by course code.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::course::Course;

/// One row of [`CourseManager::list_courses`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListing {
    pub code: String,
    pub name: String,
    pub question_count: usize,
}

/// Sole owner of every [`Course`].
///
/// Iteration is ordered lexicographically by code.
#[derive(Debug, Clone, Default)]
pub struct CourseManager {
    courses: BTreeMap<String, Course>,
}

impl CourseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a course, replacing any course with the same code.
    ///
    /// A replaced course starts over with an empty question bank. Returns
    /// `true` if an existing course was replaced.
    pub fn add_course(&mut self, name: impl Into<String>, code: impl Into<String>) -> bool {
        let code = code.into();
        let course = Course::new(name, code.clone());
        let name = course.name().to_string();

        match self.courses.insert(code.clone(), course) {
            Some(old) => {
                tracing::warn!(
                    code = %code,
                    old_name = %old.name(),
                    new_name = %name,
                    "course code already registered, overwriting"
                );
                true
            }
            None => {
                tracing::debug!(code = %code, name = %name, "course added");
                false
            }
        }
    }

    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn get_course_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.get_mut(code)
    }

    pub fn list_courses(&self) -> Vec<CourseListing> {
        self.courses
            .values()
            .map(|c| CourseListing {
                code: c.code().to_string(),
                name: c.name().to_string(),
                question_count: c.question_count(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
