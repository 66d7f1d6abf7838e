//! Logged-in sessions: the student and administrator roles.
//!
//! A session borrows the portal's registries for as long as the user is
//! logged in. Enrollment is kept as a list of course codes and resolved
//! through the [`CourseManager`] on every access; it disappears at logout.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::accounts::Account;
use crate::course::Score;
use crate::course_manager::{CourseListing, CourseManager};
use crate::error::QuizError;
use crate::model::McqItem;
use crate::traits::AnswerSource;

/// Which kind of user a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Outcome of one enrolled course within [`Student::attempt_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct CourseAttempt {
    pub code: String,
    pub name: String,
    pub outcome: Result<Score, QuizError>,
    pub attempted_at: DateTime<Utc>,
}

impl CourseAttempt {
    pub fn passed(&self) -> bool {
        self.outcome.as_ref().is_ok_and(|s| s.passed)
    }
}

/// A logged-in student.
#[derive(Debug)]
pub struct Student<'a> {
    account: Account,
    courses: &'a CourseManager,
    enrolled: Vec<String>,
}

impl<'a> Student<'a> {
    pub fn new(account: Account, courses: &'a CourseManager) -> Self {
        Self {
            account,
            courses,
            enrolled: Vec::new(),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Every course the student could enroll in.
    pub fn available_courses(&self) -> Vec<CourseListing> {
        self.courses.list_courses()
    }

    /// Codes enrolled in this session, in enrollment order. May repeat.
    pub fn enrolled_codes(&self) -> &[String] {
        &self.enrolled
    }

    /// Enroll in a course and return its name.
    ///
    /// Enrolling twice in the same course adds a second entry.
    pub fn enroll(&mut self, code: &str) -> Result<&'a str, QuizError> {
        let courses = self.courses;
        let course = courses
            .get_course(code)
            .ok_or_else(|| QuizError::InvalidCode(code.to_string()))?;

        self.enrolled.push(code.to_string());
        tracing::info!(
            username = %self.account.username,
            code = %code,
            "enrolled"
        );
        Ok(course.name())
    }

    /// Names of enrolled courses, in enrollment order.
    pub fn list_enrolled(&self) -> Vec<&'a str> {
        let courses = self.courses;
        self.enrolled
            .iter()
            .filter_map(|code| courses.get_course(code).map(|c| c.name()))
            .collect()
    }

    /// Attempt every enrolled course in enrollment order.
    ///
    /// Each course is scored independently; an empty bank only affects its
    /// own entry.
    pub fn attempt_all(&self, answers: &mut dyn AnswerSource) -> Vec<CourseAttempt> {
        self.enrolled
            .iter()
            .map(|code| {
                let attempted_at = Utc::now();
                let (name, outcome) = match self.courses.get_course(code) {
                    Some(course) => (course.name().to_string(), course.attempt(answers)),
                    None => (String::new(), Err(QuizError::InvalidCode(code.clone()))),
                };

                match &outcome {
                    Ok(score) => tracing::info!(
                        username = %self.account.username,
                        code = %code,
                        percent = score.percent,
                        passed = score.passed,
                        "attempt scored"
                    ),
                    Err(e) => tracing::info!(
                        username = %self.account.username,
                        code = %code,
                        "attempt not scored: {e}"
                    ),
                }

                CourseAttempt {
                    code: code.clone(),
                    name,
                    outcome,
                    attempted_at,
                }
            })
            .collect()
    }
}

/// A logged-in administrator.
#[derive(Debug)]
pub struct Admin<'a> {
    id: String,
    courses: &'a mut CourseManager,
}

impl<'a> Admin<'a> {
    pub fn new(id: impl Into<String>, courses: &'a mut CourseManager) -> Self {
        Self {
            id: id.into(),
            courses,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if an existing course with this code was replaced.
    pub fn create_course(&mut self, name: &str, code: &str) -> bool {
        tracing::info!(admin = %self.id, code = %code, "creating course");
        self.courses.add_course(name, code)
    }

    pub fn list_courses(&self) -> Vec<CourseListing> {
        self.courses.list_courses()
    }

    pub fn has_course(&self, code: &str) -> bool {
        self.courses.get_course(code).is_some()
    }

    /// Append questions to a course and return its new bank size.
    pub fn add_questions_to_course(
        &mut self,
        code: &str,
        items: Vec<McqItem>,
    ) -> Result<usize, QuizError> {
        let course = self
            .courses
            .get_course_mut(code)
            .ok_or_else(|| QuizError::InvalidCode(code.to_string()))?;

        let added = items.len();
        for item in items {
            course.add_item(item);
        }
        tracing::info!(admin = %self.id, code = %code, added, "questions added");
        Ok(course.question_count())
    }
}

/// The active session, tagged by role.
#[derive(Debug)]
pub enum Session<'a> {
    Student(Student<'a>),
    Admin(Admin<'a>),
}

impl Session<'_> {
    pub fn role(&self) -> Role {
        match self {
            Session::Student(_) => Role::Student,
            Session::Admin(_) => Role::Admin,
        }
    }

    /// Username for students, admin id for administrators.
    pub fn identity(&self) -> &str {
        match self {
            Session::Student(s) => s.account().username.as_str(),
            Session::Admin(a) => a.id(),
        }
    }
}

impl<'a> From<Student<'a>> for Session<'a> {
    fn from(s: Student<'a>) -> Self {
        Session::Student(s)
    }
}

impl<'a> From<Admin<'a>> for Session<'a> {
    fn from(a: Admin<'a>) -> Self {
        Session::Admin(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ScriptedAnswers;

    fn account() -> Account {
        Account {
            display_name: "Alice".into(),
            roll_number: "R1".into(),
            username: "alice".into(),
            password: "pw".into(),
        }
    }

    fn item(answer: char) -> McqItem {
        McqItem::new(
            "Q",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer,
        )
        .unwrap()
    }

    fn seeded() -> CourseManager {
        let mut cm = CourseManager::new();
        cm.add_course("Data Structures", "CS101");
        cm.add_course("Algorithms", "CS102");
        {
            let mut admin = Admin::new("admin", &mut cm);
            admin
                .add_questions_to_course("CS101", vec![item('A'), item('B')])
                .unwrap();
        }
        cm
    }

    #[test]
    fn enroll_valid_and_invalid() {
        let cm = seeded();
        let mut student = Student::new(account(), &cm);

        assert_eq!(student.enroll("CS101"), Ok("Data Structures"));
        assert_eq!(
            student.enroll("NOPE"),
            Err(QuizError::InvalidCode("NOPE".into()))
        );
        assert_eq!(student.enrolled_codes(), ["CS101"]);
        assert_eq!(student.available_courses().len(), 2);
    }

    #[test]
    fn duplicate_enrollment_appends() {
        let cm = seeded();
        let mut student = Student::new(account(), &cm);
        student.enroll("CS102").unwrap();
        student.enroll("CS101").unwrap();
        student.enroll("CS102").unwrap();
        assert_eq!(
            student.list_enrolled(),
            vec!["Algorithms", "Data Structures", "Algorithms"]
        );
    }

    #[test]
    fn attempt_all_is_independent_per_course() {
        let cm = seeded();
        let mut student = Student::new(account(), &cm);
        student.enroll("CS102").unwrap();
        student.enroll("CS101").unwrap();

        let mut answers = ScriptedAnswers::from_letters("AC");
        let attempts = student.attempt_all(&mut answers);

        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].name, "Algorithms");
        assert_eq!(
            attempts[0].outcome,
            Err(QuizError::EmptyBank("CS102".into()))
        );
        assert!(!attempts[0].passed());

        assert_eq!(attempts[1].name, "Data Structures");
        let score = attempts[1].outcome.clone().unwrap();
        assert_eq!(score.percent, 50);
        assert!(attempts[1].passed());
    }

    #[test]
    fn attempt_all_with_nothing_enrolled() {
        let cm = seeded();
        let student = Student::new(account(), &cm);
        let mut answers = ScriptedAnswers::default();
        assert!(student.attempt_all(&mut answers).is_empty());
    }

    #[test]
    fn admin_authoring() {
        let mut cm = CourseManager::new();
        let mut admin = Admin::new("admin", &mut cm);

        assert!(!admin.create_course("Operating Systems", "CS201"));
        assert_eq!(admin.add_questions_to_course("CS201", vec![item('C')]), Ok(1));
        assert_eq!(admin.add_questions_to_course("CS201", vec![item('D')]), Ok(2));
        assert_eq!(
            admin.add_questions_to_course("CS999", vec![item('A')]),
            Err(QuizError::InvalidCode("CS999".into()))
        );

        assert!(admin.has_course("CS201"));
        assert!(!admin.has_course("CS999"));

        let listing = admin.list_courses();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].question_count, 2);
    }

    #[test]
    fn session_reports_role_and_identity() {
        let mut cm = CourseManager::new();
        {
            let session: Session<'_> = Admin::new("root", &mut cm).into();
            assert_eq!(session.role(), Role::Admin);
            assert_eq!(session.identity(), "root");
        }
        let session: Session<'_> = Student::new(account(), &cm).into();
        assert_eq!(session.role(), Role::Student);
        assert_eq!(session.identity(), "alice");
        assert_eq!(Role::Student.to_string(), "student");
    }
}
