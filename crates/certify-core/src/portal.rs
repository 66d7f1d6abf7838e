//! Top-level controller.
//!
//! The [`Portal`] owns the course registry and the account store for the
//! whole process and hands out role sessions after authentication.

use anyhow::Result;

use crate::accounts::{Account, AdminCredential, UserManager};
use crate::catalog::{parse_catalog, Catalog};
use crate::config::PortalConfig;
use crate::course_manager::CourseManager;
use crate::error::QuizError;
use crate::session::{Admin, Student};

#[derive(Debug, Clone, Default)]
pub struct Portal {
    courses: CourseManager,
    users: UserManager,
}

impl Portal {
    pub fn new(courses: CourseManager, users: UserManager) -> Self {
        Self { courses, users }
    }

    /// Build a portal from config, seeding courses from the configured
    /// catalog or from [`Catalog::default_seed`].
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let catalog = match &config.catalog {
            Some(path) => parse_catalog(path)?,
            None => Catalog::default_seed(),
        };
        Self::with_catalog(&catalog, config.admin.clone())
    }

    pub fn with_catalog(catalog: &Catalog, admin: AdminCredential) -> Result<Self> {
        let mut courses = CourseManager::new();
        catalog.install(&mut courses)?;
        tracing::info!(courses = courses.len(), "portal ready");
        Ok(Self::new(courses, UserManager::new(admin)))
    }

    pub fn courses(&self) -> &CourseManager {
        &self.courses
    }

    pub fn users(&self) -> &UserManager {
        &self.users
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.users.is_registered(username)
    }

    pub fn authenticate_student(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Student<'_>, QuizError> {
        if !self.users.is_registered(username) {
            return Err(QuizError::NotRegistered(username.to_string()));
        }
        if !self.users.login(username, password) {
            tracing::info!(username = %username, "student login failed");
            return Err(QuizError::BadPassword(username.to_string()));
        }

        let account = self.users.get_account(username)?.clone();
        tracing::info!(username = %username, "student logged in");
        Ok(Student::new(account, &self.courses))
    }

    /// Register (or re-register) a student and log them straight in.
    pub fn register_new_student(
        &mut self,
        roll: &str,
        name: &str,
        username: &str,
        password: &str,
    ) -> Student<'_> {
        self.users.register_student(roll, name, username, password);
        let account = Account {
            display_name: name.to_string(),
            roll_number: roll.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        Student::new(account, &self.courses)
    }

    pub fn authenticate_admin(&mut self, id: &str, password: &str) -> Result<Admin<'_>, QuizError> {
        if !self.users.admin_login(id, password) {
            tracing::info!(id = %id, "admin login failed");
            return Err(QuizError::BadCredential);
        }
        tracing::info!(id = %id, "admin logged in");
        Ok(Admin::new(id, &mut self.courses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::McqItem;
    use crate::traits::ScriptedAnswers;

    fn portal() -> Portal {
        Portal::from_config(&PortalConfig::default()).unwrap()
    }

    #[test]
    fn default_portal_has_seed_courses() {
        let p = portal();
        assert_eq!(p.courses().len(), 2);
        assert!(p.courses().get_course("CS101").is_some());
        assert!(p.users().is_empty());
    }

    #[test]
    fn student_authentication_outcomes() {
        let mut p = portal();
        assert_eq!(
            p.authenticate_student("alice", "pw").unwrap_err(),
            QuizError::NotRegistered("alice".into())
        );

        p.register_new_student("R1", "Alice", "alice", "pw");
        assert_eq!(
            p.authenticate_student("alice", "nope").unwrap_err(),
            QuizError::BadPassword("alice".into())
        );

        let student = p.authenticate_student("alice", "pw").unwrap();
        assert_eq!(student.account().display_name, "Alice");
        assert_eq!(student.account().roll_number, "R1");
    }

    #[test]
    fn reregistration_last_write_wins() {
        let mut p = portal();
        p.register_new_student("R1", "Alice", "alice", "first");
        p.register_new_student("R1", "Alice", "alice", "second");
        assert!(p.authenticate_student("alice", "first").is_err());
        assert!(p.authenticate_student("alice", "second").is_ok());
    }

    #[test]
    fn admin_authentication_outcomes() {
        let mut p = portal();
        assert_eq!(
            p.authenticate_admin("admin", "wrong").unwrap_err(),
            QuizError::BadCredential
        );
        let admin = p.authenticate_admin("admin", "admin123").unwrap();
        assert_eq!(admin.id(), "admin");
    }

    #[test]
    fn authored_questions_are_visible_to_students() {
        let mut p = portal();
        {
            let mut admin = p.authenticate_admin("admin", "admin123").unwrap();
            admin.create_course("Operating Systems", "CS201");
            let items = ["A", "B", "C", "D"]
                .iter()
                .map(|ans| {
                    McqItem::new(
                        format!("answer is {ans}"),
                        vec!["w".into(), "x".into(), "y".into(), "z".into()],
                        ans.chars().next().unwrap(),
                    )
                    .unwrap()
                })
                .collect();
            assert_eq!(admin.add_questions_to_course("CS201", items), Ok(4));
        }

        let mut student = p.register_new_student("R9", "Bob", "bob", "pw");
        assert_eq!(student.enroll("CS201"), Ok("Operating Systems"));

        let mut answers = ScriptedAnswers::from_letters("ABxx");
        let attempts = student.attempt_all(&mut answers);
        assert_eq!(attempts.len(), 1);
        let score = attempts[0].outcome.clone().unwrap();
        assert_eq!(score.percent, 50);
        assert!(score.passed);
    }
}
