//! TOML course catalog parser.
//!
//! Loads course and question definitions from TOML, validates them, and
//! installs them into a [`CourseManager`] at startup.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::course_manager::CourseManager;
use crate::model::{letter_index, McqItem, STANDARD_OPTION_COUNT};

/// A parsed catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<CatalogCourse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCourse {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<CatalogQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Single letter, e.g. `"B"`.
    pub answer: String,
}

impl CatalogQuestion {
    fn answer_letter(&self) -> Option<char> {
        let mut chars = self.answer.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Catalog {
    /// The two courses the portal starts with when no catalog is given.
    pub fn default_seed() -> Self {
        Self {
            courses: vec![
                CatalogCourse {
                    code: "CS101".into(),
                    name: "Data Structures".into(),
                    questions: vec![],
                },
                CatalogCourse {
                    code: "CS102".into(),
                    name: "Algorithms".into(),
                    questions: vec![],
                },
            ],
        }
    }

    /// Add every course and question to `manager`, in file order.
    ///
    /// Later courses with a repeated code replace earlier ones.
    pub fn install(&self, manager: &mut CourseManager) -> Result<()> {
        for course in &self.courses {
            manager.add_course(course.name.as_str(), course.code.as_str());
            let Some(target) = manager.get_course_mut(&course.code) else {
                anyhow::bail!("course {} vanished during install", course.code);
            };

            for (idx, q) in course.questions.iter().enumerate() {
                let letter = q.answer_letter().with_context(|| {
                    format!(
                        "course {} question {}: answer must be a single letter, got {:?}",
                        course.code,
                        idx + 1,
                        q.answer
                    )
                })?;
                let item = McqItem::new(q.question.as_str(), q.options.clone(), letter)
                    .with_context(|| format!("course {} question {}", course.code, idx + 1))?;
                target.add_item(item);
            }
        }
        tracing::debug!(courses = self.courses.len(), "catalog installed");
        Ok(())
    }
}

/// Parse a catalog file.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course code (if applicable).
    pub course_code: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate codes overwrite each other on install
    let mut seen = HashSet::new();
    for course in &catalog.courses {
        if !seen.insert(&course.code) {
            warnings.push(ValidationWarning {
                course_code: Some(course.code.clone()),
                message: format!("duplicate course code: {}", course.code),
            });
        }
    }

    for course in &catalog.courses {
        let warn = |message: String| ValidationWarning {
            course_code: Some(course.code.clone()),
            message,
        };

        if course.questions.is_empty() {
            warnings.push(warn("course has no questions".into()));
        }

        for (idx, q) in course.questions.iter().enumerate() {
            let n = idx + 1;
            if q.question.trim().is_empty() {
                warnings.push(warn(format!("question {n} is empty")));
            }
            if q.options.len() != STANDARD_OPTION_COUNT {
                warnings.push(warn(format!(
                    "question {n} has {} option(s), expected {STANDARD_OPTION_COUNT}",
                    q.options.len()
                )));
            }
            match q.answer_letter().and_then(letter_index) {
                Some(i) if i < q.options.len() => {}
                _ => warnings.push(warn(format!(
                    "question {n} answer {:?} does not match any option",
                    q.answer
                ))),
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[courses]]
code = "CS101"
name = "Data Structures"

[[courses.questions]]
question = "Which structure is FIFO?"
options = ["Stack", "Queue", "Tree", "Graph"]
answer = "B"

[[courses.questions]]
question = "Which structure is LIFO?"
options = ["Stack", "Queue", "Tree", "Graph"]
answer = "a"

[[courses]]
code = "CS102"
name = "Algorithms"

[[courses.questions]]
question = "Binary search runs in?"
options = ["O(n)", "O(log n)", "O(1)", "O(n^2)"]
answer = "B"
"#;

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("catalog.toml")).unwrap();
        assert_eq!(catalog.courses.len(), 2);
        assert_eq!(catalog.courses[0].code, "CS101");
        assert_eq!(catalog.courses[0].questions.len(), 2);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn install_into_manager() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("catalog.toml")).unwrap();
        let mut cm = CourseManager::new();
        catalog.install(&mut cm).unwrap();

        let ds = cm.get_course("CS101").unwrap();
        assert_eq!(ds.name(), "Data Structures");
        assert_eq!(ds.question_count(), 2);
        assert_eq!(ds.items()[1].correct_answer(), 'A');
        assert_eq!(cm.get_course("CS102").unwrap().question_count(), 1);
    }

    #[test]
    fn install_rejects_out_of_range_answer() {
        let toml = r#"
[[courses]]
code = "CS101"
name = "Data Structures"

[[courses.questions]]
question = "Q"
options = ["a", "b"]
answer = "D"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("bad.toml")).unwrap();
        let err = catalog.install(&mut CourseManager::new()).unwrap_err();
        assert!(format!("{err:#}").contains("CS101 question 1"));
    }

    #[test]
    fn validate_reports_problems() {
        let toml = r#"
[[courses]]
code = "CS101"
name = "Data Structures"

[[courses]]
code = "CS101"
name = "Again"

[[courses.questions]]
question = " "
options = ["a", "b"]
answer = "AB"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("bad.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        let has = |s: &str| warnings.iter().any(|w| w.message.contains(s));
        assert!(has("duplicate course code"));
        assert!(has("no questions"));
        assert!(has("question 1 is empty"));
        assert!(has("2 option(s)"));
        assert!(has("does not match any option"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_catalog_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        let catalog = parse_catalog(&path).unwrap();
        assert_eq!(catalog.courses[1].name, "Algorithms");

        assert!(parse_catalog(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn default_seed_matches_startup_courses() {
        let mut cm = CourseManager::new();
        Catalog::default_seed().install(&mut cm).unwrap();
        let names: Vec<_> = cm.list_courses().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Data Structures", "Algorithms"]);
    }
}
