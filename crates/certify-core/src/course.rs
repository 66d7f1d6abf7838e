//! Courses, their question banks, and pass/fail scoring.

use crate::error::QuizError;
use crate::model::{letter_index, McqItem};
use crate::traits::{AnswerSource, QuestionPrompt};

/// Minimum percentage needed to pass. Inclusive.
pub const PASS_THRESHOLD: u32 = 50;

/// Result of attempting a course's question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Questions answered correctly.
    pub correct: usize,
    /// Questions asked.
    pub total: usize,
    /// `floor(100 * correct / total)`.
    pub percent: u32,
    /// `percent >= PASS_THRESHOLD`.
    pub passed: bool,
}

impl Score {
    /// Compute a score from raw counts. `total` must be non-zero.
    pub fn new(correct: usize, total: usize) -> Self {
        debug_assert!(total > 0, "score over an empty bank");
        debug_assert!(correct <= total);

        // Integer division floors, which is the rounding rule.
        let percent = u32::try_from(100 * correct / total.max(1)).unwrap_or(100);
        Self {
            correct,
            total,
            percent,
            passed: percent >= PASS_THRESHOLD,
        }
    }
}

/// A course with an ordered bank of multiple-choice questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    name: String,
    code: String,
    items: Vec<McqItem>,
}

impl Course {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn items(&self) -> &[McqItem] {
        &self.items
    }

    pub fn question_count(&self) -> usize {
        self.items.len()
    }

    /// Validate and append a question.
    pub fn add_question(
        &mut self,
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: char,
    ) -> Result<(), QuizError> {
        let item = McqItem::new(question, options, correct_answer)?;
        self.add_item(item);
        Ok(())
    }

    /// Append an already-validated question.
    pub fn add_item(&mut self, item: McqItem) {
        tracing::debug!(code = %self.code, question = %item.question(), "question added");
        self.items.push(item);
    }

    /// Ask every question in order and score the answers.
    ///
    /// Answers are compared case-insensitively. A missing answer, or a
    /// letter with no matching option, counts as wrong.
    pub fn attempt(&self, answers: &mut dyn AnswerSource) -> Result<Score, QuizError> {
        if self.items.is_empty() {
            return Err(QuizError::EmptyBank(self.code.clone()));
        }

        let total = self.items.len();
        let mut correct = 0;

        for (idx, item) in self.items.iter().enumerate() {
            let prompt = QuestionPrompt {
                course_name: &self.name,
                position: idx + 1,
                total,
                item,
            };

            let given = answers
                .answer(&prompt)
                .filter(|c| letter_index(*c).is_some_and(|i| i < item.options().len()));

            if given.is_some_and(|c| item.is_correct(c)) {
                correct += 1;
            }
        }

        let score = Score::new(correct, total);
        tracing::debug!(
            code = %self.code,
            correct,
            total,
            percent = score.percent,
            "course attempted"
        );
        Ok(score)
    }
}
