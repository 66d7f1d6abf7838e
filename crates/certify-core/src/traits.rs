//! The answer-source seam between the scoring core and whoever is taking
//! the quiz.
//!
//! The console binary implements [`AnswerSource`] over stdin; tests and
//! benches use [`ScriptedAnswers`].

use std::collections::VecDeque;

use crate::model::McqItem;

/// What the answer source is shown for one question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionPrompt<'a> {
    /// Name of the course being attempted.
    pub course_name: &'a str,
    /// 1-based position of this question in the bank.
    pub position: usize,
    /// Number of questions in the bank.
    pub total: usize,
    /// The question itself.
    pub item: &'a McqItem,
}

impl QuestionPrompt<'_> {
    pub fn question(&self) -> &str {
        self.item.question()
    }

    pub fn options(&self) -> &[String] {
        self.item.options()
    }
}

/// Supplies one answer letter per question during an attempt.
///
/// `None` means no answer was given; it is scored as incorrect.
pub trait AnswerSource {
    fn answer(&mut self, prompt: &QuestionPrompt<'_>) -> Option<char>;
}

/// Replays a fixed sequence of letters, then answers `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<char>,
    asked: usize,
}

impl ScriptedAnswers {
    pub fn new(answers: impl IntoIterator<Item = char>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: 0,
        }
    }

    /// Build from a string of letters, e.g. `"ABCD"`.
    pub fn from_letters(letters: &str) -> Self {
        Self::new(letters.chars())
    }

    /// Number of prompts received so far.
    pub fn asked(&self) -> usize {
        self.asked
    }

    /// Letters not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn answer(&mut self, _prompt: &QuestionPrompt<'_>) -> Option<char> {
        self.asked += 1;
        self.answers.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> McqItem {
        McqItem::new("Q", vec!["a".into(), "b".into()], 'A').unwrap()
    }

    #[test]
    fn scripted_answers_replay_then_run_dry() {
        let item = item();
        let prompt = QuestionPrompt {
            course_name: "Course",
            position: 1,
            total: 1,
            item: &item,
        };
        let mut answers = ScriptedAnswers::from_letters("ab");
        assert_eq!(answers.answer(&prompt), Some('a'));
        assert_eq!(answers.answer(&prompt), Some('b'));
        assert_eq!(answers.answer(&prompt), None);
        assert_eq!(answers.asked(), 3);
        assert_eq!(answers.remaining(), 0);
    }
}
