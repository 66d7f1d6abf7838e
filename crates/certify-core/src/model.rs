//! Core data model types for certify.
//!
//! Multiple-choice items and the option-letter conventions they use.

use std::fmt;

use crate::error::QuizError;

/// Number of options the console authoring flow asks for per question.
pub const STANDARD_OPTION_COUNT: usize = 4;

/// Letter label for the option at `index` (`0 → 'A'`). `None` past `'Z'`.
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// Option index for a letter, case-insensitive (`'b' → 1`).
pub fn letter_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| usize::from(upper as u8 - b'A'))
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqItem {
    question: String,
    options: Vec<String>,
    correct_answer: char,
}

impl McqItem {
    /// Build a validated item. The answer letter is stored upper-cased and
    /// must name one of `options`.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: char,
    ) -> Result<Self, QuizError> {
        if options.is_empty() {
            return Err(QuizError::EmptyOptions);
        }

        let answer = correct_answer.to_ascii_uppercase();
        match letter_index(answer) {
            Some(idx) if idx < options.len() => Ok(Self {
                question: question.into(),
                options,
                correct_answer: answer,
            }),
            _ => Err(QuizError::AnswerOutOfRange {
                answer: correct_answer,
                option_count: options.len(),
            }),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> char {
        self.correct_answer
    }

    /// Whether `given` is the correct letter, ignoring case.
    pub fn is_correct(&self, given: char) -> bool {
        given.to_ascii_uppercase() == self.correct_answer
    }
}

impl fmt::Display for McqItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.question)?;
        for (idx, option) in self.options.iter().enumerate() {
            let letter = option_letter(idx).unwrap_or('?');
            writeln!(f, "{letter}) {option}")?;
        }
        Ok(())
    }
}
