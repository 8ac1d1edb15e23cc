mod question;
mod result;

use std::fmt;

pub use question::{OPTION_COUNT, Question};
pub use result::{AnswerDetail, QuizResult, WrongAnswer, percentage};

/// Screen the session is currently on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Topic,
    Loading,
    Quiz,
    Result,
}

/// Difficulty requested from the question generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topics offered on the topic screen before the custom entry.
pub const PREDEFINED_TOPICS: [&str; 6] = [
    "JavaScript",
    "React",
    "Python",
    "TypeScript",
    "CSS",
    "Data Structures",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(2, 4), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_difficulty_names() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
