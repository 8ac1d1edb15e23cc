/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question produced by the AI service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_index: usize,
    pub explanation: Option<String>,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Option text at `index`, if the index addresses one of the options.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}
