/// Per-question outcome, captured once at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDetail {
    pub question_id: String,
    pub question: String,
    pub selected_index: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Scored outcome of one quiz attempt.
///
/// Everything except `feedback` is fixed at submission; the feedback text is
/// filled in later by the asynchronous feedback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub feedback: String,
    pub answers: Vec<AnswerDetail>,
    pub time_taken_secs: u64,
}

/// A question the user missed, as described to the feedback prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongAnswer {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

/// Rounded percentage of `score` out of `total`; zero for an empty quiz.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}
