use std::fmt::Write;

use crate::models::{Difficulty, WrongAnswer};

/// Instruction asking for `count` questions about `topic` as a bare JSON object.
pub fn quiz_prompt(topic: &str, count: usize, difficulty: Difficulty) -> String {
    format!(
        r#"Generate exactly {count} multiple choice questions about "{topic}" at {difficulty} difficulty level.

Return ONLY a valid JSON object with this exact structure (no markdown, no code blocks, no commentary):
{{
  "questions": [
    {{
      "id": "q1",
      "question": "Your question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctIndex": 0,
      "explanation": "Brief explanation of why this answer is correct"
    }}
  ]
}}

Requirements:
- Each question must have exactly 4 options
- correctIndex is 0-based (0, 1, 2, or 3)
- Every id must be unique and non-empty
- Questions should be educational and accurate
- Explanations should be concise but helpful
- Make questions progressively challenging
- Ensure only one correct answer per question
"#
    )
}

/// Instruction asking for personalized feedback on a finished quiz.
pub fn feedback_prompt(
    topic: &str,
    score: usize,
    total: usize,
    percentage: u32,
    wrong_answers: &[WrongAnswer],
) -> String {
    let mut missed = String::new();
    if wrong_answers.is_empty() {
        missed.push_str("All questions were answered correctly!\n");
    } else {
        missed.push_str("Questions answered incorrectly:\n");
        for (i, wrong) in wrong_answers.iter().enumerate() {
            let _ = writeln!(
                missed,
                "{}. \"{}\"\n   - User answered: \"{}\"\n   - Correct answer: \"{}\"",
                i + 1,
                wrong.question,
                wrong.user_answer,
                wrong.correct_answer
            );
        }
    }

    format!(
        r#"Generate personalized feedback for a quiz result.

Topic: {topic}
Score: {score}/{total} ({percentage}%)

{missed}
Return ONLY a valid JSON object (no markdown, no code blocks, no commentary):
{{
  "feedback": "Your personalized feedback message here"
}}

Requirements:
- Be encouraging and constructive
- If score is high (80% or more), celebrate the achievement
- If score is medium (50-79%), acknowledge effort and suggest areas to review
- If score is low (below 50%), be motivating and offer specific study tips
- Reference the topic and specific concepts if possible
- Keep feedback to 2-3 sentences, friendly tone
- Use 1-2 relevant emojis
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_embeds_parameters() {
        let prompt = quiz_prompt("Rust lifetimes", 5, Difficulty::Hard);
        assert!(prompt.contains("exactly 5 multiple choice questions"));
        assert!(prompt.contains("\"Rust lifetimes\""));
        assert!(prompt.contains("hard difficulty"));
        assert!(prompt.contains("\"correctIndex\": 0"));
    }

    #[test]
    fn test_feedback_prompt_lists_missed_questions() {
        let wrong = vec![WrongAnswer {
            question: "Which keyword moves a value into a closure?".into(),
            user_answer: "Not answered".into(),
            correct_answer: "move".into(),
        }];
        let prompt = feedback_prompt("Rust", 3, 4, 75, &wrong);
        assert!(prompt.contains("Score: 3/4 (75%)"));
        assert!(prompt.contains("1. \"Which keyword moves a value into a closure?\""));
        assert!(prompt.contains("User answered: \"Not answered\""));
        assert!(prompt.contains("Correct answer: \"move\""));
    }

    #[test]
    fn test_feedback_prompt_perfect_score() {
        let prompt = feedback_prompt("CSS", 5, 5, 100, &[]);
        assert!(prompt.contains("All questions were answered correctly!"));
        assert!(!prompt.contains("answered incorrectly"));
    }
}
