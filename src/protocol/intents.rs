use serde::{Deserialize, Serialize};

/// A user action, forwarded unmodified from the view.
///
/// Serialized as JSON tagged by `type`, so a renderer on the far side of a
/// channel can send the same values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// Start a quiz on `topic`.
    SelectTopic { topic: String, timer_enabled: bool },

    /// Choose an option for the current question.
    SelectAnswer { index: usize },

    Next,
    Prev,
    Submit,

    /// The per-question timer ran out.
    TimeUp,

    /// Regenerate a quiz on the same topic.
    Retry,

    /// Discard the finished quiz and pick another topic.
    NewTopic,

    DismissError,
}
