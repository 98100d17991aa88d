use crate::error::AssistantError;

/// The four task categories the classification call can select.
///
/// Discriminants are part of the classification prompt contract: the model
/// is asked to reply with the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TaskKind {
    CodeGeneration = 1,
    TextResponse = 2,
    NotebookGeneration = 3,
    NotebookModification = 4,
}

impl TaskKind {
    /// Parse a raw classification reply into a task kind.
    ///
    /// Takes the leading numeral before the first `.` of the trimmed reply,
    /// so `"1. Code generation"` and `"1"` both parse. A reply that does not
    /// start with an integer is a hard, typed failure for the invocation.
    /// Integers other than 3 and 4 all land on the conversational code/text
    /// path, so a model drifting outside the listed numbers still gets a
    /// regular response.
    pub fn parse_reply(reply: &str) -> Result<Self, AssistantError> {
        let leading = reply.trim().split('.').next().unwrap_or("").trim();
        let number = leading.parse::<i32>().map_err(|_| {
            AssistantError::UnparseableClassification { reply: reply.to_string() }
        })?;
        Ok(match number {
            1 => TaskKind::CodeGeneration,
            3 => TaskKind::NotebookGeneration,
            4 => TaskKind::NotebookModification,
            _ => TaskKind::TextResponse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeral_with_trailing_label() {
        assert_eq!(TaskKind::parse_reply("1. Code generation").unwrap(), TaskKind::CodeGeneration);
        assert_eq!(TaskKind::parse_reply("2. Text response").unwrap(), TaskKind::TextResponse);
    }

    #[test]
    fn parses_bare_numeral() {
        assert_eq!(TaskKind::parse_reply("3").unwrap(), TaskKind::NotebookGeneration);
        assert_eq!(TaskKind::parse_reply("  4\n").unwrap(), TaskKind::NotebookModification);
    }

    #[test]
    fn rejects_non_numeric_reply() {
        let err = TaskKind::parse_reply("banana").unwrap_err();
        assert!(matches!(err, AssistantError::UnparseableClassification { .. }));
    }

    #[test]
    fn unlisted_numeral_falls_back_to_text_response() {
        assert_eq!(TaskKind::parse_reply("5. Something else").unwrap(), TaskKind::TextResponse);
        assert_eq!(TaskKind::parse_reply("0").unwrap(), TaskKind::TextResponse);
    }
}
