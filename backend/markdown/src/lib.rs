//! `cellmate-markdown` — segmentation of markdown LLM replies.
//!
//! Model replies interleave prose with fenced code blocks. This crate splits
//! a reply into typed segments and extracts the first code block together
//! with the remaining explanatory text.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

/// One contiguous piece of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose(String),
    Code { lang: String, source: String },
}

/// Split a markdown reply into prose and code segments, in document order.
///
/// Prose is kept as the original source text (offsets from the parser), so
/// inline formatting survives untouched.
pub fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0usize;
    let mut code: Option<(String, String)> = None;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                if code.is_none() {
                    push_prose(&mut segments, &text[cursor..range.start]);
                    cursor = range.end;
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().unwrap_or("").to_string()
                        }
                        CodeBlockKind::Indented => String::new(),
                    };
                    code = Some((lang, String::new()));
                }
            }
            Event::Text(chunk) => {
                if let Some((_, source)) = code.as_mut() {
                    source.push_str(&chunk);
                }
            }
            Event::End(Tag::CodeBlock(_)) => {
                if let Some((lang, source)) = code.take() {
                    segments.push(Segment::Code {
                        lang,
                        source: source.trim_end_matches('\n').to_string(),
                    });
                }
            }
            _ => {}
        }
    }
    push_prose(&mut segments, &text[cursor..]);
    segments
}

fn push_prose(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Prose(trimmed.to_string()));
    }
}

/// Extract the first fenced code block (if any) from a reply; the remaining
/// prose is joined as the explanatory text. Without a fence, the whole reply
/// is text and code is absent.
pub fn extract_code(text: &str) -> (Option<String>, String) {
    let mut code = None;
    let mut prose = Vec::new();
    for segment in split_segments(text) {
        match segment {
            Segment::Code { source, .. } if code.is_none() => code = Some(source),
            Segment::Code { source, lang } => {
                // Later blocks stay part of the explanation, re-fenced.
                prose.push(format!("```{}\n{}\n```", lang, source));
            }
            Segment::Prose(p) => prose.push(p),
        }
    }
    (code, prose.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_without_fence_is_all_text() {
        let (code, text) = extract_code("Gaussian blur smooths an image.");
        assert!(code.is_none());
        assert_eq!(text, "Gaussian blur smooths an image.");
    }

    #[test]
    fn single_fenced_block_is_extracted() {
        let reply = "Here you go:\n\n```python\ndef add(a, b):\n    return a + b\n```\n\nThis adds two numbers.";
        let (code, text) = extract_code(reply);
        assert_eq!(code.as_deref(), Some("def add(a, b):\n    return a + b"));
        assert!(text.contains("Here you go:"));
        assert!(text.contains("This adds two numbers."));
        assert!(!text.contains("def add"));
    }

    #[test]
    fn segments_preserve_document_order() {
        let reply = "Intro.\n\n```python\nx = 1\n```\n\nOutro.";
        let segments = split_segments(reply);
        assert_eq!(
            segments,
            vec![
                Segment::Prose("Intro.".into()),
                Segment::Code { lang: "python".into(), source: "x = 1".into() },
                Segment::Prose("Outro.".into()),
            ]
        );
    }

    #[test]
    fn second_block_stays_in_the_explanation() {
        let reply = "```python\nfirst = 1\n```\ntext\n```python\nsecond = 2\n```";
        let (code, text) = extract_code(reply);
        assert_eq!(code.as_deref(), Some("first = 1"));
        assert!(text.contains("second = 2"));
    }

    #[test]
    fn fence_language_is_captured() {
        let segments = split_segments("```bash\nls\n```");
        assert_eq!(
            segments,
            vec![Segment::Code { lang: "bash".into(), source: "ls".into() }]
        );
    }
}
