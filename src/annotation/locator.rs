use super::{AnnotationError, AnnotationSpan};

/// Find every `{...}` annotation in `text`, left to right.
///
/// A single cursor walks the original string, so every reported offset is
/// absolute. Scanning resumes right after each closing brace, so spans never
/// overlap. An opening brace without a closing brace after it fails with
/// [`AnnotationError::UnmatchedBrace`].
pub fn locate_annotations(text: &str) -> Result<Vec<AnnotationSpan>, AnnotationError> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find('{') {
        let start = cursor + found;
        let end = match text[start..].find('}') {
            Some(close) => start + close,
            None => {
                return Err(AnnotationError::UnmatchedBrace {
                    offset: start,
                    text: text[start..].to_string(),
                })
            }
        };

        spans.push(AnnotationSpan { start, end });
        // '}' is one byte, so end + 1 is always a char boundary
        cursor = end + 1;
    }

    Ok(spans)
}
