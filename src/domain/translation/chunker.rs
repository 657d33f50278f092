/// Default per-call chunk size for the translation provider.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4500;

/// Split text into ordered chunks of at most `max_len` characters, breaking
/// only on newlines.
///
/// A paragraph longer than `max_len` is never split and becomes a chunk of its
/// own. Joining the result with `\n` always reproduces `text`.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    if char_len(text) <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for paragraph in text.split('\n') {
        let paragraph_len = char_len(paragraph);

        if !current.is_empty() && current_len + paragraph_len + 1 > max_len {
            chunks.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }

        current.push(paragraph);
        current_len += paragraph_len + 1;
    }

    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }

    chunks
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
