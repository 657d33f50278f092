use regex::Regex;
use std::sync::OnceLock;

/// Split text into provider-sized batches of at most `max_chars` characters.
///
/// Sentence boundaries are preferred, then whitespace; a single word longer
/// than the limit is split by characters. Batches are trimmed and never empty.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut last_end = 0;

    let mut sentences: Vec<&str> = sentence_boundary()
        .find_iter(text)
        .map(|mat| {
            let sentence = &text[last_end..mat.end()];
            last_end = mat.end();
            sentence
        })
        .collect();
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    for sentence in sentences {
        // If adding this sentence would exceed the limit, save current batch
        if !current_batch.is_empty() && char_len(&current_batch) + char_len(sentence) > max_chars {
            push_trimmed(&mut batches, &current_batch);
            current_batch.clear();
        }

        if char_len(sentence) > max_chars {
            split_by_words(sentence, max_chars, &mut batches);
        } else {
            current_batch.push_str(sentence);
        }
    }

    push_trimmed(&mut batches, &current_batch);
    batches
}

fn split_by_words(sentence: &str, max_chars: usize, batches: &mut Vec<String>) {
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        let separator = usize::from(!current.is_empty());
        if char_len(&current) + separator + char_len(word) <= max_chars {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        push_trimmed(batches, &current);
        current.clear();

        if char_len(word) > max_chars {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                batches.push(piece.iter().collect());
            }
        } else {
            current.push_str(word);
        }
    }

    push_trimmed(batches, &current);
}

fn push_trimmed(batches: &mut Vec<String>, batch: &str) {
    let trimmed = batch.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Sentence-ending punctuation (Latin and Devanagari danda) plus trailing whitespace
fn sentence_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?।॥]+\s+").unwrap())
}
