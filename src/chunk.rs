//! Recursive character text splitting.
//!
//! Splits document text into overlapping chunks for indexing: paragraph
//! breaks first, then line breaks, then word breaks, then a hard character
//! split for anything still over size. Sizes are in bytes; splits happen at
//! separator or char boundaries so chunks stay valid UTF-8.

use crate::config::ChunkingConfig;

/// Separator cascade, coarsest first.
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Split `text` into chunks of at most `chunk_size` bytes, with roughly
/// `chunk_overlap` bytes of trailing context carried into the next chunk.
/// Whitespace-only fragments are dropped; output order follows the input.
pub fn split_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let size = config.chunk_size.max(1);
    let overlap = config.chunk_overlap.min(size / 2);

    let mut chunks = Vec::new();
    split_recursive(text, SEPARATORS, size, overlap, &mut chunks);
    chunks
}

fn split_recursive(text: &str, seps: &[&str], size: usize, overlap: usize, out: &mut Vec<String>) {
    if text.len() <= size {
        push_chunk(text, out);
        return;
    }
    let Some((sep, rest)) = seps.split_first() else {
        hard_split(text, size, overlap, out);
        return;
    };
    if !text.contains(sep) {
        split_recursive(text, rest, size, overlap, out);
        return;
    }

    // Separators stay attached to the preceding piece, so concatenating a
    // window of pieces reconstructs the source text exactly.
    let mut window: Vec<&str> = Vec::new();
    let mut window_len = 0usize;

    for piece in text.split_inclusive(sep) {
        if piece.len() > size {
            flush_window(&mut window, &mut window_len, out);
            split_recursive(piece, rest, size, overlap, out);
            continue;
        }
        if !window.is_empty() && window_len + piece.len() > size {
            push_chunk(&window.concat(), out);
            // Keep a tail as lead-in for the next chunk: within the overlap
            // budget, and small enough that the incoming piece still fits.
            while !window.is_empty()
                && (window_len > overlap || window_len + piece.len() > size)
            {
                window_len -= window.remove(0).len();
            }
        }
        window.push(piece);
        window_len += piece.len();
    }
    flush_window(&mut window, &mut window_len, out);
}

fn flush_window(window: &mut Vec<&str>, window_len: &mut usize, out: &mut Vec<String>) {
    if !window.is_empty() {
        push_chunk(&window.concat(), out);
        window.clear();
        *window_len = 0;
    }
}

fn push_chunk(text: &str, out: &mut Vec<String>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Fixed-stride split for text with no usable separators (one giant token).
fn hard_split(text: &str, size: usize, overlap: usize, out: &mut Vec<String>) {
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end <= start {
            // A single char wider than `size`; take it whole.
            end = (start + 1..=text.len())
                .find(|&i| text.is_char_boundary(i))
                .unwrap_or(text.len());
        }
        push_chunk(&text[start..end], out);
        if end == text.len() {
            break;
        }
        let mut next = end.saturating_sub(overlap).max(start + 1);
        while !text.is_char_boundary(next) {
            next += 1;
        }
        start = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(chunk_size: usize, chunk_overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            chunk_overlap,
        }
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_text("just a short note", &cfg(1000, 200));
        assert_eq!(chunks, vec!["just a short note"]);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(split_text("   \n\n  \n ", &cfg(100, 10)).is_empty());
        assert!(split_text("", &cfg(100, 10)).is_empty());
    }

    #[test]
    fn splits_on_paragraphs_first() {
        let chunks = split_text("first paragraph\n\nsecond paragraph", &cfg(20, 0));
        assert_eq!(chunks, vec!["first paragraph", "second paragraph"]);
    }

    #[test]
    fn word_level_split_with_overlap() {
        let chunks = split_text("aaa bbb ccc ddd eee", &cfg(11, 4));
        assert_eq!(chunks, vec!["aaa bbb", "bbb ccc", "ccc ddd eee"]);
    }

    #[test]
    fn chunks_never_exceed_size() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(40);
        let config = cfg(100, 20);
        let chunks = split_text(&text, &config);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 100, "chunk too long: {} bytes", chunk.len());
        }
    }

    #[test]
    fn unbroken_text_is_hard_split() {
        let chunks = split_text("abcdefghij", &cfg(4, 1));
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn hard_split_respects_char_boundaries() {
        // Multibyte chars; size 4 bytes cannot bisect a 3-byte char.
        let chunks = split_text("日本語の文", &cfg(4, 0));
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() >= 1);
        }
        assert_eq!(chunks.concat(), "日本語の文");
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "alpha beta\ngamma delta\n\nepsilon zeta eta theta ".repeat(10);
        let config = cfg(60, 15);
        assert_eq!(split_text(&text, &config), split_text(&text, &config));
    }

    #[test]
    fn overlap_carries_context_forward() {
        let chunks = split_text("aaa bbb ccc ddd eee", &cfg(11, 4));
        // "bbb" ends chunk 0 and leads chunk 1.
        assert!(chunks[0].ends_with("bbb"));
        assert!(chunks[1].starts_with("bbb"));
    }
}
