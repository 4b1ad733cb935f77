//! Recursive, boundary-preferring document chunking.
//!
//! [`RecursiveChunker`] splits text hierarchically: paragraph breaks
//! first, then line breaks, then sentence-ending punctuation, then plain
//! spaces, with a hard character split only when no separator fits
//! within the chunk budget. Consecutive chunks share roughly
//! `chunk_overlap` characters so context survives chunk boundaries.

use crate::document::{Chunk, Document};

/// Separator preference order: paragraph → line → sentence → word.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits text hierarchically with a carried overlap between chunks.
///
/// Chunk IDs are generated as `{document_id}_{chunk_index}`. Every chunk
/// is an exact substring of the source text, cut on UTF-8 character
/// boundaries, and no longer than `chunk_size` bytes.
///
/// # Example
///
/// ```rust,ignore
/// use faqkit_rag::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(500, 50);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of characters adjacent chunks share
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Each
    /// returned chunk has an empty embedding vector; embeddings are
    /// attached later by the index builder.
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let atoms = split_atoms(&document.text, self.chunk_size, &SEPARATORS);
        let pieces = merge_atoms(atoms, self.chunk_size, self.chunk_overlap);

        pieces
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk {
                id: format!("{}_{i}", document.id),
                document_id: document.id.clone(),
                chunk_index: i,
                text,
                embedding: Vec::new(),
            })
            .collect()
    }
}

/// Split text into atoms no longer than `chunk_size`, descending through
/// the separator hierarchy and hard-splitting as a last resort.
fn split_atoms(text: &str, chunk_size: usize, separators: &[&str]) -> Vec<String> {
    if text.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let Some((separator, remaining)) = separators.split_first() else {
        return hard_split(text, chunk_size);
    };

    let segments = split_keeping_separator(text, separator);
    if segments.len() <= 1 {
        // Separator absent — try the next one down.
        return split_atoms(text, chunk_size, remaining);
    }

    let mut atoms = Vec::new();
    for segment in segments {
        if segment.len() <= chunk_size {
            atoms.push(segment.to_string());
        } else {
            atoms.extend(split_atoms(segment, chunk_size, remaining));
        }
    }
    atoms
}

/// Greedily merge atoms into chunks within `chunk_size`, seeding each
/// new chunk with the tail of its predecessor. The seed is dropped when
/// it would push the chunk over budget, so the overlap bound is soft.
fn merge_atoms(atoms: Vec<String>, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for atom in atoms {
        if !current.is_empty() && current.len() + atom.len() > chunk_size {
            let seed = tail(&current, chunk_overlap).to_string();
            chunks.push(std::mem::take(&mut current));
            if seed.len() + atom.len() <= chunk_size {
                current = seed;
            }
        }
        current.push_str(&atom);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split text at a separator while keeping the separator attached to the
/// preceding segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Character-boundary-safe splitting into pieces of at most `chunk_size`
/// bytes. Used only when no separator exists within the budget.
fn hard_split(text: &str, chunk_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // A single character wider than the budget; emit it whole.
            end = start + text[start..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
        pieces.push(text[start..end].to_string());
        start = end;
    }

    pieces
}

/// The trailing at-most-`max_bytes` of `s`, cut on a character boundary.
fn tail(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("faq", text)
    }

    #[test]
    fn small_text_yields_single_chunk() {
        let chunks = RecursiveChunker::new(500, 50).chunk(&doc("Hello, world!"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Hello, world!");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].id, "faq_0");
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = RecursiveChunker::new(500, 50).chunk(&doc(""));
        assert!(chunks.is_empty());
    }

    #[test]
    fn chunks_respect_size_budget() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunks = RecursiveChunker::new(100, 20).chunk(&doc(&text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.len() <= 100, "chunk of {} bytes exceeds budget", chunk.text.len());
        }
    }

    #[test]
    fn adjacent_chunks_share_overlap() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliett kilo \
                    lima mike november oscar papa quebec romeo sierra tango uniform victor";
        let chunks = RecursiveChunker::new(40, 10).chunk(&doc(text));
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let shared = tail(&pair[0].text, 10);
            assert!(
                pair[1].text.starts_with(shared),
                "chunk {:?} does not continue from {:?}",
                pair[1].text,
                shared
            );
        }
    }

    #[test]
    fn prefers_paragraph_boundaries() {
        let text = "First paragraph with some words in it.\n\nSecond paragraph, also short.\n\n\
                    Third paragraph rounds things out nicely.";
        let chunks = RecursiveChunker::new(60, 0).chunk(&doc(text));
        assert!(chunks.len() > 1);
        // Every non-final chunk ends exactly at a paragraph break.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.text.ends_with("\n\n"), "chunk {:?} cut mid-paragraph", chunk.text);
        }
    }

    #[test]
    fn hard_split_when_no_separator_fits() {
        let text = "x".repeat(95);
        let chunks = RecursiveChunker::new(30, 0).chunk(&doc(&text));
        assert_eq!(chunks.len(), 4);
        for chunk in &chunks {
            assert!(chunk.text.len() <= 30);
        }
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "géométrie élémentaire ".repeat(20);
        let chunks = RecursiveChunker::new(50, 10).chunk(&doc(&text));
        for chunk in &chunks {
            assert!(chunk.text.len() <= 50);
            assert!(text.contains(&chunk.text));
        }
    }

    #[test]
    fn chunk_indices_are_contiguous() {
        let text = "one two three four five six seven eight nine ten ".repeat(10);
        let chunks = RecursiveChunker::new(80, 10).chunk(&doc(&text));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.id, format!("faq_{i}"));
            assert!(chunk.embedding.is_empty());
        }
    }
}
