//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`SlidingWindowChunker`],
//! which splits a document's concatenated page text into overlapping
//! windows, breaking preferentially at paragraph, sentence, and word
//! boundaries before falling back to a hard character cut.

use crate::document::{Chunk, Document};

/// Separator inserted between consecutive page texts, and the paragraph
/// boundary the chunker prefers to break at.
const PAGE_SEPARATOR: &str = "\n\n";

/// Sentence-level boundaries, tried when no paragraph break fits.
const SENTENCE_BOUNDARIES: [&str; 4] = [". ", "! ", "? ", "\n"];

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and page metadata but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has no text; this is the
    /// non-fatal "no content" condition, not an error. Chunking is total
    /// and deterministic: identical input yields an identical sequence.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits concatenated page text into overlapping fixed-size windows.
///
/// Sizes are measured in characters, never bytes — extracted PDF text is
/// routinely non-ASCII and a window must not split a code point. Each
/// window after the first starts `chunk_overlap` characters before the
/// previous window's end, so consecutive chunks always share at least
/// `chunk_overlap` characters of content.
///
/// # Example
///
/// ```rust,ignore
/// use chatdocs_rag::SlidingWindowChunker;
///
/// let chunker = SlidingWindowChunker::new(1000, 200);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct SlidingWindowChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SlidingWindowChunker {
    /// Create a new `SlidingWindowChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of characters shared between consecutive
    ///   chunks; must be less than `chunk_size` (validated by
    ///   [`RagConfigBuilder`](crate::config::RagConfigBuilder))
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    /// Pick the window's end: the latest natural boundary inside it, or the
    /// hard cut when no boundary leaves the end more than `chunk_overlap`
    /// characters past the window start (anything earlier would stall the
    /// stride).
    fn window_end(&self, text: &str, boundaries: &[usize], start: usize, hard_end: usize) -> usize {
        let window = &text[boundaries[start]..boundaries[hard_end]];
        let min_end = start + self.chunk_overlap + 1;

        for group in [&[PAGE_SEPARATOR][..], &SENTENCE_BOUNDARIES[..], &[" "][..]] {
            let mut best: Option<usize> = None;
            for separator in group {
                if let Some(pos) = window.rfind(separator) {
                    // Separators are ASCII, so the byte offset lands on a
                    // char boundary present in `boundaries`.
                    let byte_end = boundaries[start] + pos + separator.len();
                    let char_end = boundaries.partition_point(|&b| b < byte_end);
                    if char_end >= min_end {
                        best = Some(best.map_or(char_end, |b| b.max(char_end)));
                    }
                }
            }
            if let Some(end) = best {
                return end;
            }
        }

        hard_end
    }
}

/// Join page texts with the page separator, recording the character offset
/// at which each page starts. Empty pages contribute no text but keep a
/// start offset so page attribution stays aligned.
fn concatenate_pages(pages: &[String]) -> (String, Vec<usize>) {
    let mut text = String::new();
    let mut page_starts = Vec::with_capacity(pages.len());
    let mut chars = 0usize;

    for page in pages {
        if page.is_empty() {
            page_starts.push(chars);
            continue;
        }
        if !text.is_empty() {
            text.push_str(PAGE_SEPARATOR);
            chars += PAGE_SEPARATOR.len();
        }
        page_starts.push(chars);
        text.push_str(page);
        chars += page.chars().count();
    }

    (text, page_starts)
}

/// 1-based page containing the given character offset.
fn page_of(page_starts: &[usize], offset: usize) -> usize {
    page_starts.partition_point(|&start| start <= offset).max(1)
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let (text, page_starts) = concatenate_pages(&document.pages);
        if text.is_empty() || self.chunk_size == 0 {
            return Vec::new();
        }

        // Byte offset of every char boundary, with the total length
        // appended, so `boundaries[i]` is where the i-th character starts.
        let boundaries: Vec<usize> =
            text.char_indices().map(|(b, _)| b).chain(std::iter::once(text.len())).collect();
        let total_chars = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut chunk_index = 0usize;

        while start < total_chars {
            let hard_end = (start + self.chunk_size).min(total_chars);
            let end = if hard_end < total_chars {
                self.window_end(&text, &boundaries, start, hard_end)
            } else {
                hard_end
            };

            chunks.push(Chunk {
                id: format!("{}_{chunk_index}", document.id),
                text: text[boundaries[start]..boundaries[end]].to_string(),
                embedding: Vec::new(),
                page: page_of(&page_starts, start),
                chunk_index,
                document_id: document.id.clone(),
            });
            chunk_index += 1;

            if end == total_chars {
                break;
            }
            let next = end.saturating_sub(self.chunk_overlap);
            if next <= start {
                break;
            }
            start = next;
        }

        chunks
    }
}
