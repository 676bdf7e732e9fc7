//! Splitting long answers into message-sized pieces.

/// Split `text` into contiguous slices of at most `limit` characters.
///
/// Splits fall on character boundaries with no attempt to avoid breaking a
/// word. Concatenating the result gives back `text` exactly. A `limit` of zero
/// is treated as one. Empty text yields no chunks.
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(text.len() / limit + 1);
    let mut current = String::new();
    let mut count = 0usize;

    for c in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// An answer split for a size-limited text channel.
///
/// Delivery can restart from any chunk index, so a partially sent answer can
/// be resumed without re-chunking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedText {
    chunks: Vec<String>,
    limit: usize,
}

impl ChunkedText {
    pub fn new(text: &str, limit: usize) -> Self {
        Self {
            chunks: chunk(text, limit),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Chunks from `index` onward.
    pub fn resume_from(&self, index: usize) -> &[String] {
        &self.chunks[index.min(self.chunks.len())..]
    }

    /// Concatenation of all chunks.
    pub fn reassemble(&self) -> String {
        self.chunks.concat()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let answer = "A1: 4\nA2: Paris";
        assert_eq!(chunk(answer, 2800), vec![answer.to_string()]);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(chunk("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(chunk("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(chunk("", 10).is_empty());
        assert!(ChunkedText::new("", 10).is_empty());
    }

    #[test]
    fn test_zero_limit_treated_as_one() {
        assert_eq!(chunk("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_multibyte_counts_characters() {
        let text = "π≈3.14159 and e≈2.71828 → 🎓";
        for limit in 1..=text.chars().count() + 1 {
            let chunks = chunk(text, limit);
            assert_eq!(chunks.concat(), text);
            assert!(chunks.iter().all(|c| c.chars().count() <= limit));
        }
    }

    #[test]
    fn test_reassembly_across_lengths_and_limits() {
        let base = "The mitochondria is the powerhouse of the cell.\n\n";
        for repeat in [0usize, 1, 7, 120] {
            let text = base.repeat(repeat);
            for limit in [1usize, 2, 5, 49, 50, 2800] {
                let chunks = chunk(&text, limit);
                assert_eq!(chunks.concat(), text, "repeat={repeat} limit={limit}");
                assert!(chunks.iter().all(|c| !c.is_empty() && c.chars().count() <= limit));
                // Only the last chunk may be short.
                if let Some((_, head)) = chunks.split_last() {
                    assert!(head.iter().all(|c| c.chars().count() == limit));
                }
            }
        }
    }

    #[test]
    fn test_resume_from() {
        let chunked = ChunkedText::new("aaabbbcc", 3);
        assert_eq!(chunked.len(), 3);
        assert_eq!(chunked.resume_from(1), &["bbb".to_string(), "cc".to_string()]);
        assert!(chunked.resume_from(9).is_empty());
        assert_eq!(chunked.reassemble(), "aaabbbcc");
    }
}
