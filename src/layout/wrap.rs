//! Fixed-column word wrapping for body text.
//!
//! A greedy paragraph filler:
//!
//! - tabs expand to 8-column stops, then every whitespace character becomes
//!   a space (runs inside a line are kept)
//! - words break after a hyphen between letters (`farmers-market`)
//! - whitespace at the edges of continuation lines is dropped
//! - a chunk wider than a line is cut to fill the room left on the current
//!   line, preferring the last hyphen that fits

use textwrap::{WordSeparator, WordSplitter};

/// Tab stop width used when expanding tabs.
const TAB_SIZE: usize = 8;

/// Wrap `text` into lines of at most `width` characters.
///
/// Whitespace-only input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let normalized = normalize_whitespace(text);
    let mut chunks = chunks(&normalized);
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<&str> = Vec::new();
        let mut line_len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space(c)) {
            chunks.pop();
        }

        while let Some(&chunk) = chunks.last() {
            let len = char_len(chunk);
            if line_len + len > width {
                break;
            }
            line.push(chunk);
            line_len += len;
            chunks.pop();
        }

        if let Some(chunk) = chunks.last_mut() {
            let current = *chunk;
            if char_len(current) > width {
                let (head, tail) = break_long_chunk(current, width - line_len);
                if !head.is_empty() {
                    line.push(head);
                }
                *chunk = tail;
            }
        }

        if line.last().is_some_and(|c| is_space(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat());
        }
    }

    lines
}

/// Expand tabs, then turn every ASCII whitespace character into a space.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.push_str(&" ".repeat(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Split normalized text into word fragments and whitespace runs, in order.
fn chunks(text: &str) -> Vec<&str> {
    let splitter = WordSplitter::HyphenSplitter;
    let mut chunks = Vec::new();

    for word in WordSeparator::AsciiSpace.find_words(text) {
        let mut start = 0;
        for split in splitter.split_points(word.word) {
            if breaks_after_hyphen(word.word, split) {
                chunks.push(&word.word[start..split]);
                start = split;
            }
        }
        if start < word.word.len() {
            chunks.push(&word.word[start..]);
        }
        if !word.whitespace.is_empty() {
            chunks.push(word.whitespace);
        }
    }

    chunks
}

/// Whether the hyphen ending at byte `split` is a break opportunity: two
/// letters (or `x-y`) before it, and two letters (optionally hyphen-joined)
/// after it. Digits never count as letters.
fn breaks_after_hyphen(word: &str, split: usize) -> bool {
    let letter = |c: char| c.is_alphabetic() || c == '_';
    let before: Vec<char> = word[..split - 1].chars().rev().take(3).collect();
    let after: Vec<char> = word[split..].chars().take(3).collect();

    let preceded = match before.as_slice() {
        [a, b, ..] if letter(*a) && letter(*b) => true,
        [a, '-', b] => letter(*a) && letter(*b),
        _ => false,
    };
    let followed = match after.as_slice() {
        [a, '-', b] => letter(*a) && letter(*b),
        [a, b, ..] => letter(*a) && letter(*b),
        _ => false,
    };
    preceded && followed
}

/// Cut a chunk that is wider than a whole line, taking at most `room`
/// characters (at least one). Breaks after the last hyphen within reach when
/// something other than hyphens precedes it.
fn break_long_chunk(chunk: &str, room: usize) -> (&str, &str) {
    let room = room.max(1);
    let prefix: Vec<char> = chunk.chars().take(room).collect();
    let end = match prefix.iter().rposition(|&c| c == '-') {
        Some(hyphen) if hyphen > 0 && prefix[..hyphen].iter().any(|&c| c != '-') => hyphen + 1,
        _ => room,
    };
    split_at_char(chunk, end)
}

fn is_space(chunk: &str) -> bool {
    chunk.starts_with(' ')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap("Hello world", 40), vec!["Hello world"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(wrap("", 40).is_empty());
        assert!(wrap("  \n\t ", 40).is_empty());
    }

    #[test]
    fn test_greedy_fill() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running far away";
        let lines = wrap(text, 40);
        assert_eq!(
            lines,
            vec![
                "The quick brown fox jumps over the lazy",
                "dog and keeps running far away",
            ]
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn test_whitespace_normalized() {
        assert_eq!(wrap("one\ntwo", 40), vec!["one two"]);
        // The tab after "b" expands to the next 8-column stop
        assert_eq!(wrap("a\n\nb\t  c", 40), vec!["a  b         c"]);
    }

    #[test]
    fn test_breaks_after_hyphen() {
        assert_eq!(wrap("aaaa-bbbb cc", 6), vec!["aaaa-", "bbbb", "cc"]);
        assert_eq!(
            wrap(
                "Visit our community-supported farmers-market-and-crafts-fair this weekend downtown",
                40
            ),
            vec![
                "Visit our community-supported farmers-",
                "market-and-crafts-fair this weekend",
                "downtown",
            ]
        );
    }

    #[test]
    fn test_no_break_after_hyphen_between_digits_or_single_letters() {
        assert_eq!(wrap("a-bcdef gh", 7), vec!["a-bcdef", "gh"]);
        assert_eq!(wrap("12-345678", 5), vec!["12-", "34567", "8"]);
    }

    #[test]
    fn test_long_word_fills_current_line() {
        let lines = wrap("ab cdefghijkl", 6);
        assert_eq!(lines, vec!["ab cde", "fghijk", "l"]);
    }

    #[test]
    fn test_long_word_alone() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_counts_chars() {
        let lines = wrap("ééééé ééééé", 5);
        assert_eq!(lines, vec!["ééééé", "ééééé"]);
    }

    #[test]
    fn test_rewrap_is_idempotent() {
        let samples = [
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
            "short",
            "supercalifragilisticexpialidocious-and-then-some-more-characters words after it",
            "Visit our community-supported farmers-market-and-crafts-fair this weekend downtown",
            "x yy zzz multiple spaces and tabs and a line that is exactly forty chars long!!",
        ];
        for text in samples {
            let once = wrap(text, 40);
            let twice = wrap(&once.join(" "), 40);
            assert_eq!(once, twice, "rewrapping changed the lines of {:?}", text);
        }
    }
}
