//! Delimiter-driven token scanner over a byte stream
//!
//! Used by the 2DA decoder for both its whitespace/quote-delimited text
//! variant and its NUL-delimited binary cell strings.

use crate::error::Result;
use crate::stream::{ByteStream, Whence};

/// How runs of consecutive separators are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorRule {
    /// Every separator ends a token; consecutive separators produce empty
    /// fields.
    Heed,
    /// Consecutive separators of the same kind are coalesced.
    IgnoreSame,
    /// Any run of separators is coalesced.
    IgnoreAll,
}

/// A configurable scanner splitting a stream into tokens.
///
/// Separators end tokens, quotes protect separators inside a token,
/// chunk-end bytes stop a whole token group (typically `\n`), and ignore
/// bytes are dropped entirely (typically `\r`).
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rule: SeparatorRule,
    separators: Vec<u8>,
    quotes: Vec<u8>,
    chunk_ends: Vec<u8>,
    ignores: Vec<u8>,
}

impl Tokenizer {
    #[must_use]
    pub fn new(rule: SeparatorRule) -> Self {
        Self {
            rule,
            separators: Vec::new(),
            quotes: Vec::new(),
            chunk_ends: Vec::new(),
            ignores: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, c: u8) -> Self {
        self.separators.push(c);
        self
    }

    #[must_use]
    pub fn with_quote(mut self, c: u8) -> Self {
        self.quotes.push(c);
        self
    }

    #[must_use]
    pub fn with_chunk_end(mut self, c: u8) -> Self {
        self.chunk_ends.push(c);
        self
    }

    #[must_use]
    pub fn with_ignore(mut self, c: u8) -> Self {
        self.ignores.push(c);
        self
    }

    /// Scan the next token.
    ///
    /// Hitting end-of-stream while a token is open yields the truncated
    /// token; it is up to the caller to decide whether that is fatal.
    pub fn get_token(&self, stream: &mut dyn ByteStream) -> Result<String> {
        let mut chunk_end = false;
        let mut in_quote = false;
        let mut has_separator = false;
        let mut separator = 0u8;

        let mut token: Vec<u8> = Vec::new();

        while !stream.eos() {
            let Some(c) = stream.read_byte()? else { break };

            if self.chunk_ends.contains(&c) {
                // Token group ends here; leave the byte for next_chunk
                stream.seek(-1, Whence::Current)?;
                chunk_end = true;
                break;
            }

            if self.quotes.contains(&c) {
                in_quote = !in_quote;
                continue;
            }

            if !in_quote && self.separators.contains(&c) {
                if !token.is_empty() {
                    has_separator = true;
                    separator = c;
                    break;
                }

                // No token content yet; the rule decides whether this
                // separator still counts
                if self.rule == SeparatorRule::Heed {
                    has_separator = true;
                    separator = c;
                    break;
                }

                if self.rule == SeparatorRule::IgnoreSame && has_separator && separator != c {
                    has_separator = true;
                    separator = c;
                    break;
                }

                has_separator = true;
                separator = c;
                continue;
            }

            if self.ignores.contains(&c) {
                continue;
            }

            token.push(c);
        }

        // A token starting with NUL is an empty cell
        if token.first() == Some(&0) {
            token.clear();
        }

        if !chunk_end && self.rule != SeparatorRule::Heed {
            // Swallow the rest of a separator run
            while !stream.eos() {
                let Some(c) = stream.read_byte()? else { break };

                let run_over = match self.rule {
                    SeparatorRule::IgnoreSame => c != separator,
                    _ => !self.separators.contains(&c),
                };
                if run_over {
                    stream.seek(-1, Whence::Current)?;
                    break;
                }
            }
        }

        Ok(String::from_utf8_lossy(&token).into_owned())
    }

    /// Scan tokens up to the next chunk end.
    ///
    /// Reads at most `max` tokens (unlimited if `None`) and pads the
    /// result with empty strings up to `min`. Returns the tokens and the
    /// number actually read before padding.
    pub fn get_tokens(
        &self,
        stream: &mut dyn ByteStream,
        min: usize,
        max: Option<usize>,
    ) -> Result<(Vec<String>, usize)> {
        let mut list = Vec::with_capacity(min);

        let mut real_count = 0;
        while !self.is_chunk_end(stream)? && max.is_none_or(|m| real_count < m) {
            let token = self.get_token(stream)?;

            if !token.is_empty() || self.rule != SeparatorRule::IgnoreAll {
                list.push(token);
            }
            real_count += 1;
        }

        while list.len() < min {
            list.push(String::new());
        }

        Ok((list, real_count))
    }

    /// Advance past `n` tokens without keeping their content.
    pub fn skip_token(&self, stream: &mut dyn ByteStream, n: usize) -> Result<()> {
        for _ in 0..n {
            let _ = self.get_token(stream)?;
        }
        Ok(())
    }

    /// Advance the cursor past the next chunk-end byte.
    pub fn next_chunk(&self, stream: &mut dyn ByteStream) -> Result<()> {
        self.skip_chunk(stream)?;

        let Some(c) = stream.read_byte()? else {
            return Ok(());
        };

        if !self.chunk_ends.contains(&c) {
            stream.seek(-1, Whence::Current)?;
        } else if stream.pos() == stream.size() {
            // That was the last byte; probe once more so EOS is raised
            let _ = stream.read_byte()?;
        }

        Ok(())
    }

    /// Whether the cursor sits on a chunk-end byte (or the stream end).
    pub fn is_chunk_end(&self, stream: &mut dyn ByteStream) -> Result<bool> {
        if stream.eos() {
            return Ok(true);
        }

        let Some(c) = stream.read_byte()? else {
            return Ok(true);
        };
        stream.seek(-1, Whence::Current)?;

        Ok(self.chunk_ends.contains(&c))
    }

    fn skip_chunk(&self, stream: &mut dyn ByteStream) -> Result<()> {
        debug_assert!(!self.chunk_ends.is_empty());

        while !stream.eos() {
            let Some(c) = stream.read_byte()? else { break };

            if self.chunk_ends.contains(&c) {
                stream.seek(-1, Whence::Current)?;
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    fn whitespace_tokenizer() -> Tokenizer {
        Tokenizer::new(SeparatorRule::IgnoreAll)
            .with_separator(b' ')
            .with_separator(b'\t')
            .with_quote(b'"')
            .with_chunk_end(b'\n')
            .with_ignore(b'\r')
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let mut s = MemoryStream::from(&b"foo   bar\tbaz\n"[..]);
        let tok = whitespace_tokenizer();

        let (tokens, count) = tok.get_tokens(&mut s, 0, None).unwrap();
        assert_eq!(tokens, vec!["foo", "bar", "baz"]);
        assert_eq!(count, 3);
    }

    #[test]
    fn quotes_protect_separators() {
        let mut s = MemoryStream::from(&b"\"two words\" plain\n"[..]);
        let tok = whitespace_tokenizer();

        let (tokens, _) = tok.get_tokens(&mut s, 0, None).unwrap();
        assert_eq!(tokens, vec!["two words", "plain"]);
    }

    #[test]
    fn heed_preserves_empty_fields() {
        let mut s = MemoryStream::from(&b"a\t\tb\0"[..]);
        let tok = Tokenizer::new(SeparatorRule::Heed)
            .with_separator(b'\t')
            .with_separator(b'\0');

        assert_eq!(tok.get_token(&mut s).unwrap(), "a");
        assert_eq!(tok.get_token(&mut s).unwrap(), "");
        assert_eq!(tok.get_token(&mut s).unwrap(), "b");
    }

    #[test]
    fn min_count_pads_with_empty() {
        let mut s = MemoryStream::from(&b"only\n"[..]);
        let tok = whitespace_tokenizer();

        let (tokens, count) = tok.get_tokens(&mut s, 2, Some(2)).unwrap();
        assert_eq!(tokens, vec!["only", ""]);
        assert_eq!(count, 1);
    }

    #[test]
    fn truncated_final_token() {
        let mut s = MemoryStream::from(&b"unterminated"[..]);
        let tok = whitespace_tokenizer();

        assert_eq!(tok.get_token(&mut s).unwrap(), "unterminated");
        assert!(s.eos());
    }

    #[test]
    fn skip_token_and_next_chunk() {
        let mut s = MemoryStream::from(&b"0 a b\n1 c d\n"[..]);
        let tok = whitespace_tokenizer();

        tok.skip_token(&mut s, 1).unwrap();
        let (tokens, _) = tok.get_tokens(&mut s, 0, None).unwrap();
        assert_eq!(tokens, vec!["a", "b"]);

        tok.next_chunk(&mut s).unwrap();
        tok.skip_token(&mut s, 1).unwrap();
        let (tokens, _) = tok.get_tokens(&mut s, 0, None).unwrap();
        assert_eq!(tokens, vec!["c", "d"]);

        // Final newline is the last byte; EOS must be raised
        tok.next_chunk(&mut s).unwrap();
        assert!(s.eos());
    }
}
