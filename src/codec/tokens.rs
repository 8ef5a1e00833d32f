use std::fmt::Write;

use crate::error::FormatError;
use crate::network::topology::Topology;

/// Front-to-back cursor over the whitespace-separated tokens of a dump.
///
/// The position is explicit and owned by the caller; every read either
/// yields a parsed value or a `FormatError` naming the token index.
pub struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Tokens<'a> {
        Tokens {
            tokens: text.split_ascii_whitespace().collect(),
            pos: 0,
        }
    }

    /// Index of the next token to be consumed.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn next_token(&mut self, expected: &'static str) -> Result<&'a str, FormatError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(FormatError::TruncatedInput {
                position: self.pos,
                expected,
            })?;
        log::trace!("token {} ({}): {}", self.pos, expected, token);
        self.pos += 1;
        Ok(token)
    }

    /// Reads a non-negative decimal integer.
    pub fn next_usize(&mut self, expected: &'static str) -> Result<usize, FormatError> {
        let position = self.pos;
        let token = self.next_token(expected)?;
        token.parse::<usize>().map_err(|_| FormatError::NotANumber {
            position,
            token: token.to_owned(),
            expected,
        })
    }

    /// Reads a finite floating-point number.
    pub fn next_f64(&mut self, expected: &'static str) -> Result<f64, FormatError> {
        let position = self.pos;
        let token = self.next_token(expected)?;
        let value = token.parse::<f64>().map_err(|_| FormatError::NotANumber {
            position,
            token: token.to_owned(),
            expected,
        })?;
        if !value.is_finite() {
            return Err(FormatError::NonFinite {
                position,
                token: token.to_owned(),
            });
        }
        Ok(value)
    }

    /// Reads `<layer_count> <size_0> ... <size_{n-1}>`.
    pub fn topology(&mut self) -> Result<Topology, FormatError> {
        let layer_count = self.next_usize("layer count")?;
        if layer_count == 0 {
            return Err(FormatError::EmptyTopology);
        }
        // no capacity hint: the count is untrusted until the sizes are read
        let mut sizes = Vec::new();
        for _ in 0..layer_count {
            sizes.push(self.next_usize("layer size")?);
        }
        Topology::new(sizes)
    }
}

/// Writes a float so that parsing it back yields the same `f64`, keeping a
/// decimal point or exponent (`1.0`, not `1`).
pub fn push_f64(out: &mut String, value: f64) {
    if !out.is_empty() {
        out.push(' ');
    }
    let _ = write!(out, "{:?}", value);
}

pub fn push_usize(out: &mut String, value: usize) {
    if !out.is_empty() {
        out.push(' ');
    }
    let _ = write!(out, "{}", value);
}

pub fn push_word(out: &mut String, word: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(word);
}

/// Writes the topology header.
pub fn push_topology(out: &mut String, topology: &Topology) {
    push_usize(out, topology.layer_count());
    for &size in topology.layer_sizes() {
        push_usize(out, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let mut t = Tokens::new("  2 3\n1\t0.5 \n");
        assert_eq!(t.remaining(), 4);
        assert_eq!(t.next_usize("a").unwrap(), 2);
        assert_eq!(t.next_usize("b").unwrap(), 3);
        assert_eq!(t.next_usize("c").unwrap(), 1);
        assert_eq!(t.next_f64("d").unwrap(), 0.5);
        assert!(t.is_empty());
    }

    #[test]
    fn exhausted_stream_is_truncated_input() {
        let mut t = Tokens::new("1");
        t.next_usize("layer count").unwrap();
        assert_eq!(
            t.next_f64("momentum"),
            Err(FormatError::TruncatedInput { position: 1, expected: "momentum" })
        );
    }

    #[test]
    fn garbage_is_not_a_number() {
        let mut t = Tokens::new("x -3 nan");
        assert!(matches!(t.next_usize("layer count"), Err(FormatError::NotANumber { position: 0, .. })));
        assert!(matches!(t.next_usize("layer size"), Err(FormatError::NotANumber { position: 1, .. })));
        assert!(matches!(t.next_f64("bias"), Err(FormatError::NonFinite { position: 2, .. })));
    }

    #[test]
    fn topology_header() {
        let mut t = Tokens::new("3 2 3 1 rest");
        let topology = t.topology().unwrap();
        assert_eq!(topology.layer_sizes(), &[2, 3, 1]);
        assert_eq!(t.position(), 4);

        assert_eq!(Tokens::new("0").topology(), Err(FormatError::EmptyTopology));
        assert!(matches!(Tokens::new("3 2 3").topology(), Err(FormatError::TruncatedInput { position: 3, .. })));
    }

    #[test]
    fn floats_keep_a_decimal_point() {
        let mut out = String::new();
        push_f64(&mut out, 1.0);
        push_f64(&mut out, 0.1);
        push_f64(&mut out, -2.5e-12);
        assert_eq!(out, "1.0 0.1 -2.5e-12");
        let back: Vec<f64> = out.split(' ').map(|t| t.parse().unwrap()).collect();
        assert_eq!(back, vec![1.0, 0.1, -2.5e-12]);
    }
}
