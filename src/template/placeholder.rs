//! Placeholder analysis for template bodies.
//!
//! Two token families are recognized:
//! - positional: `{{1}}`, `{{ 2 }}` (braces, optional whitespace, digits)
//! - anonymous: `{{}}`, `{{ }}` (braces around whitespace only)
//!
//! Anything else between braces (e.g. `{{name}}`) is plain text.

/// One element of a tokenized template body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text that is emitted as-is
    Literal(&'a str),
    /// A token naming its slot explicitly (1-based)
    Positional {
        /// Slot number as written; `0` or an overflowing number never fills
        slot: usize,
        /// Original token text, kept so unfilled tokens render literally
        raw: &'a str,
    },
    /// A token with no slot number, bound by order of appearance
    Anonymous {
        /// Original token text
        raw: &'a str,
    },
}

impl<'a> Token<'a> {
    /// The exact source text of this element
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        match *self {
            Self::Literal(text) => text,
            Self::Positional { raw, .. } | Self::Anonymous { raw } => raw,
        }
    }

    /// Returns true for positional and anonymous tokens
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// Split a template body into literals and placeholder tokens.
///
/// Scans left to right. A `{{` that does not open a valid token contributes a
/// single `{` to the surrounding literal and scanning resumes one character
/// later, so `{{{1}}` is `{` followed by slot 1.
#[must_use]
pub fn tokenize(body: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < body.len() {
        if body[i..].starts_with("{{") {
            if let Some((end, slot)) = match_token(body, i) {
                if literal_start < i {
                    tokens.push(Token::Literal(&body[literal_start..i]));
                }
                let raw = &body[i..end];
                tokens.push(match slot {
                    Some(slot) => Token::Positional { slot, raw },
                    None => Token::Anonymous { raw },
                });
                i = end;
                literal_start = end;
                continue;
            }
        }
        i += body[i..].chars().next().map_or(1, char::len_utf8);
    }

    if literal_start < body.len() {
        tokens.push(Token::Literal(&body[literal_start..]));
    }

    tokens
}

/// Try to match a token starting at `start` (which must point at `{{`).
///
/// Returns the byte offset just past the closing `}}` and the slot number for
/// positional tokens (`None` for anonymous ones).
fn match_token(body: &str, start: usize) -> Option<(usize, Option<usize>)> {
    let inner = body[start + 2..].trim_start();
    let digit_len = inner.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &inner[..digit_len];
    let rest = inner[digit_len..].trim_start();

    if !rest.starts_with("}}") {
        return None;
    }

    let end = body.len() - rest.len() + 2;
    let slot = if digits.is_empty() {
        None
    } else {
        Some(digits.parse().unwrap_or(usize::MAX))
    };
    Some((end, slot))
}

/// Count substitutable tokens (positional plus anonymous) in a body.
#[must_use]
pub fn count_placeholders(body: &str) -> usize {
    tokenize(body)
        .iter()
        .filter(|token| token.is_placeholder())
        .count()
}
