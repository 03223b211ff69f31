use crate::*;

/// Byte cursor over Lua-ish table syntax; every `expect`/literal helper
/// skips leading whitespace and `--` line comments first.
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn error(&self, reason: impl Into<String>) -> CodecError {
        CodecError::syntax(self.pos, reason)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn skip_ws(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("--") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }

    /// Consumes `token` if it comes next.
    pub fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();

        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", token)))
        }
    }

    /// Like [`Self::expect`], but refuses to match a prefix of a longer
    /// identifier.
    pub fn expect_word(&mut self, word: &str) -> Result<()> {
        self.skip_ws();

        let rest = self.rest();
        let matches = rest.starts_with(word)
            && !rest[word.len()..]
                .chars()
                .next()
                .map_or(false, |ch| ch.is_alphanumeric() || ch == '_');

        if matches {
            self.pos += word.len();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", word)))
        }
    }

    pub fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();

        let rest = self.rest();
        let len = rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
            .unwrap_or(rest.len());

        if len == 0 || rest.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Err(self.error("expected an identifier"));
        }

        self.pos += len;
        Ok(&rest[..len])
    }

    pub fn uint(&mut self) -> Result<u64> {
        self.skip_ws();

        let digits = self
            .rest()
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(self.rest().len());

        if digits == 0 {
            return Err(self.error("expected a number"));
        }

        let value = self.rest()[..digits]
            .parse()
            .map_err(|_| self.error("number out of range"))?;

        self.pos += digits;
        Ok(value)
    }

    pub fn int(&mut self) -> Result<i64> {
        let negative = self.eat("-");
        let at = self.pos;
        let value = self.uint()?;
        let value = i64::try_from(value).map_err(|_| CodecError::syntax(at, "number out of range"))?;

        Ok(if negative { -value } else { value })
    }

    /// A single- or double-quoted string literal.
    pub fn string(&mut self) -> Result<String> {
        self.skip_ws();

        let quote = match self.peek() {
            Some(quote @ ('"' | '\'')) => quote,
            _ => return Err(self.error("expected a string literal")),
        };

        let start = self.pos;
        self.bump();

        let mut value = String::new();

        loop {
            match self.bump() {
                None => return Err(CodecError::syntax(start, "unterminated string literal")),
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(ch @ ('\\' | '"' | '\'')) => value.push(ch),
                    _ => return Err(self.error("unsupported escape sequence")),
                },
                Some(ch) => value.push(ch),
            }
        }
    }
}

/// Quotes `value` as a Lua string literal that [`Cursor::string`] reads back.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }

    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_and_comments() {
        let mut cursor = Cursor::new("  -- hello\n  -- again\n\t{");

        assert!(cursor.eat("{"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn strings_roundtrip_through_quote() {
        for value in ["$asphalt04", "Bad \"Apple\"", "a\\b\nc", ""] {
            let quoted = quote(value);
            let mut cursor = Cursor::new(&quoted);

            assert_eq!(cursor.string().unwrap(), value);
            assert!(cursor.is_eof());
        }
    }

    #[test]
    fn reads_single_quoted_strings() {
        assert_eq!(Cursor::new(" 'full'").string().unwrap(), "full");
    }

    #[test]
    fn reads_signed_numbers() {
        assert_eq!(Cursor::new("-12").int().unwrap(), -12);
        assert_eq!(Cursor::new(" 42,").int().unwrap(), 42);
        assert!(Cursor::new("x").int().is_err());
    }

    #[test]
    fn reads_identifiers() {
        let mut cursor = Cursor::new(" ORIGIN_X = 1");

        assert_eq!(cursor.ident().unwrap(), "ORIGIN_X");
        assert!(cursor.ident().is_err());
    }

    #[test]
    fn word_must_end_at_boundary() {
        assert!(Cursor::new("types").expect_word("type").is_err());
        assert!(Cursor::new("type =").expect_word("type").is_ok());
    }
}
