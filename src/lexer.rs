const FORM_FEED: u8 = b'\x0C';

/// A raw lexeme. String tokens keep their opening parenthesis so the parser
/// can tell them apart from names
pub(crate) type Token = Vec<u8>;

#[derive(Debug)]
pub(crate) struct PostScriptLexer<'a> {
    cursor: usize,
    buffer: &'a [u8],
}

impl<'a> PostScriptLexer<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        tokens
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        match self.peek_byte()? {
            b'(' => Some(self.lex_string()),
            // a stray `)` lexes like a structural delimiter and is left for
            // the evaluator to reject as an undefined name
            b'[' | b']' | b'{' | b'}' | b')' => {
                let b = self.next_byte()?;
                Some(vec![b])
            }
            _ => Some(self.lex_run()),
        }
    }

    /// Consumes a parenthesized string literal. Parentheses nest; `\`
    /// escapes the following byte verbatim. The token retains the opening
    /// parenthesis, inner nested parentheses, and the escaped bytes, but not
    /// the closing parenthesis. End of input terminates an unclosed string
    fn lex_string(&mut self) -> Token {
        let mut token = Vec::new();
        let mut depth = 1_u32;

        if let Some(open) = self.next_byte() {
            token.push(open);
        }

        while let Some(b) = self.next_byte() {
            match b {
                b'\\' => {
                    if let Some(escaped) = self.next_byte() {
                        token.push(escaped);
                    }
                }
                b'(' => {
                    depth += 1;
                    token.push(b);
                }
                b')' => {
                    depth -= 1;

                    if depth == 0 {
                        break;
                    }

                    token.push(b);
                }
                _ => token.push(b),
            }
        }

        token
    }

    fn lex_run(&mut self) -> Token {
        let start = self.cursor;

        while let Some(b) = self.peek_byte() {
            if !Self::is_regular(b) {
                break;
            }

            self.next_byte();
        }

        self.buffer[start..self.cursor].to_vec()
    }

    fn next_byte(&mut self) -> Option<u8> {
        self.buffer.get(self.cursor).copied().map(|b| {
            self.cursor += 1;
            b
        })
    }

    fn peek_byte(&self) -> Option<u8> {
        self.buffer.get(self.cursor).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if Self::is_whitespace(b) {
                self.next_byte();
            } else if b == b'%' {
                self.next_byte();
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// Assumes the leading `%` has already been consumed. The terminating
    /// newline is left in place; end of input also ends the comment
    fn skip_comment(&mut self) {
        while !self.next_is_eol() {
            self.next_byte();
        }
    }

    fn next_is_eol(&self) -> bool {
        match self.peek_byte() {
            Some(b'\r' | b'\n') => true,
            Some(..) => false,
            None => true,
        }
    }

    /// Whitespace chars are defined as
    ///
    /// * NUL             0x0
    /// * Horizontal tab  0x9
    /// * Line feed       0xa
    /// * Form feed       0xc
    /// * Carriage return 0xd
    /// * Space           0x20
    ///
    fn is_whitespace(b: u8) -> bool {
        matches!(b, b'\0' | 0x9 | b'\n' | FORM_FEED | b'\r' | b' ')
    }

    fn is_delimiter(b: u8) -> bool {
        matches!(b, b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'%')
    }

    fn is_regular(b: u8) -> bool {
        !Self::is_whitespace(b) && !Self::is_delimiter(b)
    }
}
