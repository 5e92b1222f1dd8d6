use super::{
    lexer::Token,
    object::{Container, PostScriptObject, PostScriptProcedure, PostScriptString, ProcedureIndex},
};

/// Turns a token sequence into a code list. Procedure bodies are interned so
/// that every later reference to the literal shares one underlying object
#[derive(Debug)]
pub(crate) struct PostScriptParser<'a> {
    cursor: usize,
    tokens: &'a [Token],
    procedures: &'a mut Container<ProcedureIndex, PostScriptProcedure>,
}

impl<'a> PostScriptParser<'a> {
    pub fn new(
        tokens: &'a [Token],
        procedures: &'a mut Container<ProcedureIndex, PostScriptProcedure>,
    ) -> Self {
        Self {
            cursor: 0,
            tokens,
            procedures,
        }
    }

    pub fn parse(mut self) -> Vec<PostScriptObject> {
        self.parse_until(None)
    }

    /// Consumes tokens until the end delimiter, or end of input for the
    /// top level and for unterminated blocks. A closer that does not match
    /// the innermost open block falls through to the name rule
    fn parse_until(&mut self, end: Option<&[u8]>) -> Vec<PostScriptObject> {
        let mut code = Vec::new();

        while let Some(token) = self.next_token() {
            if end == Some(token) {
                break;
            }

            code.push(self.parse_token(token));
        }

        code
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        let token = self.tokens.get(self.cursor)?;

        self.cursor += 1;

        Some(token)
    }

    fn parse_token(&mut self, token: &[u8]) -> PostScriptObject {
        match token {
            b"{" => {
                let body = self.parse_until(Some(b"}"));

                PostScriptObject::Procedure(self.procedures.insert(PostScriptProcedure::new(body)))
            }
            b"[" => PostScriptObject::Array(self.parse_until(Some(b"]"))),
            b"true" => PostScriptObject::Bool(true),
            b"false" => PostScriptObject::Bool(false),
            [b'(', inner @ ..] => {
                PostScriptObject::String(PostScriptString::from_bytes(inner.to_vec()))
            }
            [b'/', name @ ..] => {
                PostScriptObject::Literal(PostScriptString::from_bytes(name.to_vec()))
            }
            _ => Self::parse_number_or_name(token),
        }
    }

    fn parse_number_or_name(token: &[u8]) -> PostScriptObject {
        if let Ok(text) = std::str::from_utf8(token) {
            // the digit requirement keeps identifiers like `inf` and `nan`,
            // which f64 parsing would otherwise accept, in the name rule
            if text.bytes().any(|b| b.is_ascii_digit()) {
                if let Ok(n) = text.parse::<i32>() {
                    return PostScriptObject::Int(n);
                }

                if let Ok(n) = text.parse::<f64>() {
                    return PostScriptObject::Real(n);
                }
            }
        }

        PostScriptObject::Name(PostScriptString::from_bytes(token.to_vec()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::PostScriptLexer;

    fn parse(source: &[u8]) -> (Vec<PostScriptObject>, Container<ProcedureIndex, PostScriptProcedure>) {
        let tokens = PostScriptLexer::new(source).tokenize();
        let mut procedures = Container::new();
        let code = PostScriptParser::new(&tokens, &mut procedures).parse();

        (code, procedures)
    }

    fn name(text: &[u8]) -> PostScriptObject {
        PostScriptObject::Name(PostScriptString::from_bytes(text.to_vec()))
    }

    #[test]
    fn classifies_atoms() {
        let (code, _) = parse(b"12 -4 1.5 1e3 +5 true false abc /abc (s)");

        assert_eq!(
            code,
            vec![
                PostScriptObject::Int(12),
                PostScriptObject::Int(-4),
                PostScriptObject::Real(1.5),
                PostScriptObject::Real(1000.0),
                PostScriptObject::Int(5),
                PostScriptObject::Bool(true),
                PostScriptObject::Bool(false),
                name(b"abc"),
                PostScriptObject::Literal(PostScriptString::from_bytes(b"abc".to_vec())),
                PostScriptObject::String(PostScriptString::from_bytes(b"s".to_vec())),
            ]
        );
    }

    #[test]
    fn inf_and_nan_are_names() {
        let (code, _) = parse(b"inf nan NaN");

        assert_eq!(code, vec![name(b"inf"), name(b"nan"), name(b"NaN")]);
    }

    #[test]
    fn arrays_nest() {
        let (code, _) = parse(b"[1 [2] 3]");

        assert_eq!(
            code,
            vec![PostScriptObject::Array(vec![
                PostScriptObject::Int(1),
                PostScriptObject::Array(vec![PostScriptObject::Int(2)]),
                PostScriptObject::Int(3),
            ])]
        );
    }

    #[test]
    fn procedures_nest_and_are_interned() {
        let (code, procedures) = parse(b"{ 1 { 2 } }");

        let outer = match code.as_slice() {
            [PostScriptObject::Procedure(idx)] => *idx,
            code => panic!("expected a single procedure, found {:?}", code),
        };

        let body = procedures.get(&outer).unwrap().code();

        assert_eq!(body.len(), 2);
        assert_eq!(body[0], PostScriptObject::Int(1));

        let inner = match body[1] {
            PostScriptObject::Procedure(idx) => idx,
            ref obj => panic!("expected a nested procedure, found {:?}", obj),
        };

        assert_eq!(
            procedures.get(&inner).unwrap().code(),
            &[PostScriptObject::Int(2)]
        );
    }

    #[test]
    fn parsed_procedure_is_uncaptured() {
        let (code, procedures) = parse(b"{ 1 }");

        let idx = match code.as_slice() {
            [PostScriptObject::Procedure(idx)] => *idx,
            code => panic!("expected a single procedure, found {:?}", code),
        };

        assert!(procedures.get(&idx).unwrap().environment().is_none());
    }

    #[test]
    fn unterminated_block_ends_at_eof() {
        let (code, procedures) = parse(b"{ 1 2");

        let idx = match code.as_slice() {
            [PostScriptObject::Procedure(idx)] => *idx,
            code => panic!("expected a single procedure, found {:?}", code),
        };

        assert_eq!(
            procedures.get(&idx).unwrap().code(),
            &[PostScriptObject::Int(1), PostScriptObject::Int(2)]
        );
    }

    #[test]
    fn mismatched_closer_falls_through_to_name() {
        let (code, _) = parse(b"]");

        assert_eq!(code, vec![name(b"]")]);
    }

    #[test]
    fn string_payload_excludes_parens() {
        let (code, _) = parse(b"(a(b)c)");

        assert_eq!(
            code,
            vec![PostScriptObject::String(PostScriptString::from_bytes(
                b"a(b)c".to_vec()
            ))]
        );
    }
}
