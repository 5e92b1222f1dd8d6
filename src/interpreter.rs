use std::{
    io::Write,
    ops::{Add, Div, Mul, Sub},
};

use super::{
    builtin::gen_system_dict,
    error::{PostScriptError, PostScriptResult},
    lexer::PostScriptLexer,
    object::{
        objects_equal, Container, DictionaryIndex, Frame, FrameIndex, Name, PostScriptDictionary,
        PostScriptObject, PostScriptProcedure, PostScriptString, ProcedureIndex, NUMERIC_TOLERANCE,
    },
    operator::PostscriptOperator,
    parser::PostScriptParser,
};

pub struct PostscriptInterpreter<'a> {
    // We must maintain references to objects with identity (procedures,
    // dictionaries, environment frames), rather than storing them by value
    procedures: Container<ProcedureIndex, PostScriptProcedure>,
    dictionaries: Container<DictionaryIndex, PostScriptDictionary>,
    frames: Container<FrameIndex, Frame>,

    operand_stack: Vec<PostScriptObject>,

    /// The bottom element is the system dictionary and is never removed
    dictionary_stack: Vec<DictionaryIndex>,

    /// false = dynamic scoping, true = lexical scoping
    lexical: bool,

    /// Set by `quit`; checked at every code-list iteration boundary
    quit: bool,

    output: &'a mut dyn Write,
}

impl<'a> PostscriptInterpreter<'a> {
    pub fn new(lexical: bool, output: &'a mut dyn Write) -> Self {
        let mut interpreter = Self {
            procedures: Container::new(),
            dictionaries: Container::new(),
            frames: Container::new(),
            operand_stack: Vec::new(),
            dictionary_stack: Vec::new(),
            lexical,
            quit: false,
            output,
        };

        let system_dict = interpreter.new_dict(gen_system_dict());

        interpreter.push_dict_stack(system_dict);

        interpreter
    }

    /// Tokenizes, parses, and executes a program. The operand stack persists
    /// between calls on the same instance
    pub fn run(&mut self, source: &[u8]) -> PostScriptResult<()> {
        let tokens = PostScriptLexer::new(source).tokenize();
        let code = PostScriptParser::new(&tokens, &mut self.procedures).parse();

        log::debug!(
            "executing {} top-level objects, {} scoping",
            code.len(),
            if self.lexical { "lexical" } else { "dynamic" },
        );

        self.quit = false;

        self.execute(&code, None)
    }

    fn execute(
        &mut self,
        code: &[PostScriptObject],
        environment: Option<FrameIndex>,
    ) -> PostScriptResult<()> {
        for obj in code {
            if self.quit {
                break;
            }

            self.execute_object(obj.clone(), environment)?;
        }

        Ok(())
    }

    fn execute_object(
        &mut self,
        obj: PostScriptObject,
        environment: Option<FrameIndex>,
    ) -> PostScriptResult<()> {
        log::trace!("executing {:?}", obj);

        match obj {
            PostScriptObject::Operator(op) => self.execute_operator(op),
            PostScriptObject::Name(name) => {
                let resolved = self.resolve(&name, environment)?;

                self.execute_resolved(resolved)
            }
            PostScriptObject::Procedure(proc) => {
                if self.lexical && self.get_procedure(proc).environment().is_none() {
                    let chain = self.capture_environment();

                    self.get_procedure_mut(proc).capture(chain);
                }

                self.push(PostScriptObject::Procedure(proc));

                Ok(())
            }
            obj => {
                self.push(obj);

                Ok(())
            }
        }
    }

    /// Executes the value a name resolved to: operators run, procedures have
    /// their code evaluated, anything else is pushed
    fn execute_resolved(&mut self, obj: PostScriptObject) -> PostScriptResult<()> {
        match obj {
            PostScriptObject::Operator(op) => self.execute_operator(op),
            PostScriptObject::Procedure(proc) => self.call_procedure(proc),
            obj => {
                self.push(obj);

                Ok(())
            }
        }
    }

    /// Evaluates a procedure's code list. Lexically the body runs under the
    /// chain the procedure captured (absent when the procedure was never
    /// evaluated as a literal); dynamically it runs with no static
    /// environment at all
    fn call_procedure(&mut self, proc: ProcedureIndex) -> PostScriptResult<()> {
        let procedure = self.get_procedure(proc);

        let environment = if self.lexical {
            procedure.environment()
        } else {
            None
        };

        let code = procedure.code().to_vec();

        self.execute(&code, environment)
    }

    fn resolve(
        &self,
        name: &Name,
        environment: Option<FrameIndex>,
    ) -> PostScriptResult<PostScriptObject> {
        if self.lexical {
            self.resolve_lexical(name, environment)
        } else {
            self.resolve_dynamic(name)
        }
    }

    /// Dynamic scoping: the live dictionary stack, top to bottom
    fn resolve_dynamic(&self, name: &Name) -> PostScriptResult<PostScriptObject> {
        for &dict in self.dictionary_stack.iter().rev() {
            if let Some(obj) = self.get_dict(dict).get(name) {
                return Ok(obj.clone());
            }
        }

        anyhow::bail!(PostScriptError::Undefined { name: name.clone() })
    }

    /// Lexical scoping: the captured chain innermost-first, then only the
    /// system dictionary. Intermediate live dictionaries are not consulted
    fn resolve_lexical(
        &self,
        name: &Name,
        environment: Option<FrameIndex>,
    ) -> PostScriptResult<PostScriptObject> {
        let mut next = environment;

        while let Some(idx) = next {
            let frame = self.frames.get(&idx).unwrap();

            if let Some(obj) = frame.lookup(name) {
                return Ok(obj.clone());
            }

            next = frame.next();
        }

        if let Some(obj) = self.get_dict(self.system_dict()).get(name) {
            return Ok(obj.clone());
        }

        anyhow::bail!(PostScriptError::Undefined { name: name.clone() })
    }

    /// Snapshots the live dictionary stack bottom-to-top into a frame chain
    /// whose innermost frame wraps the current top. Snapshots copy the map
    /// entries only; composite values stay shared
    fn capture_environment(&mut self) -> FrameIndex {
        let mut next = None;

        for ix in 0..self.dictionary_stack.len() {
            let dict = self.dictionary_stack[ix];
            let snapshot = self.get_dict(dict).clone();

            next = Some(self.frames.insert(Frame::new(snapshot, next)));
        }

        // the dictionary stack is never empty, so the chain has at least the
        // system dictionary frame
        next.unwrap()
    }
}

/// Operator methods
impl<'a> PostscriptInterpreter<'a> {
    fn execute_operator(&mut self, op: PostscriptOperator) -> PostScriptResult<()> {
        match op {
            PostscriptOperator::Pop => {
                self.pop()?;

                Ok(())
            }
            PostscriptOperator::Exch => self.exch(),
            PostscriptOperator::Dup => self.dup(),
            PostscriptOperator::Clear => self.clear(),
            PostscriptOperator::Count => self.count(),
            PostscriptOperator::Copy => self.copy(),
            PostscriptOperator::Add => self.arith(f64::add),
            PostscriptOperator::Sub => self.arith(f64::sub),
            PostscriptOperator::Mul => self.arith(f64::mul),
            PostscriptOperator::Div => self.arith(f64::div),
            PostscriptOperator::Mod => self.modulo(),
            PostscriptOperator::Eq => self.eq(),
            PostscriptOperator::Ne => self.ne(),
            PostscriptOperator::Gt => self.cmp(|a, b| a > b),
            PostscriptOperator::Lt => self.cmp(|a, b| a < b),
            PostscriptOperator::Dict => self.dict(),
            PostscriptOperator::Begin => self.begin(),
            PostscriptOperator::End => self.end(),
            PostscriptOperator::Def => self.def(),
            PostscriptOperator::If => self.if_op(),
            PostscriptOperator::IfElse => self.if_else(),
            PostscriptOperator::Repeat => self.repeat(),
            PostscriptOperator::For => self.for_loop(),
            PostscriptOperator::Quit => {
                self.quit = true;

                Ok(())
            }
            PostscriptOperator::Print => self.print(),
            PostscriptOperator::Equals => self.equals(),
            PostscriptOperator::EqualsEquals => self.equals_equals(),
        }
    }

    fn exch(&mut self) -> PostScriptResult<()> {
        let obj2 = self.pop()?;
        let obj1 = self.pop()?;

        self.push(obj2);
        self.push(obj1);

        Ok(())
    }

    fn dup(&mut self) -> PostScriptResult<()> {
        let obj = self.pop()?;

        self.push(obj.clone());
        self.push(obj);

        Ok(())
    }

    fn clear(&mut self) -> PostScriptResult<()> {
        self.operand_stack.clear();

        Ok(())
    }

    fn count(&mut self) -> PostScriptResult<()> {
        let count = self.operand_stack.len();

        self.push(PostScriptObject::Int(count as i32));

        Ok(())
    }

    fn copy(&mut self) -> PostScriptResult<()> {
        let n = self.pop_int()?;

        let n = match usize::try_from(n) {
            Ok(n) if n <= self.operand_stack.len() => n,
            _ => anyhow::bail!(PostScriptError::RangeCheck),
        };

        let start = self.operand_stack.len() - n;

        self.operand_stack.extend_from_within(start..);

        Ok(())
    }

    fn arith(&mut self, real: impl Fn(f64, f64) -> f64) -> PostScriptResult<()> {
        let n2 = self.pop()?.into_real()?;
        let n1 = self.pop()?.into_real()?;

        self.push(PostScriptObject::from_number(real(n1, n2)));

        Ok(())
    }

    fn modulo(&mut self) -> PostScriptResult<()> {
        let n2 = self.pop_int()?;
        let n1 = self.pop_int()?;

        if n2 == 0 {
            anyhow::bail!(PostScriptError::UndefinedResult);
        }

        self.push(PostScriptObject::Int(n1.wrapping_rem(n2)));

        Ok(())
    }

    fn cmp(&mut self, cmp: impl Fn(f64, f64) -> bool) -> PostScriptResult<()> {
        let n2 = self.pop()?.into_real()?;
        let n1 = self.pop()?.into_real()?;

        self.push(PostScriptObject::Bool(cmp(n1, n2)));

        Ok(())
    }

    fn eq(&mut self) -> PostScriptResult<()> {
        let b = self.pop()?;
        let a = self.pop()?;

        self.push(PostScriptObject::Bool(objects_equal(&a, &b)));

        Ok(())
    }

    fn ne(&mut self) -> PostScriptResult<()> {
        let b = self.pop()?;
        let a = self.pop()?;

        self.push(PostScriptObject::Bool(!objects_equal(&a, &b)));

        Ok(())
    }

    fn dict(&mut self) -> PostScriptResult<()> {
        // capacity hint, unused
        let _n = self.pop_int()?;

        let dict = self.new_dict(PostScriptDictionary::new());

        self.push(PostScriptObject::Dictionary(dict));

        Ok(())
    }

    fn begin(&mut self) -> PostScriptResult<()> {
        let dict = self.pop_dict()?;

        self.push_dict_stack(dict);

        Ok(())
    }

    fn end(&mut self) -> PostScriptResult<()> {
        // the system dictionary stays
        if self.dictionary_stack.len() <= 1 {
            anyhow::bail!(PostScriptError::DictStackUnderflow);
        }

        self.dictionary_stack.pop();

        Ok(())
    }

    fn def(&mut self) -> PostScriptResult<()> {
        let value = self.pop()?;
        let key = self.pop_literal()?;

        let dict = self.get_current_dict();

        self.get_dict_mut(dict).insert(key, value);

        Ok(())
    }

    fn if_op(&mut self) -> PostScriptResult<()> {
        let proc = self.pop_procedure()?;
        let b = self.pop_bool()?;

        if b {
            self.call_procedure(proc)?;
        }

        Ok(())
    }

    fn if_else(&mut self) -> PostScriptResult<()> {
        let proc_two = self.pop_procedure()?;
        let proc_one = self.pop_procedure()?;
        let b = self.pop_bool()?;

        self.call_procedure(if b { proc_one } else { proc_two })
    }

    fn repeat(&mut self) -> PostScriptResult<()> {
        let proc = self.pop_procedure()?;
        let n = self.pop_int()?;

        for _ in 0..n {
            if self.quit {
                break;
            }

            self.call_procedure(proc)?;
        }

        Ok(())
    }

    fn for_loop(&mut self) -> PostScriptResult<()> {
        let proc = self.pop_procedure()?;
        let limit = self.pop()?.into_real()?;
        let increment = self.pop()?.into_real()?;
        let initial = self.pop()?.into_real()?;

        if increment == 0.0 {
            anyhow::bail!(PostScriptError::InvalidIncrement);
        }

        let past_limit = |control: f64| {
            if increment > 0.0 {
                control > limit
            } else {
                control < limit
            }
        };

        let mut control = initial;

        while !past_limit(control) {
            if self.quit {
                break;
            }

            self.push(PostScriptObject::from_number(control));

            self.call_procedure(proc)?;

            // reclaim the loop index if the body left it unconsumed. A body
            // that coincidentally leaves an equal number on top loses it
            if let Some(n) = self.operand_stack.last().and_then(PostScriptObject::as_number) {
                if (n - control).abs() < NUMERIC_TOLERANCE {
                    self.operand_stack.pop();
                }
            }

            control += increment;
        }

        Ok(())
    }

    fn print(&mut self) -> PostScriptResult<()> {
        let s = self.pop_string()?;

        self.output.write_all(s.as_bytes())?;

        Ok(())
    }

    fn equals(&mut self) -> PostScriptResult<()> {
        let obj = self.pop()?;
        let text = self.display_string(&obj);

        writeln!(self.output, "{}", text)?;

        Ok(())
    }

    fn equals_equals(&mut self) -> PostScriptResult<()> {
        let obj = self.pop()?;
        let text = self.pretty_string(&obj);

        writeln!(self.output, "{}", text)?;

        Ok(())
    }
}

/// Printed forms
impl<'a> PostscriptInterpreter<'a> {
    /// The one-line form written by `=`
    fn display_string(&self, obj: &PostScriptObject) -> String {
        match obj {
            PostScriptObject::Null => "null".to_owned(),
            PostScriptObject::Int(n) => n.to_string(),
            PostScriptObject::Real(n) => n.to_string(),
            PostScriptObject::Bool(b) => b.to_string(),
            PostScriptObject::String(s) => format!("({})", s),
            PostScriptObject::Literal(name) => format!("/{}", name),
            PostScriptObject::Name(name) => name.to_string(),
            PostScriptObject::Array(elements) => {
                format!("[{}]", self.join(elements, Self::display_string))
            }
            PostScriptObject::Procedure(proc) => {
                self.procedure_string(*proc, Self::display_string)
            }
            PostScriptObject::Dictionary(dict) => {
                format!("<<dict {}>>", self.get_dict(*dict).len())
            }
            PostScriptObject::Mark => "-mark-".to_owned(),
            PostScriptObject::Operator(op) => format!("{:?}", op),
        }
    }

    /// The form written by `==`: atoms as in `=`, composites recursively
    fn pretty_string(&self, obj: &PostScriptObject) -> String {
        match obj {
            PostScriptObject::Array(elements) => {
                format!("[{}]", self.join(elements, Self::pretty_string))
            }
            PostScriptObject::Procedure(proc) => self.procedure_string(*proc, Self::pretty_string),
            PostScriptObject::Dictionary(dict) => {
                let mut out = String::from("<<");

                for (key, value) in self.get_dict(*dict).iter() {
                    out.push_str(&format!(" /{} {}", key, self.pretty_string(value)));
                }

                out.push_str(" >>");

                out
            }
            obj => self.display_string(obj),
        }
    }

    fn procedure_string(
        &self,
        proc: ProcedureIndex,
        element: fn(&Self, &PostScriptObject) -> String,
    ) -> String {
        let code = self.get_procedure(proc).code();

        if code.is_empty() {
            "{ }".to_owned()
        } else {
            format!("{{ {} }}", self.join(code, element))
        }
    }

    fn join(
        &self,
        elements: &[PostScriptObject],
        element: fn(&Self, &PostScriptObject) -> String,
    ) -> String {
        elements
            .iter()
            .map(|e| element(self, e))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Utils
impl<'a> PostscriptInterpreter<'a> {
    pub(crate) fn push(&mut self, obj: PostScriptObject) {
        self.operand_stack.push(obj);
    }

    pub(crate) fn pop(&mut self) -> PostScriptResult<PostScriptObject> {
        self.operand_stack
            .pop()
            .ok_or(anyhow::anyhow!(PostScriptError::StackUnderflow))
    }

    fn pop_int(&mut self) -> PostScriptResult<i32> {
        self.pop()?.into_int()
    }

    fn pop_bool(&mut self) -> PostScriptResult<bool> {
        match self.pop()? {
            PostScriptObject::Bool(b) => Ok(b),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    fn pop_string(&mut self) -> PostScriptResult<PostScriptString> {
        match self.pop()? {
            PostScriptObject::String(s) => Ok(s),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    fn pop_literal(&mut self) -> PostScriptResult<Name> {
        match self.pop()? {
            PostScriptObject::Literal(name) => Ok(name),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    fn pop_procedure(&mut self) -> PostScriptResult<ProcedureIndex> {
        match self.pop()? {
            PostScriptObject::Procedure(proc) => Ok(proc),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    fn pop_dict(&mut self) -> PostScriptResult<DictionaryIndex> {
        match self.pop()? {
            PostScriptObject::Dictionary(dict) => Ok(dict),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    fn new_dict(&mut self, dict: PostScriptDictionary) -> DictionaryIndex {
        self.dictionaries.insert(dict)
    }

    fn push_dict_stack(&mut self, dict: DictionaryIndex) {
        self.dictionary_stack.push(dict);
    }

    fn system_dict(&self) -> DictionaryIndex {
        self.dictionary_stack[0]
    }

    fn get_current_dict(&self) -> DictionaryIndex {
        // never empty, see `end`
        *self.dictionary_stack.last().unwrap()
    }

    fn get_dict(&self, key: DictionaryIndex) -> &PostScriptDictionary {
        self.dictionaries.get(&key).unwrap()
    }

    fn get_dict_mut(&mut self, key: DictionaryIndex) -> &mut PostScriptDictionary {
        self.dictionaries.get_mut(&key).unwrap()
    }

    fn get_procedure(&self, key: ProcedureIndex) -> &PostScriptProcedure {
        self.procedures.get(&key).unwrap()
    }

    fn get_procedure_mut(&mut self, key: ProcedureIndex) -> &mut PostScriptProcedure {
        self.procedures.get_mut(&key).unwrap()
    }
}
