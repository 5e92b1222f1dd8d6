use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
};

use super::{operator::PostscriptOperator, PostScriptError, PostScriptResult};

pub(crate) type Name = PostScriptString;

/// Two numbers closer than this are considered the same value, both by the
/// equality operators and by the integrality test that decides whether an
/// arithmetic result lands on an integer or a real
pub(crate) const NUMERIC_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PostScriptObject {
    Null,
    Int(i32),
    Real(f64),
    Bool(bool),
    String(PostScriptString),
    /// A `/name` literal. Pushed as data; used as a key by `def`
    Literal(Name),
    /// A bare identifier. Executing it resolves the name and executes the
    /// resolved value
    Name(Name),
    Array(Vec<PostScriptObject>),
    Procedure(ProcedureIndex),
    Dictionary(DictionaryIndex),
    Mark,
    Operator(PostscriptOperator),
}

impl PostScriptObject {
    /// An arithmetic result. Lands on an integer when the value is integral
    /// within [`NUMERIC_TOLERANCE`] and representable as one
    pub fn from_number(value: f64) -> Self {
        let rounded = value.round();

        if value.is_finite()
            && (value - rounded).abs() < NUMERIC_TOLERANCE
            && rounded >= i32::MIN as f64
            && rounded <= i32::MAX as f64
        {
            PostScriptObject::Int(rounded as i32)
        } else {
            PostScriptObject::Real(value)
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PostScriptObject::Int(n) => Some(*n as f64),
            PostScriptObject::Real(n) => Some(*n),
            _ => None,
        }
    }

    pub fn into_int(self) -> PostScriptResult<i32> {
        match self {
            PostScriptObject::Int(n) => Ok(n),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }

    pub fn into_real(self) -> PostScriptResult<f64> {
        match self {
            PostScriptObject::Int(n) => Ok(n as f64),
            PostScriptObject::Real(n) => Ok(n),
            _ => anyhow::bail!(PostScriptError::TypeCheck),
        }
    }
}

/// Equality as defined by `eq`/`ne`: numbers compare by value across the
/// Int/Real divide, text kinds by their text, arrays element-wise, and
/// everything composite or sentinel by identity
pub(crate) fn objects_equal(a: &PostScriptObject, b: &PostScriptObject) -> bool {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return (x - y).abs() < NUMERIC_TOLERANCE;
    }

    match (a, b) {
        (PostScriptObject::Bool(b1), PostScriptObject::Bool(b2)) => b1 == b2,
        (PostScriptObject::String(s1), PostScriptObject::String(s2)) => s1 == s2,
        (PostScriptObject::Literal(n1), PostScriptObject::Literal(n2)) => n1 == n2,
        (PostScriptObject::Name(n1), PostScriptObject::Name(n2)) => n1 == n2,
        (PostScriptObject::Array(a1), PostScriptObject::Array(a2)) => {
            a1.len() == a2.len() && a1.iter().zip(a2).all(|(e1, e2)| objects_equal(e1, e2))
        }
        (PostScriptObject::Procedure(p1), PostScriptObject::Procedure(p2)) => p1 == p2,
        (PostScriptObject::Dictionary(d1), PostScriptObject::Dictionary(d2)) => d1 == d2,
        (PostScriptObject::Operator(o1), PostScriptObject::Operator(o2)) => o1 == o2,
        (PostScriptObject::Mark, PostScriptObject::Mark) => true,
        (PostScriptObject::Null, PostScriptObject::Null) => true,
        _ => false,
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostScriptString {
    inner: Vec<u8>,
}

impl PostScriptString {
    pub fn from_bytes(inner: Vec<u8>) -> Self {
        Self { inner }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for PostScriptString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.inner))?;

        Ok(())
    }
}

impl fmt::Display for PostScriptString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.inner))?;

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PostScriptDictionary {
    inner: HashMap<Name, PostScriptObject>,
}

impl PostScriptDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Name, value: PostScriptObject) {
        self.inner.insert(key, value);
    }

    pub fn get(&self, key: &Name) -> Option<&PostScriptObject> {
        self.inner.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &PostScriptObject)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

/// A `{ … }` code list together with the environment chain it captured, if
/// the interpreter is running lexically and the literal has been evaluated
#[derive(Debug, Clone)]
pub(crate) struct PostScriptProcedure {
    code: Vec<PostScriptObject>,
    environment: Option<FrameIndex>,
}

impl PostScriptProcedure {
    pub fn new(code: Vec<PostScriptObject>) -> Self {
        Self {
            code,
            environment: None,
        }
    }

    pub fn code(&self) -> &[PostScriptObject] {
        &self.code
    }

    pub fn environment(&self) -> Option<FrameIndex> {
        self.environment
    }

    /// The one-time uncaptured → captured transition
    pub fn capture(&mut self, environment: FrameIndex) {
        debug_assert!(self.environment.is_none());

        self.environment = Some(environment);
    }
}

/// One level of a captured environment chain: a dictionary snapshot plus the
/// enclosing (outer) frame. Chains are linear and immutable after capture
#[derive(Debug)]
pub(crate) struct Frame {
    dictionary: PostScriptDictionary,
    next: Option<FrameIndex>,
}

impl Frame {
    pub fn new(dictionary: PostScriptDictionary, next: Option<FrameIndex>) -> Self {
        Self { dictionary, next }
    }

    pub fn lookup(&self, name: &Name) -> Option<&PostScriptObject> {
        self.dictionary.get(name)
    }

    pub fn next(&self) -> Option<FrameIndex> {
        self.next
    }
}

pub(crate) trait Increment: fmt::Debug + Eq + Hash + Copy {
    /// Initial value
    fn init() -> Self;

    /// Increments self by 1. Returns previous value
    fn increment(&mut self) -> Self;
}

macro_rules! index {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub(crate) struct $name(pub usize);

        impl Increment for $name {
            fn init() -> Self {
                Self(0)
            }

            fn increment(&mut self) -> Self {
                let prev = self.0;

                self.0 += 1;

                Self(prev)
            }
        }
    };
}

index!(ProcedureIndex);
index!(DictionaryIndex);
index!(FrameIndex);

/// Composite objects with identity are stored here and referred to by index,
/// so that every reference observes the same underlying object
#[derive(Debug)]
pub(crate) struct Container<K: Increment, V> {
    map: HashMap<K, V>,
    counter: K,
}

impl<K: Increment, V> Container<K, V> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            counter: K::init(),
        }
    }

    pub fn insert(&mut self, v: V) -> K {
        let idx = self.counter.increment();

        self.map.insert(idx, v);

        idx
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        self.map.get(k)
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        self.map.get_mut(k)
    }
}
