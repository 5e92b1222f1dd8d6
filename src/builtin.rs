//! Builtin operators provided by the execution environment

use super::{
    object::{PostScriptDictionary, PostScriptObject, PostScriptString},
    operator::PostscriptOperator,
};

pub(crate) fn gen_system_dict() -> PostScriptDictionary {
    let mut system_dict = PostScriptDictionary::new();

    system_dict.insert(
        PostScriptString::from_bytes(b"pop".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Pop),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"exch".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Exch),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"dup".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Dup),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"clear".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Clear),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"count".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Count),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"copy".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Copy),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"add".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Add),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"sub".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Sub),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"mul".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Mul),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"div".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Div),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"mod".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Mod),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"eq".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Eq),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"ne".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Ne),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"gt".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Gt),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"lt".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Lt),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"dict".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Dict),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"begin".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Begin),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"end".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::End),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"def".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Def),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"if".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::If),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"ifelse".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::IfElse),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"repeat".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Repeat),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"for".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::For),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"quit".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Quit),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"print".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Print),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"=".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::Equals),
    );
    system_dict.insert(
        PostScriptString::from_bytes(b"==".to_vec()),
        PostScriptObject::Operator(PostscriptOperator::EqualsEquals),
    );

    system_dict
}
