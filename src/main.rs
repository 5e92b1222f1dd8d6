use std::{
    env, fs,
    io::{self, Read},
};

use postscript::{PostScriptResult, PostscriptInterpreter};

fn main() -> PostScriptResult<()> {
    env_logger::init();

    let mut lexical = false;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--lexical" | "-l" => lexical = true,
            _ => path = Some(arg),
        }
    }

    let source = match &path {
        Some(path) => fs::read(path)?,
        None => {
            let mut buffer = Vec::new();

            io::stdin().read_to_end(&mut buffer)?;

            buffer
        }
    };

    log::debug!(
        "read {} bytes from {}",
        source.len(),
        path.as_deref().unwrap_or("<stdin>"),
    );

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut interpreter = PostscriptInterpreter::new(lexical, &mut stdout);

    interpreter.run(&source)
}
