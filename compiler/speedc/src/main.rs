//! Speed compiler CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use speed_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use speedc::cli::{self, CliOptions, Command};
use speedc::{CompileError, Compiler};

fn main() {
    speedc::init_tracing();

    match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Compile(options)) => compile(&options),
        Ok(Command::Help) => println!("{}", cli::USAGE),
        Ok(Command::Version) => println!("Speed {}", speedc::VERSION),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    }
}

fn compile(options: &CliOptions) {
    let input = options.input.display().to_string();
    let source = match std::fs::read_to_string(&options.input) {
        Ok(source) => source,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            eprintln!("Error: Could not find input file '{input}'");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: Could not read input file '{input}': {err}");
            std::process::exit(1);
        }
    };

    let compiler = Compiler::new();
    let result = if options.object {
        compiler.compile_to_object(&source, &options.output)
    } else {
        compiler.compile_to_file(&source, &options.output)
    };

    match result {
        Ok(()) => println!(
            "Successfully compiled '{input}' to '{}'",
            options.output.display()
        ),
        Err(err) => {
            report(&err, &options.input, source);
            std::process::exit(1);
        }
    }
}

fn report(err: &CompileError, path: &Path, source: String) {
    let mode = if std::env::var_os("NO_COLOR").is_some() {
        ColorMode::Never
    } else {
        ColorMode::Auto
    };
    let mut emitter = TerminalEmitter::stderr(mode, io::stderr().is_terminal())
        .with_source(path.display().to_string(), source);
    emitter.emit(&err.to_diagnostic());
    emitter.flush();
}
