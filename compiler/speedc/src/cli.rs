//! Command-line argument handling for the `speedc` binary.

use std::path::{Path, PathBuf};

pub const USAGE: &str = "\
Usage: speedc <input.spd> [options]

Options:
  -o, --output <path>  Output file (default: input with a .ll extension)
  --object             Emit a native object file instead of LLVM IR
  --version            Print version information
  -h, --help           Print this message";

/// Options for a compile invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub object: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Compile(CliOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("missing input file")]
    MissingInput,
    #[error("option `{0}` requires a value")]
    MissingValue(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Parse arguments, excluding the program name.
///
/// `--help` and `--version` win over everything else on the line.
pub fn parse_args<I, S>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "--version") {
        return Ok(Command::Version);
    }

    let mut input = None;
    let mut output = None;
    let mut object = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = iter.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                output = Some(PathBuf::from(value));
            }
            "--object" => object = true,
            _ if arg.starts_with('-') && arg.len() > 1 => return Err(CliError::UnknownOption(arg)),
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => return Err(CliError::UnexpectedArgument(arg)),
        }
    }

    let input = input.ok_or(CliError::MissingInput)?;
    let output = output.unwrap_or_else(|| default_output(&input, object));
    Ok(Command::Compile(CliOptions {
        input,
        output,
        object,
    }))
}

/// Input path with its extension replaced by `.ll` (or `.o` for objects).
pub fn default_output(input: &Path, object: bool) -> PathBuf {
    input.with_extension(if object { "o" } else { "ll" })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_input_only() {
        assert_eq!(
            parse_args(["hello.spd"]).unwrap(),
            Command::Compile(CliOptions {
                input: PathBuf::from("hello.spd"),
                output: PathBuf::from("hello.ll"),
                object: false,
            })
        );
    }

    #[test]
    fn test_explicit_output() {
        for flag in ["-o", "--output"] {
            let Command::Compile(opts) = parse_args(["a.spd", flag, "out/a.ir"]).unwrap() else {
                panic!("expected compile command");
            };
            assert_eq!(opts.output, PathBuf::from("out/a.ir"));
        }
    }

    #[test]
    fn test_object_flag_changes_default_output() {
        let Command::Compile(opts) = parse_args(["--object", "dir/prog.spd"]).unwrap() else {
            panic!("expected compile command");
        };
        assert!(opts.object);
        assert_eq!(opts.output, PathBuf::from("dir/prog.o"));
    }

    #[test]
    fn test_input_without_extension() {
        assert_eq!(default_output(Path::new("prog"), false), PathBuf::from("prog.ll"));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(["--help"]).unwrap(), Command::Help);
        assert_eq!(parse_args(["x.spd", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse_args(["--version", "x.spd"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_args(Vec::<String>::new()), Err(CliError::MissingInput));
        assert_eq!(
            parse_args(["a.spd", "-o"]),
            Err(CliError::MissingValue("-o".into()))
        );
        assert_eq!(
            parse_args(["a.spd", "--fast"]),
            Err(CliError::UnknownOption("--fast".into()))
        );
        assert_eq!(
            parse_args(["a.spd", "b.spd"]),
            Err(CliError::UnexpectedArgument("b.spd".into()))
        );
    }
}
