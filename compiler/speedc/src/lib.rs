//! Speed compiler driver.
//!
//! [`Compiler`] runs the pipeline `tokenize → parse → generate` on a source
//! string and hands back the IR module, or writes its text to a file. Each
//! call builds fresh state for every phase, so one `Compiler` can be reused
//! for any number of independent compilations.

pub mod cli;
mod error;

use std::path::Path;
use std::sync::Once;

use speed_codegen::Module;
use tracing::debug;

pub use error::CompileError;

/// Version reported by `speedc --version`.
pub const VERSION: &str = "0.1.0";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Safe to call multiple times. The filter comes from `RUST_LOG`
/// (e.g. `RUST_LOG=speed_codegen=debug`) and defaults to `warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
    });
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name printed in the `; ModuleID` header.
    pub module_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            module_name: speed_codegen::DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Compiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `source` to an IR module.
    pub fn compile(&self, source: &str) -> Result<Module, CompileError> {
        let tokens = speed_lexer::tokenize(source)?;
        debug!(tokens = tokens.len(), "lexed");

        let program = speed_parse::parse(&tokens)?;
        debug!(statements = program.statements.len(), "parsed");

        let module = speed_codegen::generate_module(&program, &self.options.module_name)?;
        debug!(functions = module.functions().len(), "generated");
        Ok(module)
    }

    /// Compile `source` and write the IR text to `path`.
    ///
    /// Nothing is written unless compilation succeeds.
    pub fn compile_to_file(&self, source: &str, path: impl AsRef<Path>) -> Result<(), CompileError> {
        let path = path.as_ref();
        let module = self.compile(source)?;
        std::fs::write(path, module.to_string()).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote IR");
        Ok(())
    }

    /// Native object output. There is no backend for it, so this always
    /// fails with [`CompileError::UnsupportedOperation`] and writes nothing.
    pub fn compile_to_object(
        &self,
        _source: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), CompileError> {
        debug!(path = %path.as_ref().display(), "object output requested");
        Err(CompileError::UnsupportedOperation {
            operation: "object code generation",
        })
    }
}
