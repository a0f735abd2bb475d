//! Functions, globals, and the module that owns them.

use std::fmt::{self, Write as _};

use rustc_hash::FxHashMap;

use super::{BasicBlock, FunctionSig, IrType, Operand, Value};

/// `%struct.Name = type { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<IrType>,
}

/// A private, null-terminated byte string constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalString {
    pub name: String,
    /// Contents including the trailing NUL.
    pub bytes: Vec<u8>,
}

impl GlobalString {
    /// Element count of the `[N x i8]` array type.
    fn array_len(&self) -> u32 {
        u32::try_from(self.bytes.len()).unwrap_or(u32::MAX)
    }
}

/// A function definition, or a declaration when it has no blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub sig: FunctionSig,
    /// Register names of the parameters, parallel to `sig.params`.
    pub param_names: Vec<String>,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    /// A bodiless declaration (external or not yet generated).
    pub fn declaration(name: impl Into<String>, sig: FunctionSig) -> Self {
        Function {
            name: name.into(),
            sig,
            param_names: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One compilation's worth of IR.
///
/// Functions print in insertion order, so the output is deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    name: String,
    structs: Vec<StructType>,
    globals: Vec<GlobalString>,
    functions: Vec<Function>,
    function_index: FxHashMap<String, usize>,
    next_string: usize,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            structs: Vec::new(),
            globals: Vec::new(),
            functions: Vec::new(),
            function_index: FxHashMap::default(),
            next_string: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structs(&self) -> &[StructType] {
        &self.structs
    }

    pub fn globals(&self) -> &[GlobalString] {
        &self.globals
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.function_index.get(name).map(|&i| &self.functions[i])
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.function_index.contains_key(name)
    }

    /// Add a function; returns `false` (and changes nothing) if the name is taken.
    pub fn declare(&mut self, function: Function) -> bool {
        if self.function_index.contains_key(&function.name) {
            return false;
        }
        self.function_index
            .insert(function.name.clone(), self.functions.len());
        self.functions.push(function);
        true
    }

    pub(crate) fn function_mut(&mut self, name: &str) -> Option<&mut Function> {
        let index = *self.function_index.get(name)?;
        self.functions.get_mut(index)
    }

    pub fn add_struct(&mut self, ty: StructType) {
        self.structs.push(ty);
    }

    /// Intern a string constant as `@str_N` and return a pointer to its first byte.
    ///
    /// `N` counts up from zero within this module, skipping any number whose
    /// name is already taken by a declared function. Functions are all
    /// declared before any body is lowered, so this sees every one of them.
    pub fn add_string(&mut self, text: &str) -> Value {
        let name = loop {
            let candidate = format!("str_{}", self.next_string);
            self.next_string += 1;
            if !self.function_index.contains_key(&candidate) {
                break candidate;
            }
        };
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        let global = GlobalString { name, bytes };
        let value = Value::new(
            IrType::i8_ptr(),
            Operand::StringPtr {
                global: global.name.clone(),
                len: global.array_len(),
            },
        );
        self.globals.push(global);
        value
    }
}

/// Escape bytes for a `c"..."` constant.
fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (b' '..=b'~').contains(&b) && b != b'"' && b != b'\\' {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "\\{b:02X}");
        }
    }
    out
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%struct.{} = type {{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{field}")?;
        }
        if self.fields.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

impl fmt::Display for GlobalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{} = private unnamed_addr constant [{} x i8] c\"{}\"",
            self.name,
            self.array_len(),
            escape_bytes(&self.bytes)
        )
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_declaration() {
            write!(f, "declare {} @{}(", self.sig.ret, self.name)?;
            for (i, ty) in self.sig.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ty}")?;
            }
            return writeln!(f, ")");
        }

        write!(f, "define {} @{}(", self.sig.ret, self.name)?;
        for (i, (ty, name)) in self.sig.params.iter().zip(&self.param_names).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty} %{name}")?;
        }
        writeln!(f, ") {{")?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        writeln!(f, "source_filename = \"{}\"", self.name)?;

        if !self.structs.is_empty() {
            writeln!(f)?;
            for ty in &self.structs {
                writeln!(f, "{ty}")?;
            }
        }

        if !self.globals.is_empty() {
            writeln!(f)?;
            for global in &self.globals {
                writeln!(f, "{global}")?;
            }
        }

        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{function}")?;
        }
        Ok(())
    }
}
