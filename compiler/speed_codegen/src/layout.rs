//! Struct layouts for classes.
//!
//! The registry is the single source of truth for field order: the
//! position of a field here is the index used in its `getelementptr`.

use rustc_hash::FxHashMap;

use crate::ir::{IrType, StructType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub ty: IrType,
}

/// Ordered fields of one class, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub name: String,
    pub fields: Vec<FieldLayout>,
}

impl StructLayout {
    /// Position and layout of `field`.
    pub fn field(&self, field: &str) -> Option<(u32, &FieldLayout)> {
        self.fields
            .iter()
            .position(|f| f.name == field)
            .and_then(|i| Some((u32::try_from(i).ok()?, &self.fields[i])))
    }

    /// `%struct.Name`
    pub fn ir_type(&self) -> IrType {
        IrType::Struct(self.name.clone())
    }

    pub fn to_struct_type(&self) -> StructType {
        StructType {
            name: self.name.clone(),
            fields: self.fields.iter().map(|f| f.ty.clone()).collect(),
        }
    }
}

/// Class name → layout.
///
/// Names are declared before any layout is defined, so a field may refer
/// to its own class or to a class declared later.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    declared: FxHashMap<String, Option<StructLayout>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the class name was already declared.
    pub fn declare(&mut self, class: &str) -> bool {
        if self.declared.contains_key(class) {
            return false;
        }
        self.declared.insert(class.to_string(), None);
        true
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    pub fn define(&mut self, layout: StructLayout) {
        self.declared.insert(layout.name.clone(), Some(layout));
    }

    pub fn get(&self, class: &str) -> Option<&StructLayout> {
        self.declared.get(class).and_then(Option::as_ref)
    }
}
