//! Per-function instruction builder.
//!
//! `IrBuilder` owns the basic blocks of the function being generated and an
//! insertion point. Callers get typed [`Value`]s back and never name
//! registers themselves.
//!
//! # Naming
//!
//! | What | Name |
//! |------|------|
//! | Temporaries | `%t0`, `%t1`, ... |
//! | Stack slots | `%x.addr` (deduplicated: `%x.addr1`, ...) |
//! | Blocks | `entry`, then caller-chosen labels |
//!
//! Every name is unique within the function: parameters are registered
//! first and temporaries skip any name already taken.

use rustc_hash::FxHashSet;

use crate::ir::{
    BasicBlock, BinaryOpcode, FloatPredicate, Instr, IntPredicate, IrType, Terminator, Value,
};

/// Index of a block within the function being built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

impl BlockId {
    pub const ENTRY: BlockId = BlockId(0);
}

pub struct IrBuilder {
    blocks: Vec<BasicBlock>,
    current: BlockId,
    /// Allocas sit at the top of `entry`, before any other instruction.
    entry_allocas: usize,
    next_temp: u32,
    next_label: u32,
    names: FxHashSet<String>,
}

impl IrBuilder {
    /// A builder positioned at the end of a fresh `entry` block.
    pub fn new() -> Self {
        let mut names = FxHashSet::default();
        names.insert("entry".to_string());
        IrBuilder {
            blocks: vec![BasicBlock::new("entry")],
            current: BlockId::ENTRY,
            entry_allocas: 0,
            next_temp: 0,
            next_label: 0,
            names,
        }
    }

    /// Reserve `base` or the first free `base1`, `base2`, ...
    pub fn unique_name(&mut self, base: &str) -> String {
        if self.names.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}{n}");
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn temp(&mut self) -> String {
        loop {
            let candidate = format!("t{}", self.next_temp);
            self.next_temp += 1;
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn push(&mut self, instr: Instr) {
        let block = &mut self.blocks[self.current.0];
        if block.is_terminated() {
            tracing::trace!(block = %block.label, "instruction after terminator dropped");
            return;
        }
        block.instrs.push(instr);
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    /// A fresh number for a group of related labels (`if.then3`, `if.end3`).
    pub fn next_label_id(&mut self) -> u32 {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    pub fn append_block(&mut self, label: &str) -> BlockId {
        let label = self.unique_name(label);
        self.blocks.push(BasicBlock::new(label));
        BlockId(self.blocks.len() - 1)
    }

    pub fn position_at_end(&mut self, block: BlockId) {
        self.current = block;
    }

    /// Whether the current block already ends in a terminator.
    pub fn is_terminated(&self) -> bool {
        self.blocks[self.current.0].is_terminated()
    }

    // -----------------------------------------------------------------------
    // Memory
    // -----------------------------------------------------------------------

    /// `alloca` at the top of the entry block, wherever the insertion point is.
    ///
    /// Returns a pointer to the slot.
    pub fn entry_alloca(&mut self, name: &str, ty: IrType) -> Value {
        let dst = self.unique_name(name);
        let ptr = Value::reg(ty.clone().ptr_to(), dst.clone());
        self.blocks[BlockId::ENTRY.0]
            .instrs
            .insert(self.entry_allocas, Instr::Alloca { dst, ty });
        self.entry_allocas += 1;
        ptr
    }

    /// Load through `ptr`; the result has the pointee type.
    pub fn load(&mut self, ptr: &Value) -> Value {
        let ty = ptr.ty.pointee().cloned().unwrap_or(IrType::I8);
        let dst = self.temp();
        self.push(Instr::Load {
            dst: dst.clone(),
            ty: ty.clone(),
            ptr: ptr.clone(),
        });
        Value::reg(ty, dst)
    }

    pub fn store(&mut self, value: Value, ptr: &Value) {
        self.push(Instr::Store {
            value,
            ptr: ptr.clone(),
        });
    }

    /// Address of field `index` of the struct `ptr` points to.
    pub fn struct_gep(&mut self, ptr: &Value, index: u32, field_ty: &IrType) -> Value {
        let base_ty = ptr.ty.pointee().cloned().unwrap_or(IrType::I8);
        let dst = self.temp();
        self.push(Instr::Gep {
            dst: dst.clone(),
            base_ty,
            ptr: ptr.clone(),
            indices: vec![
                Value::const_i32(0),
                Value::const_i32(i32::try_from(index).unwrap_or(i32::MAX)),
            ],
        });
        Value::reg(field_ty.clone().ptr_to(), dst)
    }

    // -----------------------------------------------------------------------
    // Arithmetic and comparisons
    // -----------------------------------------------------------------------

    /// Result has the type of `lhs`.
    pub fn binary(&mut self, op: BinaryOpcode, lhs: Value, rhs: Value) -> Value {
        let ty = lhs.ty.clone();
        let dst = self.temp();
        self.push(Instr::Binary {
            dst: dst.clone(),
            op,
            lhs,
            rhs,
        });
        Value::reg(ty, dst)
    }

    pub fn icmp(&mut self, pred: IntPredicate, lhs: Value, rhs: Value) -> Value {
        let dst = self.temp();
        self.push(Instr::ICmp {
            dst: dst.clone(),
            pred,
            lhs,
            rhs,
        });
        Value::reg(IrType::I1, dst)
    }

    pub fn fcmp(&mut self, pred: FloatPredicate, lhs: Value, rhs: Value) -> Value {
        let dst = self.temp();
        self.push(Instr::FCmp {
            dst: dst.clone(),
            pred,
            lhs,
            rhs,
        });
        Value::reg(IrType::I1, dst)
    }

    pub fn fneg(&mut self, operand: Value) -> Value {
        let ty = operand.ty.clone();
        let dst = self.temp();
        self.push(Instr::FNeg {
            dst: dst.clone(),
            operand,
        });
        Value::reg(ty, dst)
    }

    // -----------------------------------------------------------------------
    // Calls
    // -----------------------------------------------------------------------

    /// Call `@callee`; a `void` call yields [`Value::void`].
    pub fn call(&mut self, callee: &str, ret: &IrType, args: Vec<Value>) -> Value {
        if ret.is_void() {
            self.push(Instr::Call {
                dst: None,
                ret: IrType::Void,
                callee: callee.to_string(),
                args,
            });
            return Value::void();
        }
        let dst = self.temp();
        self.push(Instr::Call {
            dst: Some(dst.clone()),
            ret: ret.clone(),
            callee: callee.to_string(),
            args,
        });
        Value::reg(ret.clone(), dst)
    }

    // -----------------------------------------------------------------------
    // Terminators
    // -----------------------------------------------------------------------

    fn terminate(&mut self, term: Terminator) {
        let block = &mut self.blocks[self.current.0];
        if block.is_terminated() {
            tracing::trace!(block = %block.label, "block already terminated");
            return;
        }
        block.terminator = Some(term);
    }

    pub fn ret(&mut self, value: Value) {
        self.terminate(Terminator::Ret(Some(value)));
    }

    pub fn ret_void(&mut self) {
        self.terminate(Terminator::Ret(None));
    }

    pub fn br(&mut self, dest: BlockId) {
        let label = self.blocks[dest.0].label.clone();
        self.terminate(Terminator::Br(label));
    }

    pub fn cond_br(&mut self, cond: Value, then_bb: BlockId, else_bb: BlockId) {
        let then_label = self.blocks[then_bb.0].label.clone();
        let else_label = self.blocks[else_bb.0].label.clone();
        self.terminate(Terminator::CondBr {
            cond,
            then_label,
            else_label,
        });
    }

    /// The finished blocks. Any block left open is closed with `unreachable`.
    pub fn finish(self) -> Vec<BasicBlock> {
        self.blocks
            .into_iter()
            .map(|mut block| {
                if block.terminator.is_none() {
                    block.terminator = Some(Terminator::Unreachable);
                }
                block
            })
            .collect()
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(blocks: &[BasicBlock]) -> String {
        blocks.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_allocas_hoisted_to_entry() {
        let mut b = IrBuilder::new();
        let x = b.entry_alloca("x.addr", IrType::I32);
        b.store(Value::const_i32(1), &x);

        let body = b.append_block("while.body0");
        b.br(body);
        b.position_at_end(body);
        let y = b.entry_alloca("y.addr", IrType::Double);
        b.store(Value::const_f64(0.0), &y);
        b.ret_void();

        let blocks = b.finish();
        assert_eq!(
            render(&blocks[..1]),
            "entry:\n  %x.addr = alloca i32\n  %y.addr = alloca double\n  \
             store i32 1, i32* %x.addr\n  br label %while.body0\n"
        );
    }

    #[test]
    fn test_names_are_unique() {
        let mut b = IrBuilder::new();
        assert_eq!(b.unique_name("t0"), "t0");
        let v = b.binary(BinaryOpcode::Add, Value::const_i32(1), Value::const_i32(2));
        assert_eq!(v, Value::reg(IrType::I32, "t1"));

        let first = b.entry_alloca("x.addr", IrType::I32);
        let second = b.entry_alloca("x.addr", IrType::I32);
        assert_ne!(first, second);
        assert_eq!(second, Value::reg(IrType::I32.ptr_to(), "x.addr1"));

        assert_eq!(b.unique_name("entry"), "entry1");
    }

    #[test]
    fn test_load_has_pointee_type() {
        let mut b = IrBuilder::new();
        let slot = b.entry_alloca("f.addr", IrType::Double);
        let v = b.load(&slot);
        assert_eq!(v.ty, IrType::Double);
    }

    #[test]
    fn test_struct_gep() {
        let mut b = IrBuilder::new();
        let this = Value::reg(IrType::object("Point"), "this");
        let field = b.struct_gep(&this, 1, &IrType::Double);
        assert_eq!(field.ty, IrType::Double.ptr_to());
        b.ret_void();
        assert!(render(&b.finish()).contains(
            "getelementptr inbounds %struct.Point, %struct.Point* %this, i32 0, i32 1"
        ));
    }

    #[test]
    fn test_void_call_has_no_result() {
        let mut b = IrBuilder::new();
        let v = b.call("print", &IrType::Void, vec![]);
        assert!(v.ty.is_void());
        b.ret_void();
        assert!(render(&b.finish()).contains("  call void @print()\n"));
    }

    #[test]
    fn test_first_terminator_wins() {
        let mut b = IrBuilder::new();
        b.ret(Value::const_i32(1));
        b.ret(Value::const_i32(2));
        b.binary(BinaryOpcode::Add, Value::const_i32(1), Value::const_i32(2));
        assert!(b.is_terminated());
        assert_eq!(render(&b.finish()), "entry:\n  ret i32 1\n");
    }

    #[test]
    fn test_open_blocks_become_unreachable() {
        let mut b = IrBuilder::new();
        b.ret_void();
        let dead = b.append_block("dead");
        b.position_at_end(dead);
        let blocks = b.finish();
        assert_eq!(blocks[1].terminator, Some(Terminator::Unreachable));
    }
}
