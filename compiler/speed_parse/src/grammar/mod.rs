//! Grammar productions, implemented as `Parser` methods.

mod expr;
mod item;
mod stmt;
