//! Owned representations of the parts of a class file.
//!
//! The `*Node` types ([`class::ClassNode`], [`field::FieldNode`], [`method::MethodNode`]) implement the traits of the
//! [`visitor`][crate::visitor] module by collecting everything they're given.

pub mod annotation;
pub mod class;
pub mod constant;
pub mod field;
pub mod method;
pub mod version;
