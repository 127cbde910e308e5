//! Provides implementations of the traits from the [visitor] module for some types.
//! These types are:
//! - The Unit Type `()`:
//!
//!   Accepts everything and keeps nothing. Useful to check that a class file can be read completely.
//!
//! - The node types from the [tree] module:
//!   - [`ClassNode`] implements [`ClassVisitor`]
//!   - [`FieldNode`] implements [`FieldVisitor`]
//!   - [`MethodNode`] implements [`MethodVisitor`]
//!
//! [visitor]: crate::visitor
//! [tree]: crate::tree
//! [`ClassNode`]: crate::tree::class::ClassNode
//! [`FieldNode`]: crate::tree::field::FieldNode
//! [`MethodNode`]: crate::tree::method::MethodNode
//! [`ClassVisitor`]: crate::visitor::class::ClassVisitor
//! [`FieldVisitor`]: crate::visitor::field::FieldVisitor
//! [`MethodVisitor`]: crate::visitor::method::MethodVisitor

mod tree;
mod unit_tuple;
