//! A crate for reading [Java Class Files](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html) into visitors.
//!
//! A [`ClassReader`] indexes the structure of a class file once, on construction. Calling [`ClassReader::accept`]
//! then replays the class into a [`ClassVisitor`] in a fixed order:
//! 1. the declaration ([`ClassVisitor::visit`]),
//! 2. the source file,
//! 3. the enclosing method,
//! 4. the runtime visible annotations,
//! 5. the inner classes,
//! 6. the fields, then the methods,
//! 7. [`ClassVisitor::visit_end`].
//!
//! ```
//! # fn main() -> anyhow::Result<()> {
//! # let bytes = include_bytes!("../tests/data/Main.class").to_vec();
//! use cafe::{ClassReader, ReadFlags};
//! use cafe::tree::class::ClassNode;
//! use java_string::JavaString;
//!
//! let reader = ClassReader::new(bytes)?;
//!
//! let mut class = ClassNode::default();
//! reader.accept(&mut class, ReadFlags::SKIP_CODE)?;
//!
//! assert_eq!(class.name, JavaString::from("org/example/Main"));
//! assert_eq!(class.source_file, Some(JavaString::from("Main.java")));
//! assert_eq!(class.methods.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! [`ClassVisitor`]: visitor::class::ClassVisitor
//! [`ClassVisitor::visit`]: visitor::class::ClassVisitor::visit
//! [`ClassVisitor::visit_end`]: visitor::class::ClassVisitor::visit_end

pub mod tree;
pub mod visitor;
mod class_reader;
mod class_constants;
mod flags;
mod jstring;

pub use class_reader::ClassReader;
pub use class_reader::layout::{ClassLayout, skip_attribute};
pub use class_reader::attributes::BootstrapMethods;
pub use flags::{Access, ReadFlags};
