//! The traits a [`ClassReader`][crate::ClassReader] reports a class file to.
//!
//! A [`class::ClassVisitor`] receives the class level events in a fixed order. For every field and method it may
//! return a [`field::FieldVisitor`] or a [`method::MethodVisitor`] for the events of that member, or [`None`] to
//! skip them. Member visitors are handed back with `finish_field` and `finish_method` once their events are over.
//!
//! Every method returns a [`Result`][anyhow::Result]; an error stops the reading and is returned from
//! [`ClassReader::accept`][crate::ClassReader::accept].

mod implementations;

pub mod class;
pub mod field;
pub mod method;
