#![allow(dead_code)]

use anyhow::{bail, Result};
use java_string::JavaString;
use cafe::Access;
use cafe::tree::annotation::Annotation;
use cafe::tree::class::{EnclosingMethod, InnerClass};
use cafe::tree::constant::Constant;
use cafe::tree::method::{Code, LineNumber, LocalVariable};
use cafe::tree::version::Version;
use cafe::visitor::class::ClassVisitor;
use cafe::visitor::field::FieldVisitor;
use cafe::visitor::method::MethodVisitor;

pub fn js(s: &str) -> JavaString {
	JavaString::from(s)
}

/// Builds class files byte by byte, without checking anything.
///
/// Utf8 entries are interned, so asking twice for the same string gives the same index.
pub struct ClassFile {
	pub major_version: u16,
	pub access_flags: u16,
	pub this_class: u16,
	pub super_class: u16,
	/// `None` for the unusable second slot of `Long` and `Double` entries.
	constant_pool: Vec<Option<Vec<u8>>>,
	interfaces: Vec<u16>,
	fields: Vec<Vec<u8>>,
	methods: Vec<Vec<u8>>,
	attributes: Vec<Vec<u8>>,
}

impl ClassFile {
	pub fn new(name: &str, super_name: Option<&str>) -> ClassFile {
		let mut class = ClassFile {
			major_version: 52,
			access_flags: 0x0021,
			this_class: 0,
			super_class: 0,
			constant_pool: Vec::new(),
			interfaces: Vec::new(),
			fields: Vec::new(),
			methods: Vec::new(),
			attributes: Vec::new(),
		};
		class.this_class = class.class(name);
		let super_class = super_name.map_or(0, |super_name| class.class(super_name));
		class.super_class = super_class;
		class
	}

	fn push(&mut self, entry: Vec<u8>) -> u16 {
		self.constant_pool.push(Some(entry));
		self.constant_pool.len() as u16
	}

	pub fn utf8(&mut self, s: &str) -> u16 {
		let mut entry = vec![1];
		entry.extend_from_slice(&(s.len() as u16).to_be_bytes());
		entry.extend_from_slice(s.as_bytes());

		if let Some(i) = self.constant_pool.iter().position(|e| e.as_ref() == Some(&entry)) {
			return i as u16 + 1;
		}
		self.push(entry)
	}

	fn with_index(&mut self, tag: u8, index: u16) -> u16 {
		let mut entry = vec![tag];
		entry.extend_from_slice(&index.to_be_bytes());
		self.push(entry)
	}

	fn with_two_indices(&mut self, tag: u8, a: u16, b: u16) -> u16 {
		let mut entry = vec![tag];
		entry.extend_from_slice(&a.to_be_bytes());
		entry.extend_from_slice(&b.to_be_bytes());
		self.push(entry)
	}

	pub fn class(&mut self, name: &str) -> u16 {
		let name = self.utf8(name);
		self.with_index(7, name)
	}

	pub fn string(&mut self, s: &str) -> u16 {
		let s = self.utf8(s);
		self.with_index(8, s)
	}

	pub fn integer(&mut self, value: i32) -> u16 {
		let mut entry = vec![3];
		entry.extend_from_slice(&value.to_be_bytes());
		self.push(entry)
	}

	pub fn long(&mut self, value: i64) -> u16 {
		let mut entry = vec![5];
		entry.extend_from_slice(&value.to_be_bytes());
		let index = self.push(entry);
		self.constant_pool.push(None);
		index
	}

	pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
		let name = self.utf8(name);
		let descriptor = self.utf8(descriptor);
		self.with_two_indices(12, name, descriptor)
	}

	pub fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
		let owner = self.class(owner);
		let name_and_type = self.name_and_type(name, descriptor);
		self.with_two_indices(10, owner, name_and_type)
	}

	pub fn method_handle(&mut self, reference_kind: u8, reference: u16) -> u16 {
		let mut entry = vec![15, reference_kind];
		entry.extend_from_slice(&reference.to_be_bytes());
		self.push(entry)
	}

	/// Encodes an attribute, including its name index and length.
	pub fn attribute(&mut self, name: &str, payload: &[u8]) -> Vec<u8> {
		self.attribute_with_length(name, payload.len() as u32, payload)
	}

	/// Encodes an attribute with an `attribute_length` that may not match the payload.
	pub fn attribute_with_length(&mut self, name: &str, length: u32, payload: &[u8]) -> Vec<u8> {
		let mut attribute = Vec::new();
		attribute.extend_from_slice(&self.utf8(name).to_be_bytes());
		attribute.extend_from_slice(&length.to_be_bytes());
		attribute.extend_from_slice(payload);
		attribute
	}

	pub fn add_interface(&mut self, name: &str) {
		let index = self.class(name);
		self.interfaces.push(index);
	}

	pub fn add_attribute(&mut self, attribute: Vec<u8>) {
		self.attributes.push(attribute);
	}

	fn member(&mut self, access: u16, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) -> Vec<u8> {
		let mut member = Vec::new();
		member.extend_from_slice(&access.to_be_bytes());
		member.extend_from_slice(&self.utf8(name).to_be_bytes());
		member.extend_from_slice(&self.utf8(descriptor).to_be_bytes());
		member.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
		for attribute in attributes {
			member.extend(attribute);
		}
		member
	}

	pub fn add_field(&mut self, access: u16, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) {
		let field = self.member(access, name, descriptor, attributes);
		self.fields.push(field);
	}

	pub fn add_method(&mut self, access: u16, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) {
		let method = self.member(access, name, descriptor, attributes);
		self.methods.push(method);
	}

	/// The offset of the `access_flags` item in the bytes from [`ClassFile::to_bytes`].
	pub fn header_offset(&self) -> usize {
		10 + self.constant_pool.iter().flatten().map(Vec::len).sum::<usize>()
	}

	/// The offset of the `fields_count` item in the bytes from [`ClassFile::to_bytes`].
	pub fn fields_offset(&self) -> usize {
		self.header_offset() + 8 + 2 * self.interfaces.len()
	}

	/// The offset of the `methods_count` item in the bytes from [`ClassFile::to_bytes`].
	pub fn methods_offset(&self) -> usize {
		self.fields_offset() + 2 + self.fields.iter().map(Vec::len).sum::<usize>()
	}

	/// The offset of the `attributes_count` item in the bytes from [`ClassFile::to_bytes`].
	pub fn attributes_offset(&self) -> usize {
		self.methods_offset() + 2 + self.methods.iter().map(Vec::len).sum::<usize>()
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut vec = vec![0xca, 0xfe, 0xba, 0xbe, 0, 0];
		vec.extend_from_slice(&self.major_version.to_be_bytes());
		vec.extend_from_slice(&(self.constant_pool.len() as u16 + 1).to_be_bytes());
		for entry in self.constant_pool.iter().flatten() {
			vec.extend_from_slice(entry);
		}

		vec.extend_from_slice(&self.access_flags.to_be_bytes());
		vec.extend_from_slice(&self.this_class.to_be_bytes());
		vec.extend_from_slice(&self.super_class.to_be_bytes());

		vec.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
		for interface in &self.interfaces {
			vec.extend_from_slice(&interface.to_be_bytes());
		}

		for table in [&self.fields, &self.methods, &self.attributes] {
			vec.extend_from_slice(&(table.len() as u16).to_be_bytes());
			for entry in table {
				vec.extend_from_slice(entry);
			}
		}

		vec
	}
}

/// One call to a visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Visit {
		version: Version,
		access: Access,
		name: JavaString,
		signature: Option<JavaString>,
		super_name: Option<JavaString>,
		interfaces: Vec<JavaString>,
	},
	Source(JavaString),
	OuterClass(EnclosingMethod),
	Annotation(Annotation),
	InnerClass(InnerClass),
	Field {
		access: Access,
		name: JavaString,
		descriptor: JavaString,
		signature: Option<JavaString>,
		value: Option<Constant>,
	},
	FinishField,
	Method {
		access: Access,
		name: JavaString,
		descriptor: JavaString,
		signature: Option<JavaString>,
		exceptions: Vec<JavaString>,
	},
	Code(Code),
	LineNumber(LineNumber),
	LocalVariable(LocalVariable),
	FinishMethod,
	End,
}

/// Records every call it gets, in order.
#[derive(Debug, Default)]
pub struct EventLog {
	pub events: Vec<Event>,
	/// Return `None` from `visit_field` and `visit_method`.
	pub skip_members: bool,
	/// Fail on the n-th call.
	pub fail_at: Option<usize>,
}

impl EventLog {
	pub fn new() -> EventLog {
		EventLog::default()
	}

	fn record(&mut self, event: Event) -> Result<()> {
		if self.fail_at == Some(self.events.len()) {
			bail!("failing at {event:?}");
		}
		self.events.push(event);
		Ok(())
	}
}

/// Collects the events of a field or method, they are moved to the [`EventLog`] on finishing.
#[derive(Debug, Default)]
pub struct MemberLog {
	events: Vec<Event>,
}

impl ClassVisitor for EventLog {
	type FieldVisitor = MemberLog;
	type MethodVisitor = MemberLog;

	fn visit(&mut self, version: Version, access: Access, name: JavaString, signature: Option<JavaString>,
			super_name: Option<JavaString>, interfaces: Vec<JavaString>) -> Result<()> {
		self.record(Event::Visit { version, access, name, signature, super_name, interfaces })
	}

	fn visit_source(&mut self, source_file: JavaString) -> Result<()> {
		self.record(Event::Source(source_file))
	}

	fn visit_outer_class(&mut self, enclosing_method: EnclosingMethod) -> Result<()> {
		self.record(Event::OuterClass(enclosing_method))
	}

	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.record(Event::Annotation(annotation))
	}

	fn visit_inner_class(&mut self, inner_class: InnerClass) -> Result<()> {
		self.record(Event::InnerClass(inner_class))
	}

	fn visit_field(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			value: Option<Constant>) -> Result<Option<Self::FieldVisitor>> {
		self.record(Event::Field { access, name, descriptor, signature, value })?;
		Ok((!self.skip_members).then(MemberLog::default))
	}

	fn finish_field(&mut self, field_visitor: Self::FieldVisitor) -> Result<()> {
		self.events.extend(field_visitor.events);
		self.record(Event::FinishField)
	}

	fn visit_method(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			exceptions: Vec<JavaString>) -> Result<Option<Self::MethodVisitor>> {
		self.record(Event::Method { access, name, descriptor, signature, exceptions })?;
		Ok((!self.skip_members).then(MemberLog::default))
	}

	fn finish_method(&mut self, method_visitor: Self::MethodVisitor) -> Result<()> {
		self.events.extend(method_visitor.events);
		self.record(Event::FinishMethod)
	}

	fn visit_end(&mut self) -> Result<()> {
		self.record(Event::End)
	}
}

impl FieldVisitor for MemberLog {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.events.push(Event::Annotation(annotation));
		Ok(())
	}
}

impl MethodVisitor for MemberLog {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.events.push(Event::Annotation(annotation));
		Ok(())
	}

	fn visit_code(&mut self, code: Code) -> Result<()> {
		self.events.push(Event::Code(code));
		Ok(())
	}

	fn visit_line_number(&mut self, line_number: LineNumber) -> Result<()> {
		self.events.push(Event::LineNumber(line_number));
		Ok(())
	}

	fn visit_local_variable(&mut self, local_variable: LocalVariable) -> Result<()> {
		self.events.push(Event::LocalVariable(local_variable));
		Ok(())
	}
}
