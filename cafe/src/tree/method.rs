use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
	pub access: Access,
	pub name: JavaString,
	pub descriptor: JavaString,
	pub signature: Option<JavaString>,
	/// The classes listed in the `Exceptions` attribute.
	pub exceptions: Vec<JavaString>,

	pub runtime_visible_annotations: Vec<Annotation>,

	pub code: Option<Code>,
	pub line_numbers: Vec<LineNumber>,
	pub local_variables: Vec<LocalVariable>,
}

impl MethodNode {
	pub fn new(access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>, exceptions: Vec<JavaString>) -> MethodNode {
		MethodNode {
			access,
			name,
			descriptor,
			signature,
			exceptions,
			runtime_visible_annotations: Vec::new(),
			code: None,
			line_numbers: Vec::new(),
			local_variables: Vec::new(),
		}
	}
}

/// The contents of a `Code` attribute, without its nested attributes.
///
/// The instructions are not decoded, `bytecode` holds them as they appear in the class file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
	pub max_stack: u16,
	pub max_locals: u16,
	pub bytecode: Vec<u8>,
	pub exception_table: Vec<ExceptionHandler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExceptionHandler {
	pub start_pc: u16,
	pub end_pc: u16,
	pub handler_pc: u16,
	/// `None` catches any exception, this is used for `finally` blocks.
	pub catch_type: Option<JavaString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineNumber {
	pub start_pc: u16,
	pub line_number: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalVariable {
	pub start_pc: u16,
	pub length: u16,
	pub name: JavaString,
	pub descriptor: JavaString,
	pub index: u16,
}
