use anyhow::Result;
use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;
use crate::tree::class::{EnclosingMethod, InnerClass};
use crate::tree::constant::Constant;
use crate::tree::method::{Code, LineNumber, LocalVariable};
use crate::tree::version::Version;
use crate::visitor::class::ClassVisitor;
use crate::visitor::field::FieldVisitor;
use crate::visitor::method::MethodVisitor;

// Always returns `Some(())` for members, so that reading into `()` goes through every code path.

impl ClassVisitor for () {
	type FieldVisitor = ();
	type MethodVisitor = ();

	fn visit(&mut self, _version: Version, _access: Access, _name: JavaString, _signature: Option<JavaString>,
			_super_name: Option<JavaString>, _interfaces: Vec<JavaString>) -> Result<()> {
		Ok(())
	}

	fn visit_source(&mut self, _source_file: JavaString) -> Result<()> {
		Ok(())
	}

	fn visit_outer_class(&mut self, _enclosing_method: EnclosingMethod) -> Result<()> {
		Ok(())
	}

	fn visit_annotation(&mut self, _annotation: Annotation) -> Result<()> {
		Ok(())
	}

	fn visit_inner_class(&mut self, _inner_class: InnerClass) -> Result<()> {
		Ok(())
	}

	fn visit_field(&mut self, _access: Access, _name: JavaString, _descriptor: JavaString, _signature: Option<JavaString>,
			_value: Option<Constant>) -> Result<Option<Self::FieldVisitor>> {
		Ok(Some(()))
	}

	fn finish_field(&mut self, _field_visitor: Self::FieldVisitor) -> Result<()> {
		Ok(())
	}

	fn visit_method(&mut self, _access: Access, _name: JavaString, _descriptor: JavaString, _signature: Option<JavaString>,
			_exceptions: Vec<JavaString>) -> Result<Option<Self::MethodVisitor>> {
		Ok(Some(()))
	}

	fn finish_method(&mut self, _method_visitor: Self::MethodVisitor) -> Result<()> {
		Ok(())
	}

	fn visit_end(&mut self) -> Result<()> {
		Ok(())
	}
}

impl FieldVisitor for () {
	fn visit_annotation(&mut self, _annotation: Annotation) -> Result<()> {
		Ok(())
	}
}

impl MethodVisitor for () {
	fn visit_annotation(&mut self, _annotation: Annotation) -> Result<()> {
		Ok(())
	}

	fn visit_code(&mut self, _code: Code) -> Result<()> {
		Ok(())
	}

	fn visit_line_number(&mut self, _line_number: LineNumber) -> Result<()> {
		Ok(())
	}

	fn visit_local_variable(&mut self, _local_variable: LocalVariable) -> Result<()> {
		Ok(())
	}
}
