use std::fmt::Debug;
use anyhow::{bail, Result};
use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;
use crate::tree::class::{ClassNode, EnclosingMethod, InnerClass};
use crate::tree::constant::Constant;
use crate::tree::field::FieldNode;
use crate::tree::method::{Code, LineNumber, LocalVariable, MethodNode};
use crate::tree::version::Version;
use crate::visitor::class::ClassVisitor;
use crate::visitor::field::FieldVisitor;
use crate::visitor::method::MethodVisitor;

fn insert_if_empty<T: Debug>(option: &mut Option<T>, value: T) -> Result<()> {
	if let Some(old) = option {
		bail!("got {old:?} and {value:?}");
	}
	*option = Some(value);
	Ok(())
}

impl ClassVisitor for ClassNode {
	type FieldVisitor = FieldNode;
	type MethodVisitor = MethodNode;

	fn visit(&mut self, version: Version, access: Access, name: JavaString, signature: Option<JavaString>,
			super_name: Option<JavaString>, interfaces: Vec<JavaString>) -> Result<()> {
		self.version = version;
		self.access = access;
		self.name = name;
		self.signature = signature;
		self.super_name = super_name;
		self.interfaces = interfaces;
		Ok(())
	}

	fn visit_source(&mut self, source_file: JavaString) -> Result<()> {
		insert_if_empty(&mut self.source_file, source_file)
	}

	fn visit_outer_class(&mut self, enclosing_method: EnclosingMethod) -> Result<()> {
		insert_if_empty(&mut self.enclosing_method, enclosing_method)
	}

	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.runtime_visible_annotations.push(annotation);
		Ok(())
	}

	fn visit_inner_class(&mut self, inner_class: InnerClass) -> Result<()> {
		self.inner_classes.push(inner_class);
		Ok(())
	}

	fn visit_field(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			value: Option<Constant>) -> Result<Option<Self::FieldVisitor>> {
		Ok(Some(FieldNode::new(access, name, descriptor, signature, value)))
	}

	fn finish_field(&mut self, field_visitor: Self::FieldVisitor) -> Result<()> {
		self.fields.push(field_visitor);
		Ok(())
	}

	fn visit_method(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			exceptions: Vec<JavaString>) -> Result<Option<Self::MethodVisitor>> {
		Ok(Some(MethodNode::new(access, name, descriptor, signature, exceptions)))
	}

	fn finish_method(&mut self, method_visitor: Self::MethodVisitor) -> Result<()> {
		self.methods.push(method_visitor);
		Ok(())
	}

	fn visit_end(&mut self) -> Result<()> {
		Ok(())
	}
}

impl FieldVisitor for FieldNode {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.runtime_visible_annotations.push(annotation);
		Ok(())
	}
}

impl MethodVisitor for MethodNode {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.runtime_visible_annotations.push(annotation);
		Ok(())
	}

	fn visit_code(&mut self, code: Code) -> Result<()> {
		insert_if_empty(&mut self.code, code)
	}

	fn visit_line_number(&mut self, line_number: LineNumber) -> Result<()> {
		self.line_numbers.push(line_number);
		Ok(())
	}

	fn visit_local_variable(&mut self, local_variable: LocalVariable) -> Result<()> {
		self.local_variables.push(local_variable);
		Ok(())
	}
}
