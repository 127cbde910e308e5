use anyhow::Result;
use java_string::JavaString;
use cafe::Access;
use cafe::tree::annotation::{Annotation, ElementValue};
use cafe::tree::class::{EnclosingMethod, InnerClass};
use cafe::tree::constant::Constant;
use cafe::tree::method::{Code, LineNumber, LocalVariable};
use cafe::tree::version::Version;
use cafe::visitor::class::ClassVisitor;
use cafe::visitor::field::FieldVisitor;
use cafe::visitor::method::MethodVisitor;

/// Turns every visitor call into one line of text.
#[derive(Debug, Default)]
pub(crate) struct Printer {
	pub(crate) lines: Vec<String>,
}

/// The lines of a field or method, indented below the member.
#[derive(Debug, Default)]
pub(crate) struct MemberPrinter {
	lines: Vec<String>,
}

fn opt(value: &Option<JavaString>) -> String {
	value.as_ref().map_or_else(|| "-".to_owned(), |s| s.to_string())
}

fn list(values: &[JavaString]) -> String {
	values.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}

fn constant(constant: &Constant) -> String {
	match constant {
		Constant::String(s) => format!("{s:?}"),
		other => format!("{other:?}"),
	}
}

fn element_value(value: &ElementValue) -> String {
	match value {
		ElementValue::Constant(c) => constant(c),
		ElementValue::Enum { type_name, const_name } => format!("{type_name}.{const_name}"),
		ElementValue::Class(class) => format!("{class}.class"),
		ElementValue::AnnotationInterface(annotation) => format_annotation(annotation),
		ElementValue::ArrayType(values) => {
			let values: Vec<_> = values.iter().map(element_value).collect();
			format!("{{{}}}", values.join(", "))
		},
	}
}

fn format_annotation(annotation: &Annotation) -> String {
	let pairs: Vec<_> = annotation.element_value_pairs.iter()
		.map(|pair| format!("{} = {}", pair.name, element_value(&pair.value)))
		.collect();
	format!("@{}({})", annotation.annotation_type, pairs.join(", "))
}

/// Like the `Debug` output of [`Access`], but with the names of the method flags that share bits with field flags.
fn method_access(access: Access) -> String {
	let mut s = format!("Access({:#06x}) {{ ", access.bits());
	for (name, _) in access.iter_names() {
		s.push_str(match name {
			"SUPER" => "SYNCHRONIZED",
			"VOLATILE" => "BRIDGE",
			"TRANSIENT" => "VARARGS",
			other => other,
		});
		s.push(' ');
	}
	s.push('}');
	s
}

impl ClassVisitor for Printer {
	type FieldVisitor = MemberPrinter;
	type MethodVisitor = MemberPrinter;

	fn visit(&mut self, version: Version, access: Access, name: JavaString, signature: Option<JavaString>,
			super_name: Option<JavaString>, interfaces: Vec<JavaString>) -> Result<()> {
		self.lines.push(format!(
			"class {name} extends {} implements [{}] signature {} version {version} {access:?}",
			opt(&super_name), list(&interfaces), opt(&signature),
		));
		Ok(())
	}

	fn visit_source(&mut self, source_file: JavaString) -> Result<()> {
		self.lines.push(format!("source {source_file}"));
		Ok(())
	}

	fn visit_outer_class(&mut self, enclosing_method: EnclosingMethod) -> Result<()> {
		let EnclosingMethod { owner, name, descriptor } = enclosing_method;
		self.lines.push(format!("outer class {owner} method {} {}", opt(&name), opt(&descriptor)));
		Ok(())
	}

	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.lines.push(format!("annotation {}", format_annotation(&annotation)));
		Ok(())
	}

	fn visit_inner_class(&mut self, inner_class: InnerClass) -> Result<()> {
		let InnerClass { name, outer_name, inner_name, access } = inner_class;
		self.lines.push(format!("inner class {name} outer {} simple name {} {access:?}", opt(&outer_name), opt(&inner_name)));
		Ok(())
	}

	fn visit_field(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			value: Option<Constant>) -> Result<Option<Self::FieldVisitor>> {
		let value = value.as_ref().map_or_else(|| "-".to_owned(), constant);
		self.lines.push(format!("field {name} {descriptor} signature {} value {value} {access:?}", opt(&signature)));
		Ok(Some(MemberPrinter::default()))
	}

	fn finish_field(&mut self, field_visitor: Self::FieldVisitor) -> Result<()> {
		self.lines.extend(field_visitor.lines);
		Ok(())
	}

	fn visit_method(&mut self, access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>,
			exceptions: Vec<JavaString>) -> Result<Option<Self::MethodVisitor>> {
		self.lines.push(format!(
			"method {name}{descriptor} signature {} throws [{}] {}",
			opt(&signature), list(&exceptions), method_access(access),
		));
		Ok(Some(MemberPrinter::default()))
	}

	fn finish_method(&mut self, method_visitor: Self::MethodVisitor) -> Result<()> {
		self.lines.extend(method_visitor.lines);
		Ok(())
	}

	fn visit_end(&mut self) -> Result<()> {
		self.lines.push("end".to_owned());
		Ok(())
	}
}

impl FieldVisitor for MemberPrinter {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.lines.push(format!("\tannotation {}", format_annotation(&annotation)));
		Ok(())
	}
}

impl MethodVisitor for MemberPrinter {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()> {
		self.lines.push(format!("\tannotation {}", format_annotation(&annotation)));
		Ok(())
	}

	fn visit_code(&mut self, code: Code) -> Result<()> {
		self.lines.push(format!(
			"\tcode max_stack {} max_locals {} with {} bytes and {} exception handlers",
			code.max_stack, code.max_locals, code.bytecode.len(), code.exception_table.len(),
		));
		for handler in &code.exception_table {
			self.lines.push(format!(
				"\t\ttry {}..{} catch {} at {}",
				handler.start_pc, handler.end_pc, opt(&handler.catch_type), handler.handler_pc,
			));
		}
		Ok(())
	}

	fn visit_line_number(&mut self, line_number: LineNumber) -> Result<()> {
		self.lines.push(format!("\tline {} at {}", line_number.line_number, line_number.start_pc));
		Ok(())
	}

	fn visit_local_variable(&mut self, local_variable: LocalVariable) -> Result<()> {
		let LocalVariable { start_pc, length, name, descriptor, index } = local_variable;
		self.lines.push(format!("\tlocal {index} {name} {descriptor} from {start_pc} for {length}"));
		Ok(())
	}
}
