use anyhow::Result;
use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;
use crate::tree::class::{EnclosingMethod, InnerClass};
use crate::tree::constant::Constant;
use crate::tree::version::Version;
use crate::visitor::field::FieldVisitor;
use crate::visitor::method::MethodVisitor;

/// Receives the contents of a class.
///
/// The methods are called in this order, the ones in brackets only if the class has that information:
/// ```text
/// visit [visit_source] [visit_outer_class] visit_annotation* visit_inner_class*
///     (visit_field [finish_field])* (visit_method [finish_method])* visit_end
/// ```
pub trait ClassVisitor
where
	Self::FieldVisitor: FieldVisitor,
	Self::MethodVisitor: MethodVisitor,
{
	type FieldVisitor;
	type MethodVisitor;

	/// Visits the header of the class.
	///
	/// `super_name` is only `None` for `java/lang/Object` and `module-info` classes. `interfaces` is in declaration
	/// order, and empty if the class implements none.
	fn visit(
		&mut self,
		version: Version,
		access: Access,
		name: JavaString,
		signature: Option<JavaString>,
		super_name: Option<JavaString>,
		interfaces: Vec<JavaString>,
	) -> Result<()>;

	fn visit_source(&mut self, source_file: JavaString) -> Result<()>;
	fn visit_outer_class(&mut self, enclosing_method: EnclosingMethod) -> Result<()>;
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()>;
	fn visit_inner_class(&mut self, inner_class: InnerClass) -> Result<()>;

	/// Returning `None` skips the rest of the field, and [`ClassVisitor::finish_field`] isn't called.
	fn visit_field(
		&mut self,
		access: Access,
		name: JavaString,
		descriptor: JavaString,
		signature: Option<JavaString>,
		value: Option<Constant>,
	) -> Result<Option<Self::FieldVisitor>>;
	fn finish_field(&mut self, field_visitor: Self::FieldVisitor) -> Result<()>;

	/// Returning `None` skips the rest of the method, and [`ClassVisitor::finish_method`] isn't called.
	fn visit_method(
		&mut self,
		access: Access,
		name: JavaString,
		descriptor: JavaString,
		signature: Option<JavaString>,
		exceptions: Vec<JavaString>,
	) -> Result<Option<Self::MethodVisitor>>;
	fn finish_method(&mut self, method_visitor: Self::MethodVisitor) -> Result<()>;

	/// Always the last call for a class.
	fn visit_end(&mut self) -> Result<()>;
}
