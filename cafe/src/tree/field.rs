use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;
use crate::tree::constant::Constant;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
	pub access: Access,
	pub name: JavaString,
	pub descriptor: JavaString,
	pub signature: Option<JavaString>,
	/// The value of the `ConstantValue` attribute.
	pub value: Option<Constant>,

	pub runtime_visible_annotations: Vec<Annotation>,
}

impl FieldNode {
	pub fn new(access: Access, name: JavaString, descriptor: JavaString, signature: Option<JavaString>, value: Option<Constant>) -> FieldNode {
		FieldNode {
			access,
			name,
			descriptor,
			signature,
			value,
			runtime_visible_annotations: Vec::new(),
		}
	}
}
