use java_string::JavaString;
use crate::flags::Access;
use crate::tree::annotation::Annotation;
use crate::tree::field::FieldNode;
use crate::tree::method::MethodNode;
use crate::tree::version::Version;

/// A class collected from a [`ClassReader`][crate::ClassReader].
///
/// Use [`ClassNode::default`] and pass it to [`ClassReader::accept`][crate::ClassReader::accept].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
	pub version: Version,
	pub access: Access,
	pub name: JavaString,
	pub signature: Option<JavaString>,
	pub super_name: Option<JavaString>,
	pub interfaces: Vec<JavaString>,

	pub source_file: Option<JavaString>,
	pub enclosing_method: Option<EnclosingMethod>,
	pub runtime_visible_annotations: Vec<Annotation>,
	pub inner_classes: Vec<InnerClass>,

	pub fields: Vec<FieldNode>,
	pub methods: Vec<MethodNode>,
}

impl Default for ClassNode {
	fn default() -> Self {
		ClassNode {
			version: Version::default(),
			access: Access::empty(),
			name: JavaString::new(),
			signature: None,
			super_name: None,
			interfaces: Vec::new(),

			source_file: None,
			enclosing_method: None,
			runtime_visible_annotations: Vec::new(),
			inner_classes: Vec::new(),

			fields: Vec::new(),
			methods: Vec::new(),
		}
	}
}

/// The contents of an `EnclosingMethod` attribute. Only local and anonymous classes have one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnclosingMethod {
	/// The innermost class enclosing this class.
	pub owner: JavaString,
	/// `None` if the class isn't immediately enclosed by a method or constructor.
	pub name: Option<JavaString>,
	pub descriptor: Option<JavaString>,
}

/// One entry of the `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InnerClass {
	pub name: JavaString,
	pub outer_name: Option<JavaString>,
	/// The simple name, `None` for anonymous classes.
	pub inner_name: Option<JavaString>,
	pub access: Access,
}
