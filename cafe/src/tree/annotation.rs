use java_string::{JavaStr, JavaString};
use crate::tree::constant::Constant;

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
	/// The field descriptor of the annotation interface, like `Ljava/lang/Deprecated;`.
	pub annotation_type: JavaString,
	pub element_value_pairs: Vec<ElementValuePair>,
}

impl Annotation {
	/// Returns the value of the element with the given name, if present.
	pub fn get(&self, name: &str) -> Option<&ElementValue> {
		self.element_value_pairs.iter()
			.find(|pair| pair.name.as_java_str() == JavaStr::from_str(name))
			.map(|pair| &pair.value)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementValuePair {
	pub name: JavaString,
	pub value: ElementValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
	Constant(Constant),
	Enum {
		type_name: JavaString,
		const_name: JavaString,
	},
	/// The return descriptor of the class, like `Ljava/lang/String;` or `V`.
	Class(JavaString),
	AnnotationInterface(Annotation),
	ArrayType(Vec<ElementValue>),
}
