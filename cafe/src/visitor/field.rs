use anyhow::Result;
use crate::tree::annotation::Annotation;

pub trait FieldVisitor {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()>;
}
