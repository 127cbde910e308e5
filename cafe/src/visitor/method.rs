use anyhow::Result;
use crate::tree::annotation::Annotation;
use crate::tree::method::{Code, LineNumber, LocalVariable};

/// Receives the contents of a method.
///
/// The annotations come first, then the code, then the line numbers and then the local variables.
/// Line numbers and local variables are stored inside the code, so reading with
/// [`ReadFlags::SKIP_CODE`][crate::ReadFlags::SKIP_CODE] leaves out all three.
/// [`ReadFlags::SKIP_DEBUG`][crate::ReadFlags::SKIP_DEBUG] only leaves out line numbers and local variables.
pub trait MethodVisitor {
	fn visit_annotation(&mut self, annotation: Annotation) -> Result<()>;
	fn visit_code(&mut self, code: Code) -> Result<()>;
	fn visit_line_number(&mut self, line_number: LineNumber) -> Result<()>;
	fn visit_local_variable(&mut self, local_variable: LocalVariable) -> Result<()>;
}
