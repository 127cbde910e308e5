use anyhow::{bail, Error, Result};
use java_string::JavaString;

/// A constant from the constant pool, as used by the `ConstantValue` attribute and by annotations.
///
/// `ConstantValue` attributes only ever produce [`Constant::Integer`], [`Constant::Float`], [`Constant::Long`],
/// [`Constant::Double`] and [`Constant::String`]. The other variants come from annotation element values.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
	Byte(i8),
	Char(u16),
	Double(f64),
	Float(f32),
	Integer(i32),
	Long(i64),
	Short(i16),
	Boolean(bool),
	String(JavaString),
}

/// The `reference_kind` of a `CONSTANT_MethodHandle_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
	GetField,
	GetStatic,
	PutField,
	PutStatic,
	InvokeVirtual,
	InvokeStatic,
	InvokeSpecial,
	NewInvokeSpecial,
	InvokeInterface,
}

impl TryFrom<u8> for HandleKind {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self> {
		Ok(match value {
			1 => HandleKind::GetField,
			2 => HandleKind::GetStatic,
			3 => HandleKind::PutField,
			4 => HandleKind::PutStatic,
			5 => HandleKind::InvokeVirtual,
			6 => HandleKind::InvokeStatic,
			7 => HandleKind::InvokeSpecial,
			8 => HandleKind::NewInvokeSpecial,
			9 => HandleKind::InvokeInterface,
			kind => bail!("unknown `reference_kind` {kind} for `MethodHandle` pool entry"),
		})
	}
}

/// A method handle, with the field or method it references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
	pub kind: HandleKind,
	pub owner: JavaString,
	pub name: JavaString,
	pub descriptor: JavaString,
	/// `true` if the reference is an `InterfaceMethodref`.
	pub is_interface: bool,
}

/// One entry of the `BootstrapMethods` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BootstrapMethod {
	pub handle: Handle,
	/// The raw constant pool indices of the static arguments.
	///
	/// They're not resolved, as an argument may itself be a dynamic constant referring to another bootstrap method.
	pub arguments: Vec<u16>,
}
