use std::fmt::{Debug, Formatter};
use bitflags::bitflags;

bitflags! {
	/// Options changing what [`ClassReader::accept`][crate::ClassReader::accept] visits.
	///
	/// Use [`ReadFlags::from_bits_truncate`] to convert from a plain integer, unknown bits are dropped.
	#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct ReadFlags: u32 {
		/// Don't visit the `Code` attribute of methods.
		///
		/// Useful if only annotations of methods are of interest.
		const SKIP_CODE = 1;
		/// Don't visit debug information: the source file of the class, and the line numbers and local variables of methods.
		const SKIP_DEBUG = 2;
		const SKIP_CODE_DEBUG = Self::SKIP_CODE.bits() | Self::SKIP_DEBUG.bits();
		/// Don't visit the `InnerClasses` attribute.
		const SKIP_INNER_CLASSES = 4;
	}
}

bitflags! {
	/// The `access_flags` of a class, field, method or inner class.
	///
	/// This holds the 16 bit value from the class file, together with pseudo flags set by the reader
	/// for the `Deprecated` attribute.
	#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct Access: u32 {
		const PUBLIC     = 0x0001;
		const PRIVATE    = 0x0002;
		const PROTECTED  = 0x0004;
		const STATIC     = 0x0008;
		const FINAL      = 0x0010;
		/// Also `ACC_SYNCHRONIZED` for methods.
		const SUPER      = 0x0020;
		/// Also `ACC_BRIDGE` for methods.
		const VOLATILE   = 0x0040;
		/// Also `ACC_VARARGS` for methods.
		const TRANSIENT  = 0x0080;
		const NATIVE     = 0x0100;
		const INTERFACE  = 0x0200;
		const ABSTRACT   = 0x0400;
		const STRICT     = 0x0800;
		/// Set either by the flag itself, or by a `Synthetic` attribute.
		const SYNTHETIC  = 0x1000;
		const ANNOTATION = 0x2000;
		const ENUM       = 0x4000;
		const MODULE     = 0x8000;

		/// Not a flag of the class file: set if there's a `Deprecated` attribute.
		const DEPRECATED = 0x2_0000;
	}
}

impl Access {
	pub const SYNCHRONIZED: Access = Access::SUPER;
	pub const BRIDGE: Access = Access::VOLATILE;
	pub const VARARGS: Access = Access::TRANSIENT;
}

/// Interprets an `u16` as an `access_flags` item.
impl From<u16> for Access {
	fn from(value: u16) -> Self {
		Access::from_bits_retain(value as u32)
	}
}

/// Prints the raw value, then the names of the set flags.
///
/// The names are the ones for classes and fields: the bits of `SYNCHRONIZED`, `BRIDGE` and `VARARGS` show up as
/// `SUPER`, `VOLATILE` and `TRANSIENT`.
impl Debug for Access {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Access({:#06x}) {{ ", self.bits())?;
		for (name, _) in self.iter_names() {
			f.write_str(name)?;
			f.write_str(" ")?;
		}
		f.write_str("}")
	}
}
