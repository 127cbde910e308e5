//! Conversion of the string format used in the Java Virtual Machine Specification into rust strings.
//!
//! The Java Virtual Machine Specification's string format is using a 2x3-format for supplementary characters and
//! stores `\0` using two bytes.
//!
//! See <https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.4.7> for the complete specification of
//! the string format used in the Java Virtual Machine Specification.

use anyhow::{anyhow, Context, Result};
use java_string::JavaString;

/// Takes in the bytes of a `CONSTANT_Utf8_info`, tries to read them into a [`JavaString`].
pub(crate) fn from_slice_to_string(slice: &[u8]) -> Result<JavaString> {
	JavaString::from_modified_utf8(slice.to_vec())
		.with_context(|| anyhow!("invalid java utf8 contents: {slice:?}"))
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use java_string::JavaStr;
	use pretty_assertions::assert_eq;
	use crate::jstring::from_slice_to_string;

	#[test]
	fn ascii() -> Result<()> {
		assert_eq!(from_slice_to_string(b"java/lang/Object")?, JavaStr::from_str("java/lang/Object"));
		Ok(())
	}

	#[test]
	fn zero() -> Result<()> {
		let raw = [0b1100_0000, 0b1000_0000, 0b1100_0000, 0b1000_0000];
		assert_eq!(from_slice_to_string(&raw)?, JavaStr::from_str("\0\0"));
		Ok(())
	}

	#[test]
	fn two_bytes() -> Result<()> {
		let raw = [
			0b1100_0010, 0b1000_0000,
			0b1100_1111, 0b1000_1010,
			0b1101_1111, 0b1011_1111,
		];
		assert_eq!(from_slice_to_string(&raw)?, JavaStr::from_str("\u{0080}\u{03ca}\u{07ff}"));
		Ok(())
	}

	#[test]
	fn invalid() {
		// a three byte sequence cut off after the first byte
		assert!(from_slice_to_string(&[0b1110_0000]).is_err());
	}
}
