use anyhow::{anyhow, bail, Context, Result};
use java_string::JavaString;
use crate::class_constants::pool;
use crate::class_reader::cursor::{Cursor, read_u16_at};
use crate::jstring;
use crate::tree::constant::{Constant, Handle, HandleKind};

/// The offsets of all the constant pool entries of a class file.
///
/// Index `0` and the second slot of `Long` and `Double` entries are unusable, and stored as offset `0`.
/// Any other offset points just after the tag byte of the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConstantPool {
	offsets: Vec<usize>,
	end: usize,
}

impl ConstantPool {
	/// Walks the `constant_pool` item, which always starts at offset `10`, after the magic, the version and the
	/// `constant_pool_count` item.
	pub(crate) fn index(code: &[u8]) -> Result<ConstantPool> {
		let mut cursor = Cursor::new(code, 8);
		let count = cursor.read_u16_as_usize().context("failed to read constant pool count")?;
		if count == 0 {
			bail!("constant pool count must be at least 1");
		}

		let mut offsets = vec![0; count];
		let mut index = 1;
		while index < count {
			let tag = cursor.read_u8()?;
			let offset = cursor.pos();
			offsets[index] = offset;

			let size = match tag {
				pool::UTF8 => 2 + read_u16_at(code, offset)? as usize,
				pool::INTEGER | pool::FLOAT => 4,
				pool::LONG | pool::DOUBLE => {
					// these take up two indices
					index += 1;
					8
				},
				pool::CLASS | pool::STRING | pool::METHOD_TYPE | pool::MODULE | pool::PACKAGE => 2,
				pool::FIELD_REF | pool::METHOD_REF | pool::INTERFACE_METHOD_REF | pool::NAME_AND_TYPE => 4,
				pool::DYNAMIC | pool::INVOKE_DYNAMIC => 4,
				pool::METHOD_HANDLE => 3,
				tag => bail!("unknown constant pool tag {tag} for entry {index} at offset {}", offset - 1),
			};
			cursor.skip(size)
				.with_context(|| anyhow!("constant pool entry {index} at offset {} doesn't fit", offset - 1))?;

			index += 1;
		}

		Ok(ConstantPool { offsets, end: cursor.pos() })
	}

	/// The offset of the first byte after the constant pool.
	pub(crate) fn end(&self) -> usize {
		self.end
	}

	pub(crate) fn read<'a>(&'a self, code: &'a [u8]) -> PoolRead<'a> {
		PoolRead { code, offsets: &self.offsets }
	}
}

/// Typed access to the entries of a [`ConstantPool`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct PoolRead<'a> {
	code: &'a [u8],
	offsets: &'a [usize],
}

impl<'a> PoolRead<'a> {
	fn entry_with_tag(&self, index: u16) -> Result<(u8, Cursor<'a>)> {
		let offset = self.offsets.get(index as usize)
			.copied()
			.filter(|&offset| offset != 0)
			.with_context(|| anyhow!("constant pool index {index} is out of bounds or unusable"))?;
		let tag = self.code[offset - 1];
		Ok((tag, Cursor::new(self.code, offset)))
	}

	fn entry(&self, index: u16, expected: u8) -> Result<Cursor<'a>> {
		let (tag, cursor) = self.entry_with_tag(index)?;
		if tag != expected {
			bail!("constant pool entry {index} has tag {tag}, expected tag {expected}");
		}
		Ok(cursor)
	}

	pub(crate) fn get_optional<T>(&self, index: u16, f: impl FnOnce(&Self, u16) -> Result<T>) -> Result<Option<T>> {
		if index == 0 {
			Ok(None)
		} else {
			f(self, index).map(Some)
		}
	}

	/// Gets the raw contents of an `Utf8` entry, without decoding them.
	pub(crate) fn get_utf8_bytes(&self, index: u16) -> Result<&'a [u8]> {
		let mut cursor = self.entry(index, pool::UTF8)?;
		let length = cursor.read_u16_as_usize()?;
		cursor.read_slice(length)
	}

	pub(crate) fn get_utf8(&self, index: u16) -> Result<JavaString> {
		jstring::from_slice_to_string(self.get_utf8_bytes(index)?)
			.with_context(|| anyhow!("failed to decode constant pool entry {index}"))
	}

	pub(crate) fn get_class(&self, index: u16) -> Result<JavaString> {
		let mut cursor = self.entry(index, pool::CLASS)?;
		self.get_utf8(cursor.read_u16()?)
	}

	pub(crate) fn get_name_and_type(&self, index: u16) -> Result<(JavaString, JavaString)> {
		let mut cursor = self.entry(index, pool::NAME_AND_TYPE)?;
		let name = self.get_utf8(cursor.read_u16()?)?;
		let descriptor = self.get_utf8(cursor.read_u16()?)?;
		Ok((name, descriptor))
	}

	pub(crate) fn get_integer(&self, index: u16) -> Result<i32> {
		self.entry(index, pool::INTEGER)?.read_i32()
	}

	pub(crate) fn get_float(&self, index: u16) -> Result<f32> {
		Ok(f32::from_bits(self.entry(index, pool::FLOAT)?.read_u32()?))
	}

	fn read_u64(cursor: &mut Cursor) -> Result<u64> {
		let high = cursor.read_u32()? as u64;
		let low = cursor.read_u32()? as u64;
		Ok(high << 32 | low)
	}

	pub(crate) fn get_long(&self, index: u16) -> Result<i64> {
		Ok(Self::read_u64(&mut self.entry(index, pool::LONG)?)? as i64)
	}

	pub(crate) fn get_double(&self, index: u16) -> Result<f64> {
		Ok(f64::from_bits(Self::read_u64(&mut self.entry(index, pool::DOUBLE)?)?))
	}

	pub(crate) fn get_string(&self, index: u16) -> Result<JavaString> {
		let mut cursor = self.entry(index, pool::STRING)?;
		self.get_utf8(cursor.read_u16()?)
	}

	/// Gets the value of a `ConstantValue` attribute.
	pub(crate) fn get_constant_value(&self, index: u16) -> Result<Constant> {
		let (tag, _) = self.entry_with_tag(index)?;
		Ok(match tag {
			pool::INTEGER => Constant::Integer(self.get_integer(index)?),
			pool::FLOAT => Constant::Float(self.get_float(index)?),
			pool::LONG => Constant::Long(self.get_long(index)?),
			pool::DOUBLE => Constant::Double(self.get_double(index)?),
			pool::STRING => Constant::String(self.get_string(index)?),
			tag => bail!("constant pool entry {index} with tag {tag} can't be a constant value"),
		})
	}

	/// Gets a `Fieldref`, `Methodref` or `InterfaceMethodref` entry as owner, name and descriptor.
	///
	/// The `bool` is `true` only for an `InterfaceMethodref`.
	fn get_member_ref(&self, index: u16) -> Result<(JavaString, JavaString, JavaString, bool)> {
		let (tag, mut cursor) = self.entry_with_tag(index)?;
		let is_interface = match tag {
			pool::FIELD_REF | pool::METHOD_REF => false,
			pool::INTERFACE_METHOD_REF => true,
			tag => bail!("constant pool entry {index} with tag {tag} isn't a field or method reference"),
		};
		let owner = self.get_class(cursor.read_u16()?)?;
		let (name, descriptor) = self.get_name_and_type(cursor.read_u16()?)?;
		Ok((owner, name, descriptor, is_interface))
	}

	pub(crate) fn get_method_handle(&self, index: u16) -> Result<Handle> {
		let mut cursor = self.entry(index, pool::METHOD_HANDLE)?;
		let kind = HandleKind::try_from(cursor.read_u8()?)?;
		let reference_index = cursor.read_u16()?;

		let (owner, name, descriptor, is_interface) = self.get_member_ref(reference_index)
			.with_context(|| anyhow!("failed to read reference of method handle {index}"))?;

		Ok(Handle { kind, owner, name, descriptor, is_interface })
	}
}
