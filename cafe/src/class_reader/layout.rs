use anyhow::{anyhow, Context, Result};
use log::trace;
use crate::class_reader::cursor::{Cursor, read_u16_at};

/// Returns the offset after an attribute starting at `pos` with the `attribute_length` item `declared_length`.
///
/// An attribute is 2 bytes of `attribute_name_index`, 4 bytes of `attribute_length`, and then `declared_length`
/// bytes of payload. Returns `None` if the offset doesn't fit into an `usize`.
pub fn skip_attribute(pos: usize, declared_length: u32) -> Option<usize> {
	pos.checked_add(6)?.checked_add(declared_length as usize)
}

/// Moves the cursor over the `attributes_count` and `attributes` items of a struct, without looking at the contents
/// of the attributes.
pub(crate) fn skip_attributes(cursor: &mut Cursor) -> Result<()> {
	let attributes_count = cursor.read_u16()?;

	for _ in 0..attributes_count {
		let start = cursor.pos();
		cursor.skip(2)?;
		let length = cursor.read_u32()?;

		let next = skip_attribute(start, length)
			.with_context(|| anyhow!("attribute at offset {start} with length {length} overflows"))?;
		cursor.goto(next)
			.with_context(|| anyhow!("attribute at offset {start} with length {length} doesn't fit"))?;
	}

	Ok(())
}

/// Returns the offset after the `fields` or `methods` table starting with its count at `pos`.
///
/// Fields and methods have the same structure: 2 bytes of access flags, 2 bytes of name index, 2 bytes of descriptor
/// index, and then the attributes.
pub(crate) fn skip_class_members(code: &[u8], pos: usize) -> Result<usize> {
	let mut cursor = Cursor::new(code, pos);

	let count = cursor.read_u16()?;
	for _ in 0..count {
		cursor.skip(2 + 2 + 2)?;
		skip_attributes(&mut cursor)?;
	}

	Ok(cursor.pos())
}

/// The offsets of the variable length parts of a class file.
///
/// This is computed once, when a [`ClassReader`][crate::ClassReader] is created, and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassLayout {
	header: usize,
	interfaces_count: u16,
	fields_start: usize,
	methods_start: usize,
	attributes_start: usize,
}

impl ClassLayout {
	/// Computes the layout of the class file, with the class header (the `access_flags` item) at `header`.
	pub(crate) fn index(code: &[u8], header: usize) -> Result<ClassLayout> {
		let interfaces_count = read_u16_at(code, header + 6)
			.context("failed to read interfaces count")?;

		// access_flags, this_class, super_class, interfaces_count and then the interfaces
		let fields_start = header + 8 + 2 * interfaces_count as usize;
		let methods_start = skip_class_members(code, fields_start)
			.context("failed to skip over the fields")?;
		let attributes_start = skip_class_members(code, methods_start)
			.context("failed to skip over the methods")?;
		skip_attributes(&mut Cursor::new(code, attributes_start))
			.context("failed to skip over the class attributes")?;

		let layout = ClassLayout { header, interfaces_count, fields_start, methods_start, attributes_start };
		trace!("indexed class file of {} bytes: {layout:?}", code.len());
		Ok(layout)
	}

	/// The offset of the `access_flags` item, the first item after the constant pool.
	pub fn header(&self) -> usize {
		self.header
	}

	pub fn interfaces_count(&self) -> u16 {
		self.interfaces_count
	}

	/// The offset of the `fields_count` item.
	pub fn fields_start(&self) -> usize {
		self.fields_start
	}

	/// The offset of the `methods_count` item.
	pub fn methods_start(&self) -> usize {
		self.methods_start
	}

	/// The offset of the `attributes_count` item of the class.
	pub fn attributes_start(&self) -> usize {
		self.attributes_start
	}
}
