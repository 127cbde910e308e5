use std::fmt::{Debug, Formatter};
use anyhow::{anyhow, Context, Result};
use java_string::JavaString;
use log::{debug, trace};
use crate::class_constants::attribute;
use crate::class_reader::cursor::Cursor;
use crate::class_reader::pool::PoolRead;
use crate::flags::{Access, ReadFlags};
use crate::tree::class::EnclosingMethod;
use crate::tree::constant::BootstrapMethod;
use crate::ClassReader;

/// The `attribute_name_index` and `attribute_length` items of an attribute, with the name resolved.
pub(crate) struct AttributeHeader<'a> {
	pub(crate) name: &'a [u8],
	pub(crate) length: u32,
	/// The offset of the first byte after the `attribute_length` item.
	pub(crate) payload: usize,
}

impl<'a> AttributeHeader<'a> {
	pub(crate) fn read(cursor: &mut Cursor, pool: PoolRead<'a>) -> Result<AttributeHeader<'a>> {
		let name = pool.get_utf8_bytes(cursor.read_u16()?)?;
		let length = cursor.read_u32()?;
		Ok(AttributeHeader { name, length, payload: cursor.pos() })
	}

	/// Moves the cursor to the end of the attribute.
	///
	/// The declared length is what counts, no matter how much of the payload was read.
	pub(crate) fn goto_end(&self, cursor: &mut Cursor) -> Result<()> {
		let end = self.payload.checked_add(self.length as usize)
			.with_context(|| anyhow!("attribute {self:?} overflows"))?;
		cursor.goto(end)
			.with_context(|| anyhow!("attribute {self:?} doesn't fit"))
	}
}

impl Debug for AttributeHeader<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?} at offset {} with length {}", String::from_utf8_lossy(self.name), self.payload, self.length)
	}
}

/// The start offsets of the entries of a `BootstrapMethods` attribute.
///
/// The entries are only decoded when asked for with [`BootstrapMethods::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BootstrapMethods {
	offsets: Vec<usize>,
}

impl BootstrapMethods {
	/// Reads the attribute payload, the cursor must be at the `num_bootstrap_methods` item.
	pub(crate) fn read(cursor: &mut Cursor) -> Result<BootstrapMethods> {
		let count = cursor.read_u16()?;

		let mut offsets = Vec::with_capacity(count as usize);
		for _ in 0..count {
			offsets.push(cursor.pos());
			// bootstrap_method_ref
			cursor.skip(2)?;
			let num_bootstrap_arguments = cursor.read_u16_as_usize()?;
			cursor.skip(2 * num_bootstrap_arguments)?;
		}

		Ok(BootstrapMethods { offsets })
	}

	/// Scans the class attribute table for a `BootstrapMethods` attribute, the cursor must be at the
	/// `attributes_count` item of the class.
	///
	/// Other attributes are only skipped, so a broken `Signature` or `SourceFile` doesn't matter here.
	pub(crate) fn find(cursor: &mut Cursor, pool: PoolRead) -> Result<Option<BootstrapMethods>> {
		let mut bootstrap_methods = None;

		let attributes_count = cursor.read_u16()?;
		for _ in 0..attributes_count {
			let header = AttributeHeader::read(cursor, pool)
				.context("failed to read class attribute")?;

			if header.name == attribute::BOOTSTRAP_METHODS {
				bootstrap_methods = Some(BootstrapMethods::read(cursor)?);
			}

			header.goto_end(cursor)?;
		}

		Ok(bootstrap_methods)
	}

	/// The offsets of the `bootstrap_method_ref` items, in table order.
	pub fn offsets(&self) -> &[usize] {
		&self.offsets
	}

	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}

	/// Decodes the bootstrap method with the given index, as used by `CONSTANT_InvokeDynamic_info`.
	pub fn get(&self, reader: &ClassReader, index: usize) -> Result<BootstrapMethod> {
		let offset = *self.offsets.get(index)
			.with_context(|| anyhow!("no bootstrap method with index {index}, there are only {}", self.offsets.len()))?;

		let pool = reader.pool();
		let mut cursor = Cursor::new(reader.bytecode(), offset);

		let handle = pool.get_method_handle(cursor.read_u16()?)
			.with_context(|| anyhow!("failed to read handle of bootstrap method {index}"))?;
		let arguments = cursor.read_vec(|r| r.read_u16_as_usize(), |r| r.read_u16())?;

		Ok(BootstrapMethod { handle, arguments })
	}
}

/// The class attributes a traversal needs, found by scanning the class attribute table once.
///
/// Attributes that are only needed later, like the annotations and the inner classes, are just remembered by offset.
#[derive(Debug, Default)]
pub(crate) struct ClassAttributes {
	pub(crate) signature: Option<JavaString>,
	pub(crate) source_file: Option<JavaString>,
	pub(crate) enclosing_method: Option<EnclosingMethod>,
	/// The offset of the payload of the first `RuntimeVisibleAnnotations` attribute.
	pub(crate) annotations: Option<usize>,
	/// The offset of the payload of the `InnerClasses` attribute, not set when skipping inner classes.
	pub(crate) inner_classes: Option<usize>,
	pub(crate) bootstrap_methods: Option<BootstrapMethods>,
	/// Set from the `Deprecated` and `Synthetic` attributes.
	pub(crate) access: Access,
}

impl ClassAttributes {
	/// Reads the class attribute table, the cursor must be at the `attributes_count` item of the class.
	pub(crate) fn read(cursor: &mut Cursor, pool: PoolRead, flags: ReadFlags) -> Result<ClassAttributes> {
		let mut attributes = ClassAttributes::default();

		let attributes_count = cursor.read_u16()?;
		for _ in 0..attributes_count {
			let header = AttributeHeader::read(cursor, pool)
				.context("failed to read class attribute")?;

			match header.name {
				attribute::SIGNATURE => {
					attributes.signature = Some(pool.get_utf8(cursor.read_u16()?)?);
				},
				attribute::SOURCE_FILE => {
					attributes.source_file = Some(pool.get_utf8(cursor.read_u16()?)?);
				},
				attribute::ENCLOSING_METHOD => {
					attributes.enclosing_method = Some(read_enclosing_method(cursor, pool)?);
				},
				attribute::RUNTIME_VISIBLE_ANNOTATIONS => {
					if attributes.annotations.is_none() {
						attributes.annotations = Some(header.payload);
					} else {
						debug!("ignoring another RuntimeVisibleAnnotations attribute at offset {}", header.payload);
					}
				},
				attribute::INNER_CLASSES => {
					if !flags.contains(ReadFlags::SKIP_INNER_CLASSES) {
						attributes.inner_classes = Some(header.payload);
					}
				},
				attribute::BOOTSTRAP_METHODS => {
					attributes.bootstrap_methods = Some(BootstrapMethods::read(cursor)?);
				},
				attribute::DEPRECATED => attributes.access |= Access::DEPRECATED,
				attribute::SYNTHETIC => attributes.access |= Access::SYNTHETIC,
				_ => trace!("skipping class attribute {header:?}"),
			}

			header.goto_end(cursor)?;
		}

		Ok(attributes)
	}
}

fn read_enclosing_method(cursor: &mut Cursor, pool: PoolRead) -> Result<EnclosingMethod> {
	let owner = pool.get_class(cursor.read_u16()?)?;
	let method = pool.get_optional(cursor.read_u16()?, PoolRead::get_name_and_type)?;
	let (name, descriptor) = method.unzip();
	Ok(EnclosingMethod { owner, name, descriptor })
}
