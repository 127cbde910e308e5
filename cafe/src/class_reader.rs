use std::io::Read;
use anyhow::{anyhow, bail, Context as _, Result};
use bytes::Bytes;
use java_string::JavaString;
use log::{trace, warn};
use crate::class_constants::MAGIC;
use crate::class_reader::annotation::read_annotations;
use crate::class_reader::attributes::{BootstrapMethods, ClassAttributes};
use crate::class_reader::cursor::Cursor;
use crate::class_reader::layout::ClassLayout;
use crate::class_reader::pool::{ConstantPool, PoolRead};
use crate::flags::{Access, ReadFlags};
use crate::tree::class::InnerClass;
use crate::tree::version::Version;
use crate::visitor::class::ClassVisitor;

pub(crate) mod cursor;
pub(crate) mod pool;
pub(crate) mod layout;
pub(crate) mod attributes;
mod annotation;
mod member;

/// The newest class file version this crate knows about. Newer ones are still read.
const NEWEST_KNOWN: Version = Version::V23;

/// A parsed class file that can be replayed into any number of [`ClassVisitor`]s.
///
/// Creating a `ClassReader` validates the magic, indexes the constant pool and computes the [`ClassLayout`]. After
/// that the reader never changes: [`ClassReader::accept`] takes `&self`, and all the state of a traversal lives in
/// that call.
#[derive(Debug, Clone)]
pub struct ClassReader {
	code: Bytes,
	pool: ConstantPool,
	layout: ClassLayout,
}

/// The state of one decoding pass over a class.
pub(crate) struct Context<'a> {
	pub(crate) code: &'a [u8],
	pub(crate) cursor: Cursor<'a>,
	pub(crate) pool: PoolRead<'a>,
	pub(crate) flags: ReadFlags,
}

impl<'a> Context<'a> {
	fn new(reader: &'a ClassReader, pos: usize, flags: ReadFlags) -> Context<'a> {
		Context {
			code: &reader.code,
			cursor: Cursor::new(&reader.code, pos),
			pool: reader.pool(),
			flags,
		}
	}
}

impl ClassReader {
	/// Parses the structure of the class file in `code`.
	///
	/// Fails if the magic is wrong, or if the constant pool, the interfaces, the fields or the methods don't fit
	/// into the data.
	pub fn new(code: impl Into<Bytes>) -> Result<ClassReader> {
		let code = code.into();
		if code.is_empty() {
			bail!("class file is empty");
		}

		let magic = Cursor::new(&code, 0).read_u32().context("failed to read magic")?;
		if magic != MAGIC {
			bail!("invalid magic {magic:#x}, expected {MAGIC:#x}");
		}

		let pool = ConstantPool::index(&code).context("failed to index constant pool")?;
		let layout = ClassLayout::index(&code, pool.end())
			.context("failed to compute class file layout")?;

		let reader = ClassReader { code, pool, layout };

		let version = reader.version()?;
		if version > NEWEST_KNOWN {
			warn!("class file version {version} is newer than {NEWEST_KNOWN}, reading it anyway");
		}

		Ok(reader)
	}

	/// Reads the whole stream and parses it with [`ClassReader::new`].
	pub fn from_reader(mut reader: impl Read) -> Result<ClassReader> {
		let mut code = Vec::new();
		reader.read_to_end(&mut code).context("failed to read class file")?;
		ClassReader::new(code)
	}

	/// The whole class file.
	pub fn bytecode(&self) -> &[u8] {
		&self.code
	}

	pub fn layout(&self) -> &ClassLayout {
		&self.layout
	}

	pub(crate) fn pool(&self) -> PoolRead<'_> {
		self.pool.read(&self.code)
	}

	fn header_cursor(&self, item: usize) -> Cursor<'_> {
		Cursor::new(&self.code, self.layout.header() + item)
	}

	pub fn version(&self) -> Result<Version> {
		let mut cursor = Cursor::new(&self.code, 4);
		let minor = cursor.read_u16()?;
		let major = cursor.read_u16()?;
		Ok(Version::new(major, minor))
	}

	/// The `access_flags` item, without the flags from the `Deprecated` or `Synthetic` attributes.
	pub fn access(&self) -> Result<Access> {
		Ok(Access::from(self.header_cursor(0).read_u16()?))
	}

	/// The internal name of the class, like `java/lang/String`.
	pub fn name(&self) -> Result<JavaString> {
		let index = self.header_cursor(2).read_u16()?;
		self.pool().get_class(index).context("failed to read class name")
	}

	/// The internal name of the super class, `None` if the class has none.
	pub fn super_name(&self) -> Result<Option<JavaString>> {
		let index = self.header_cursor(4).read_u16()?;
		self.pool().get_optional(index, PoolRead::get_class).context("failed to read super class name")
	}

	/// The internal names of the direct super interfaces, in declaration order.
	pub fn interfaces(&self) -> Result<Vec<JavaString>> {
		let pool = self.pool();
		let mut cursor = self.header_cursor(8);
		(0..self.layout.interfaces_count())
			.map(|i| {
				let index = cursor.read_u16()?;
				pool.get_class(index).with_context(|| anyhow!("failed to read interface {i}"))
			})
			.collect()
	}

	/// The entries of the `BootstrapMethods` attribute, or `None` if the class has no such attribute.
	pub fn bootstrap_methods(&self) -> Result<Option<BootstrapMethods>> {
		let mut cursor = Cursor::new(&self.code, self.layout.attributes_start());
		BootstrapMethods::find(&mut cursor, self.pool())
			.context("failed to read bootstrap methods")
	}

	/// Makes the visitor visit the class.
	///
	/// The first malformed structure, or the first error returned from the visitor, stops the traversal and is
	/// returned.
	pub fn accept(&self, visitor: &mut impl ClassVisitor, flags: ReadFlags) -> Result<()> {
		let pool = self.pool();

		let mut cursor = Cursor::new(&self.code, self.layout.attributes_start());
		let attributes = ClassAttributes::read(&mut cursor, pool, flags)
			.context("failed to read class attributes")?;
		trace!("read class attributes: {attributes:?}");
		if let Some(bootstrap_methods) = &attributes.bootstrap_methods {
			trace!("class has {} bootstrap methods", bootstrap_methods.len());
		}

		let version = self.version()?;
		let access = self.access()? | attributes.access;
		let name = self.name()?;
		let super_name = self.super_name()?;
		let interfaces = self.interfaces()?;

		visitor.visit(version, access, name, attributes.signature, super_name, interfaces)?;

		if !flags.contains(ReadFlags::SKIP_DEBUG) {
			if let Some(source_file) = attributes.source_file {
				visitor.visit_source(source_file)?;
			}
		}

		if let Some(enclosing_method) = attributes.enclosing_method {
			visitor.visit_outer_class(enclosing_method)?;
		}

		if let Some(offset) = attributes.annotations {
			read_annotations(&mut Cursor::new(&self.code, offset), pool, |annotation| {
				visitor.visit_annotation(annotation)
			}).context("failed to read class annotations")?;
		}

		if let Some(offset) = attributes.inner_classes {
			let mut cursor = Cursor::new(&self.code, offset);
			let number_of_classes = cursor.read_u16()?;
			for _ in 0..number_of_classes {
				let inner_class = read_inner_class(&mut cursor, pool)
					.context("failed to read inner class")?;
				visitor.visit_inner_class(inner_class)?;
			}
		}

		let mut ctx = Context::new(self, self.layout.fields_start(), flags);
		let methods_start = member::read_fields(&mut ctx, visitor)
			.context("failed to read fields")?;

		let mut ctx = Context::new(self, methods_start, flags);
		member::read_methods(&mut ctx, visitor)
			.context("failed to read methods")?;

		visitor.visit_end()
	}
}

fn read_inner_class(cursor: &mut Cursor, pool: PoolRead) -> Result<InnerClass> {
	let name = pool.get_class(cursor.read_u16()?)?;
	let outer_name = pool.get_optional(cursor.read_u16()?, PoolRead::get_class)?;
	let inner_name = pool.get_optional(cursor.read_u16()?, PoolRead::get_utf8)?;
	let access = Access::from(cursor.read_u16()?);
	Ok(InnerClass { name, outer_name, inner_name, access })
}
