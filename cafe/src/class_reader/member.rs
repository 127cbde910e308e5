use anyhow::{anyhow, Context as _, Result};
use java_string::JavaString;
use log::trace;
use crate::class_constants::attribute;
use crate::class_reader::annotation::read_annotations;
use crate::class_reader::attributes::AttributeHeader;
use crate::class_reader::cursor::Cursor;
use crate::class_reader::pool::PoolRead;
use crate::class_reader::Context;
use crate::flags::{Access, ReadFlags};
use crate::tree::method::{Code, ExceptionHandler, LineNumber, LocalVariable};
use crate::visitor::class::ClassVisitor;
use crate::visitor::field::FieldVisitor;
use crate::visitor::method::MethodVisitor;

/// Reads the `fields_count` and `fields` items, the cursor must be at `fields_count`.
///
/// Returns the offset just after the table, which is where the methods start.
pub(crate) fn read_fields(ctx: &mut Context, visitor: &mut impl ClassVisitor) -> Result<usize> {
	let fields_count = ctx.cursor.read_u16()?;
	for i in 0..fields_count {
		read_field(ctx, visitor)
			.with_context(|| anyhow!("failed to read field {i}"))?;
	}
	Ok(ctx.cursor.pos())
}

/// Reads the `methods_count` and `methods` items, the cursor must be at `methods_count`.
///
/// Returns the offset just after the table, which is where the class attributes start.
pub(crate) fn read_methods(ctx: &mut Context, visitor: &mut impl ClassVisitor) -> Result<usize> {
	let methods_count = ctx.cursor.read_u16()?;
	for i in 0..methods_count {
		read_method(ctx, visitor)
			.with_context(|| anyhow!("failed to read method {i}"))?;
	}
	Ok(ctx.cursor.pos())
}

/// The parts of `field_info` and `method_info` that come before the attributes.
struct MemberHeader {
	access: Access,
	name: JavaString,
	descriptor: JavaString,
}

impl MemberHeader {
	fn read(cursor: &mut Cursor, pool: PoolRead) -> Result<MemberHeader> {
		let access = Access::from(cursor.read_u16()?);
		let name = pool.get_utf8(cursor.read_u16()?).context("failed to read member name")?;
		let descriptor = pool.get_utf8(cursor.read_u16()?).context("failed to read member descriptor")?;
		Ok(MemberHeader { access, name, descriptor })
	}
}

fn read_field<V: ClassVisitor>(ctx: &mut Context, visitor: &mut V) -> Result<()> {
	let MemberHeader { mut access, name, descriptor } = MemberHeader::read(&mut ctx.cursor, ctx.pool)?;

	let mut signature = None;
	let mut value = None;
	let mut annotations = None;

	let attributes_count = ctx.cursor.read_u16()?;
	for _ in 0..attributes_count {
		let header = AttributeHeader::read(&mut ctx.cursor, ctx.pool)?;

		match header.name {
			attribute::CONSTANT_VALUE => {
				value = Some(ctx.pool.get_constant_value(ctx.cursor.read_u16()?)?);
			},
			attribute::SIGNATURE => {
				signature = Some(ctx.pool.get_utf8(ctx.cursor.read_u16()?)?);
			},
			attribute::RUNTIME_VISIBLE_ANNOTATIONS => {
				annotations.get_or_insert(header.payload);
			},
			attribute::DEPRECATED => access |= Access::DEPRECATED,
			attribute::SYNTHETIC => access |= Access::SYNTHETIC,
			_ => trace!("skipping field attribute {header:?}"),
		}

		header.goto_end(&mut ctx.cursor)?;
	}

	if let Some(mut field_visitor) = visitor.visit_field(access, name, descriptor, signature, value)? {
		if let Some(offset) = annotations {
			read_annotations(&mut Cursor::new(ctx.code, offset), ctx.pool, |annotation| {
				field_visitor.visit_annotation(annotation)
			}).context("failed to read field annotations")?;
		}

		visitor.finish_field(field_visitor)?;
	}

	Ok(())
}

fn read_method<V: ClassVisitor>(ctx: &mut Context, visitor: &mut V) -> Result<()> {
	let MemberHeader { mut access, name, descriptor } = MemberHeader::read(&mut ctx.cursor, ctx.pool)?;

	let mut signature = None;
	let mut exceptions = Vec::new();
	let mut annotations = None;
	let mut code = None;

	let attributes_count = ctx.cursor.read_u16()?;
	for _ in 0..attributes_count {
		let header = AttributeHeader::read(&mut ctx.cursor, ctx.pool)?;

		match header.name {
			attribute::CODE => {
				if !ctx.flags.contains(ReadFlags::SKIP_CODE) {
					code = Some(header.payload);
				}
			},
			attribute::EXCEPTIONS => {
				let pool = ctx.pool;
				exceptions = ctx.cursor.read_vec(
					|r| r.read_u16_as_usize(),
					|r| pool.get_class(r.read_u16()?),
				).context("failed to read exceptions")?;
			},
			attribute::SIGNATURE => {
				signature = Some(ctx.pool.get_utf8(ctx.cursor.read_u16()?)?);
			},
			attribute::RUNTIME_VISIBLE_ANNOTATIONS => {
				annotations.get_or_insert(header.payload);
			},
			attribute::DEPRECATED => access |= Access::DEPRECATED,
			attribute::SYNTHETIC => access |= Access::SYNTHETIC,
			_ => trace!("skipping method attribute {header:?}"),
		}

		header.goto_end(&mut ctx.cursor)?;
	}

	if let Some(mut method_visitor) = visitor.visit_method(access, name, descriptor, signature, exceptions)? {
		if let Some(offset) = annotations {
			read_annotations(&mut Cursor::new(ctx.code, offset), ctx.pool, |annotation| {
				method_visitor.visit_annotation(annotation)
			}).context("failed to read method annotations")?;
		}

		if let Some(offset) = code {
			read_code(&mut Cursor::new(ctx.code, offset), ctx.pool, ctx.flags, &mut method_visitor)
				.context("failed to read code")?;
		}

		visitor.finish_method(method_visitor)?;
	}

	Ok(())
}

/// Reads the payload of a `Code` attribute.
fn read_code(cursor: &mut Cursor, pool: PoolRead, flags: ReadFlags, visitor: &mut impl MethodVisitor) -> Result<()> {
	let max_stack = cursor.read_u16()?;
	let max_locals = cursor.read_u16()?;
	let code_length = cursor.read_u32()? as usize;
	let bytecode = cursor.read_slice(code_length)
		.context("failed to read bytecode")?
		.to_vec();

	let exception_table = cursor.read_vec(
		|r| r.read_u16_as_usize(),
		|r| Ok(ExceptionHandler {
			start_pc: r.read_u16()?,
			end_pc: r.read_u16()?,
			handler_pc: r.read_u16()?,
			catch_type: pool.get_optional(r.read_u16()?, PoolRead::get_class)?,
		})
	).context("failed to read exception table")?;

	visitor.visit_code(Code { max_stack, max_locals, bytecode, exception_table })?;

	if flags.contains(ReadFlags::SKIP_DEBUG) {
		return Ok(());
	}

	let mut line_numbers = Vec::new();
	let mut local_variables = Vec::new();

	let attributes_count = cursor.read_u16()?;
	for _ in 0..attributes_count {
		let header = AttributeHeader::read(cursor, pool)?;

		match header.name {
			attribute::LINE_NUMBER_TABLE => {
				let table = cursor.read_vec(
					|r| r.read_u16_as_usize(),
					|r| Ok(LineNumber {
						start_pc: r.read_u16()?,
						line_number: r.read_u16()?,
					})
				).context("failed to read line number table")?;
				line_numbers.extend(table);
			},
			attribute::LOCAL_VARIABLE_TABLE => {
				let table = cursor.read_vec(
					|r| r.read_u16_as_usize(),
					|r| Ok(LocalVariable {
						start_pc: r.read_u16()?,
						length: r.read_u16()?,
						name: pool.get_utf8(r.read_u16()?)?,
						descriptor: pool.get_utf8(r.read_u16()?)?,
						index: r.read_u16()?,
					})
				).context("failed to read local variable table")?;
				local_variables.extend(table);
			},
			_ => trace!("skipping code attribute {header:?}"),
		}

		header.goto_end(cursor)?;
	}

	for line_number in line_numbers {
		visitor.visit_line_number(line_number)?;
	}
	for local_variable in local_variables {
		visitor.visit_local_variable(local_variable)?;
	}

	Ok(())
}
