use anyhow::{anyhow, bail, Context, Result};
use crate::class_reader::cursor::Cursor;
use crate::class_reader::pool::PoolRead;
use crate::tree::annotation::{Annotation, ElementValue, ElementValuePair};
use crate::tree::constant::Constant;

/// Annotations nest through `@` and `[` element values, this limits how deep.
const MAX_DEPTH: usize = 256;

/// Reads the payload of an annotations attribute, handing each annotation to `f`.
///
/// The cursor must be at the `num_annotations` item.
pub(crate) fn read_annotations(
	cursor: &mut Cursor,
	pool: PoolRead,
	mut f: impl FnMut(Annotation) -> Result<()>,
) -> Result<()> {
	let num_annotations = cursor.read_u16()?;
	for i in 0..num_annotations {
		let annotation = read_annotation(cursor, pool, 0)
			.with_context(|| anyhow!("failed to read annotation {i}"))?;
		f(annotation)?;
	}
	Ok(())
}

fn read_annotation(cursor: &mut Cursor, pool: PoolRead, depth: usize) -> Result<Annotation> {
	if depth > MAX_DEPTH {
		bail!("annotations nested deeper than {MAX_DEPTH}");
	}

	let annotation_type = pool.get_utf8(cursor.read_u16()?)?;
	let element_value_pairs = cursor.read_vec(
		|r| r.read_u16_as_usize(),
		|r| Ok(ElementValuePair {
			name: pool.get_utf8(r.read_u16()?)?,
			value: read_element_value(r, pool, depth + 1)?,
		})
	)?;

	Ok(Annotation { annotation_type, element_value_pairs })
}

fn read_element_value(cursor: &mut Cursor, pool: PoolRead, depth: usize) -> Result<ElementValue> {
	if depth > MAX_DEPTH {
		bail!("element values nested deeper than {MAX_DEPTH}");
	}

	let tag = cursor.read_u8()?;
	let value = match tag {
		b'B' => ElementValue::Constant(Constant::Byte(pool.get_integer(cursor.read_u16()?)? as i8)),
		b'C' => ElementValue::Constant(Constant::Char(pool.get_integer(cursor.read_u16()?)? as u16)),
		b'D' => ElementValue::Constant(Constant::Double(pool.get_double(cursor.read_u16()?)?)),
		b'F' => ElementValue::Constant(Constant::Float(pool.get_float(cursor.read_u16()?)?)),
		b'I' => ElementValue::Constant(Constant::Integer(pool.get_integer(cursor.read_u16()?)?)),
		b'J' => ElementValue::Constant(Constant::Long(pool.get_long(cursor.read_u16()?)?)),
		b'S' => ElementValue::Constant(Constant::Short(pool.get_integer(cursor.read_u16()?)? as i16)),
		b'Z' => ElementValue::Constant(Constant::Boolean(pool.get_integer(cursor.read_u16()?)? != 0)),
		b's' => ElementValue::Constant(Constant::String(pool.get_utf8(cursor.read_u16()?)?)),
		b'e' => {
			let type_name = pool.get_utf8(cursor.read_u16()?)?;
			let const_name = pool.get_utf8(cursor.read_u16()?)?;
			ElementValue::Enum { type_name, const_name }
		},
		b'c' => ElementValue::Class(pool.get_utf8(cursor.read_u16()?)?),
		b'@' => ElementValue::AnnotationInterface(read_annotation(cursor, pool, depth + 1)?),
		b'[' => ElementValue::ArrayType(cursor.read_vec(
			|r| r.read_u16_as_usize(),
			|r| read_element_value(r, pool, depth + 1)
		)?),
		tag => bail!("unknown element value tag {tag:?} ({:?})", tag as char),
	};

	Ok(value)
}
