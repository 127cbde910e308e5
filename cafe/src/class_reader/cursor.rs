use anyhow::{anyhow, bail, Context, Result};

/// A read position inside the bytes of a class file.
///
/// All reads are bounds checked: reading past the end of the data is an error. A `Cursor` is deliberately not
/// [`Clone`], every decoding step borrows it mutably.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
	code: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(code: &'a [u8], pos: usize) -> Cursor<'a> {
		Cursor { code, pos }
	}

	pub(crate) fn pos(&self) -> usize {
		self.pos
	}

	/// Moves to the absolute position `pos`. Moving to exactly the end of the data is allowed.
	pub(crate) fn goto(&mut self, pos: usize) -> Result<()> {
		if pos > self.code.len() {
			bail!("offset {pos} is outside of the class file of length {}", self.code.len());
		}
		self.pos = pos;
		Ok(())
	}

	pub(crate) fn skip(&mut self, n: usize) -> Result<()> {
		let pos = self.pos.checked_add(n)
			.with_context(|| anyhow!("skipping {n} bytes from offset {} overflows", self.pos))?;
		self.goto(pos)
	}

	pub(crate) fn read_slice(&mut self, size: usize) -> Result<&'a [u8]> {
		let (code, pos) = (self.code, self.pos);
		let slice = pos.checked_add(size)
			.and_then(|end| code.get(pos..end))
			.with_context(|| anyhow!(
				"couldn't read {size} bytes at offset {pos}, the class file is only {} bytes long", code.len()
			))?;
		self.pos += size;
		Ok(slice)
	}

	fn read_n<const N: usize>(&mut self) -> Result<[u8; N]> {
		let slice = self.read_slice(N)?;
		let mut buf = [0u8; N];
		buf.copy_from_slice(slice);
		Ok(buf)
	}

	pub(crate) fn read_u8(&mut self) -> Result<u8> {
		Ok(u8::from_be_bytes(self.read_n().context("couldn't read u8, perhaps the data's end is reached?")?))
	}
	pub(crate) fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_n().context("couldn't read u16, perhaps the data's end is reached?")?))
	}
	pub(crate) fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_n().context("couldn't read u32, perhaps the data's end is reached?")?))
	}
	pub(crate) fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_n().context("couldn't read i32, perhaps the data's end is reached?")?))
	}
	pub(crate) fn read_u16_as_usize(&mut self) -> Result<usize> {
		Ok(self.read_u16()? as usize)
	}

	pub(crate) fn read_vec<T, S, E>(&mut self, get_size: S, mut get_element: E) -> Result<Vec<T>>
	where
		S: FnOnce(&mut Self) -> Result<usize>,
		E: FnMut(&mut Self) -> Result<T>
	{
		let size = get_size(self)?;
		let mut vec = Vec::with_capacity(size);
		for _ in 0..size {
			vec.push(get_element(self)?);
		}
		Ok(vec)
	}
}

/// Reads an `u16` at the absolute position `pos`, without any cursor.
pub(crate) fn read_u16_at(code: &[u8], pos: usize) -> Result<u16> {
	Cursor::new(code, pos).read_u16()
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::class_reader::cursor::{Cursor, read_u16_at};

	#[test]
	fn big_endian() -> Result<()> {
		let code = [0x12, 0x34, 0x56, 0x78, 0xff, 0xff, 0xff, 0xfe, 0x01];
		let mut cursor = Cursor::new(&code, 0);
		assert_eq!(cursor.read_u16()?, 0x1234);
		assert_eq!(cursor.read_u16()?, 0x5678);
		assert_eq!(cursor.read_i32()?, -2);
		assert_eq!(cursor.read_u8()?, 1);
		assert_eq!(cursor.pos(), code.len());
		Ok(())
	}

	#[test]
	fn reading_past_the_end_fails() -> Result<()> {
		let code = [0x00, 0x01, 0x02];
		let mut cursor = Cursor::new(&code, 0);
		assert_eq!(cursor.read_u16()?, 1);
		assert!(cursor.read_u16().is_err());
		// a failed read doesn't move the cursor
		assert_eq!(cursor.pos(), 2);
		assert_eq!(cursor.read_u8()?, 2);
		assert!(cursor.read_u8().is_err());
		Ok(())
	}

	#[test]
	fn goto_and_skip() -> Result<()> {
		let code = [0u8; 4];
		let mut cursor = Cursor::new(&code, 0);
		cursor.skip(4)?;
		assert_eq!(cursor.pos(), 4);
		assert!(cursor.skip(1).is_err());
		assert!(cursor.skip(usize::MAX).is_err());
		assert!(cursor.goto(5).is_err());
		cursor.goto(1)?;
		assert_eq!(cursor.pos(), 1);
		Ok(())
	}

	#[test]
	fn read_vec() -> Result<()> {
		let code = [0x00, 0x02, 0x00, 0x07, 0x00, 0x09];
		let mut cursor = Cursor::new(&code, 0);
		let vec = cursor.read_vec(|r| r.read_u16_as_usize(), |r| r.read_u16())?;
		assert_eq!(vec, vec![7, 9]);
		assert_eq!(read_u16_at(&code, 4)?, 9);
		Ok(())
	}
}
