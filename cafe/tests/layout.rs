use anyhow::Result;
use pretty_assertions::assert_eq;
use cafe::{skip_attribute, ClassReader, ReadFlags};
use cafe::tree::class::ClassNode;
use cafe::tree::constant::{BootstrapMethod, Handle, HandleKind};
use crate::common::{ClassFile, js};

mod common;

fn with_fields_and_methods() -> ClassFile {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	class.add_interface("java/io/Serializable");
	class.add_interface("java/lang/Cloneable");

	for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
		let unknown = class.attribute("Unknown", &vec![i as u8; i * 5]);
		let deprecated = class.attribute("Deprecated", &[]);
		class.add_field(0x0002, name, "I", vec![unknown, deprecated]);
	}
	for name in ["x", "y"] {
		let code = class.attribute("Code", &[0, 0, 0, 0, 0, 0, 0, 1, 0xb1, 0, 0, 0, 0]);
		class.add_method(0x0001, name, "()V", vec![code]);
	}
	class
}

#[test]
fn layout_matches_the_bytes() -> Result<()> {
	let class = with_fields_and_methods();
	let reader = ClassReader::new(class.to_bytes())?;

	let layout = reader.layout();
	assert_eq!(layout.header(), class.header_offset());
	assert_eq!(layout.interfaces_count(), 2);
	assert_eq!(layout.fields_start(), class.fields_offset());
	assert_eq!(layout.methods_start(), class.methods_offset());
	assert_eq!(layout.attributes_start(), class.attributes_offset());
	Ok(())
}

#[test]
fn method_table_after_field_table() -> Result<()> {
	let class = with_fields_and_methods();
	let code = class.to_bytes();
	let reader = ClassReader::new(code.clone())?;

	// the methods_count at the offset the blind skip computed
	let methods_start = reader.layout().methods_start();
	let methods_count = u16::from_be_bytes([code[methods_start], code[methods_start + 1]]);
	assert_eq!(methods_count, 2);

	// decoding the fields and then the methods finds the same methods
	let mut node = ClassNode::default();
	reader.accept(&mut node, ReadFlags::empty())?;
	assert_eq!(node.fields.len(), 3);
	assert_eq!(node.methods.len(), methods_count as usize);
	assert_eq!(node.methods.iter().map(|m| m.name.clone()).collect::<Vec<_>>(), vec![js("x"), js("y")]);
	Ok(())
}

#[test]
fn bootstrap_methods() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	let reference = class.method_ref(
		"java/lang/invoke/LambdaMetafactory",
		"metafactory",
		"(Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;)Ljava/lang/invoke/CallSite;",
	);
	let handle = class.method_handle(6, reference);
	let argument = class.string("arg");

	let source = class.utf8("A.java");
	let attribute = class.attribute("SourceFile", &source.to_be_bytes());
	class.add_attribute(attribute);

	let mut payload = vec![0, 2];
	payload.extend_from_slice(&handle.to_be_bytes());
	payload.extend_from_slice(&[0, 0]);
	payload.extend_from_slice(&handle.to_be_bytes());
	payload.extend_from_slice(&[0, 2]);
	payload.extend_from_slice(&argument.to_be_bytes());
	payload.extend_from_slice(&argument.to_be_bytes());
	let attribute = class.attribute("BootstrapMethods", &payload);
	class.add_attribute(attribute);

	let code = class.to_bytes();
	let reader = ClassReader::new(code.clone())?;
	let bootstrap_methods = reader.bootstrap_methods()?
		.expect("the class has a BootstrapMethods attribute");

	// attributes_count, then the SourceFile attribute, then the BootstrapMethods header and num_bootstrap_methods
	let first = class.attributes_offset() + 2 + 8 + 6 + 2;
	let second = first + 2 + 2;
	assert_eq!(bootstrap_methods.offsets(), &[first, second]);
	assert_eq!(bootstrap_methods.len(), 2);
	for offset in bootstrap_methods.offsets() {
		assert_eq!(u16::from_be_bytes([code[*offset], code[offset + 1]]), handle);
	}

	let expected_handle = Handle {
		kind: HandleKind::InvokeStatic,
		owner: js("java/lang/invoke/LambdaMetafactory"),
		name: js("metafactory"),
		descriptor: js("(Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/invoke/MethodType;)Ljava/lang/invoke/CallSite;"),
		is_interface: false,
	};
	assert_eq!(bootstrap_methods.get(&reader, 0)?, BootstrapMethod {
		handle: expected_handle.clone(),
		arguments: Vec::new(),
	});
	assert_eq!(bootstrap_methods.get(&reader, 1)?, BootstrapMethod {
		handle: expected_handle,
		arguments: vec![argument, argument],
	});
	assert!(bootstrap_methods.get(&reader, 2).is_err());
	Ok(())
}

#[test]
fn no_bootstrap_methods() -> Result<()> {
	let class = ClassFile::new("A", Some("java/lang/Object"));
	assert_eq!(ClassReader::new(class.to_bytes())?.bootstrap_methods()?, None);
	Ok(())
}

#[test]
fn bootstrap_methods_ignore_other_attributes() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	// Signature and SourceFile must point to Utf8 entries, not to a Class entry
	let this_class = class.this_class;
	let attribute = class.attribute("Signature", &this_class.to_be_bytes());
	class.add_attribute(attribute);
	let attribute = class.attribute("SourceFile", &this_class.to_be_bytes());
	class.add_attribute(attribute);
	let attribute = class.attribute("BootstrapMethods", &[0, 0]);
	class.add_attribute(attribute);

	let reader = ClassReader::new(class.to_bytes())?;
	assert!(reader.accept(&mut (), ReadFlags::empty()).is_err());

	let bootstrap_methods = reader.bootstrap_methods()?
		.expect("the class has a BootstrapMethods attribute");
	assert!(bootstrap_methods.is_empty());
	Ok(())
}

#[test]
fn skip_attribute_arithmetic() {
	assert_eq!(skip_attribute(0, 0), Some(6));
	assert_eq!(skip_attribute(100, 4), Some(110));
	assert_eq!(skip_attribute(0, u32::MAX), Some(6 + u32::MAX as usize));
	assert_eq!(skip_attribute(usize::MAX, 0), None);
	assert_eq!(skip_attribute(usize::MAX - 100, u32::MAX), None);
}

#[test]
fn truncated_class_files() -> Result<()> {
	let code = with_fields_and_methods().to_bytes();
	ClassReader::new(code.clone())?;

	for len in 0..code.len() {
		assert!(ClassReader::new(code[..len].to_vec()).is_err(), "prefix of length {len} should fail");
	}
	Ok(())
}

#[test]
fn attribute_longer_than_the_class_file() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	let attribute = class.attribute_with_length("Unknown", 1000, &[1, 2, 3]);
	class.add_field(0x0001, "f", "I", vec![attribute]);

	assert!(ClassReader::new(class.to_bytes()).is_err());
	Ok(())
}

#[test]
fn class_attribute_longer_than_the_class_file() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	let attribute = class.attribute_with_length("Unknown", u32::MAX, &[1, 2, 3]);
	class.add_attribute(attribute);

	assert!(ClassReader::new(class.to_bytes()).is_err());
	Ok(())
}

#[test]
fn wrong_pool_entry_fails_the_traversal() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	// SourceFile must point to an Utf8 entry, not to a Class entry
	let this_class = class.this_class;
	let attribute = class.attribute("SourceFile", &this_class.to_be_bytes());
	class.add_attribute(attribute);

	let reader = ClassReader::new(class.to_bytes())?;
	assert!(reader.accept(&mut (), ReadFlags::empty()).is_err());
	// the source file is decoded even if it's not visited
	assert!(reader.accept(&mut (), ReadFlags::SKIP_DEBUG).is_err());
	Ok(())
}

#[test]
fn newer_versions_are_read() -> Result<()> {
	let mut class = ClassFile::new("A", Some("java/lang/Object"));
	class.major_version = 200;

	let reader = ClassReader::new(class.to_bytes())?;
	assert_eq!(reader.version()?.major, 200);
	reader.accept(&mut (), ReadFlags::empty())?;
	Ok(())
}
