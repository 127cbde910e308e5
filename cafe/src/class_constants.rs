pub(crate) const MAGIC: u32 = 0xCAFEBABE;

/// Names of the attributes the reader knows about, as they appear in the constant pool.
pub(crate) mod attribute {
	pub(crate) const CODE: &[u8] = b"Code";
	pub(crate) const CONSTANT_VALUE: &[u8] = b"ConstantValue";
	pub(crate) const EXCEPTIONS: &[u8] = b"Exceptions";
	pub(crate) const INNER_CLASSES: &[u8] = b"InnerClasses";
	pub(crate) const ENCLOSING_METHOD: &[u8] = b"EnclosingMethod";
	pub(crate) const SYNTHETIC: &[u8] = b"Synthetic";
	pub(crate) const SIGNATURE: &[u8] = b"Signature";
	pub(crate) const SOURCE_FILE: &[u8] = b"SourceFile";
	pub(crate) const LINE_NUMBER_TABLE: &[u8] = b"LineNumberTable";
	pub(crate) const LOCAL_VARIABLE_TABLE: &[u8] = b"LocalVariableTable";
	pub(crate) const DEPRECATED: &[u8] = b"Deprecated";
	pub(crate) const RUNTIME_VISIBLE_ANNOTATIONS: &[u8] = b"RuntimeVisibleAnnotations";
	pub(crate) const BOOTSTRAP_METHODS: &[u8] = b"BootstrapMethods";
}

pub(crate) mod pool {
	pub(crate) const UTF8: u8 = 1;
	pub(crate) const INTEGER: u8 = 3;
	pub(crate) const FLOAT: u8 = 4;
	pub(crate) const LONG: u8 = 5;
	pub(crate) const DOUBLE: u8 = 6;
	pub(crate) const CLASS: u8 = 7;
	pub(crate) const STRING: u8 = 8;
	pub(crate) const FIELD_REF: u8 = 9;
	pub(crate) const METHOD_REF: u8 = 10;
	pub(crate) const INTERFACE_METHOD_REF: u8 = 11;
	pub(crate) const NAME_AND_TYPE: u8 = 12;
	pub(crate) const METHOD_HANDLE: u8 = 15;
	pub(crate) const METHOD_TYPE: u8 = 16;
	pub(crate) const DYNAMIC: u8 = 17;
	pub(crate) const INVOKE_DYNAMIC: u8 = 18;
	pub(crate) const MODULE: u8 = 19;
	pub(crate) const PACKAGE: u8 = 20;
}
