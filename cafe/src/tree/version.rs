use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Represents a class file version.
///
/// Use the associated constants (like [`Version::V1_8`]) if you want that version.
///
/// Take a look at [the list of class file versions](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.1-200-B.2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
	pub major: u16,
	pub minor: u16,
}

impl Version {
	pub const V1_1: Version = Version::new(45, 3);
	pub const V1_5: Version = Version::new(49, 0);
	pub const V1_8: Version = Version::new(52, 0);
	pub const V11: Version = Version::new(55, 0);
	pub const V17: Version = Version::new(61, 0);
	pub const V21: Version = Version::new(65, 0);
	/// The newest version this crate knows about. Newer class files are still read.
	pub const V23: Version = Version::new(67, 0);

	pub const fn new(major: u16, minor: u16) -> Version {
		Version { major, minor }
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> Ordering {
		self.major.cmp(&other.major)
			.then_with(|| self.minor.cmp(&other.minor))
	}
}

impl Display for Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}
