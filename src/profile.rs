//! Attribute extraction from signed assertions and profile assembly.
//!
//! Two attribute sets exist per callback, one per extension response type;
//! [`UserProfile::assemble`] merges them with Attribute Exchange taking
//! precedence over Simple Registration. Empty values are never stored.

// self
use crate::{
	_prelude::*,
	extension::{AxAttribute, SregField, AX_NS_URI, SREG_NS_URI},
	openid::SignedMessage,
};

/// Canonical user-info field names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
	/// Contact email address.
	Email,
	/// Full display name.
	Name,
	/// First (given) name.
	FirstName,
	/// Last (family) name.
	LastName,
	/// Friendly nickname.
	Nickname,
	/// Provider-scoped stable user identifier.
	Uid,
	/// Postcode-derived location.
	Location,
	/// 20px avatar variant.
	Image20,
	/// 50px avatar variant.
	Image50,
}
impl ProfileField {
	/// Returns the canonical field name.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProfileField::Email => "email",
			ProfileField::Name => "name",
			ProfileField::FirstName => "first_name",
			ProfileField::LastName => "last_name",
			ProfileField::Nickname => "nickname",
			ProfileField::Uid => "uid",
			ProfileField::Location => "location",
			ProfileField::Image20 => "image20",
			ProfileField::Image50 => "image50",
		}
	}
}
impl Display for ProfileField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Mapping from canonical field name to non-empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet(BTreeMap<ProfileField, String>);
impl AttributeSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores a value, dropping null or empty entries instead of keeping them.
	pub fn insert(&mut self, field: ProfileField, value: Option<impl Into<String>>) {
		if let Some(value) = value {
			let value = value.into();

			if !value.is_empty() {
				self.0.insert(field, value);
			}
		}
	}

	/// Returns the stored value for a field.
	pub fn get(&self, field: ProfileField) -> Option<&str> {
		self.0.get(&field).map(String::as_str)
	}

	/// Returns true when no field carries a value.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the number of populated fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates over populated fields in canonical order.
	pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
		self.0.iter().map(|(field, value)| (*field, value.as_str()))
	}
}
impl FromIterator<(ProfileField, String)> for AttributeSet {
	fn from_iter<I: IntoIterator<Item = (ProfileField, String)>>(iter: I) -> Self {
		let mut set = Self::new();

		for (field, value) in iter {
			set.insert(field, Some(value));
		}

		set
	}
}

/// Extracts Simple Registration values from a signed assertion.
pub fn sreg_attributes(message: &SignedMessage) -> AttributeSet {
	let mut set = AttributeSet::new();
	let field = |sreg: SregField| message.get_single(SREG_NS_URI, sreg.as_str());

	set.insert(ProfileField::Email, field(SregField::Email));
	set.insert(ProfileField::Name, field(SregField::Fullname));
	set.insert(ProfileField::Location, field(SregField::Postcode));
	set.insert(ProfileField::Nickname, field(SregField::Nickname));

	set
}

/// Extracts Attribute Exchange values from a signed assertion.
///
/// The display name resolves to the AX name attribute when present, otherwise
/// to the first and last names joined with a space; either way surrounding
/// whitespace is trimmed before the empty-value filter applies.
pub fn ax_attributes(message: &SignedMessage) -> AttributeSet {
	let mut set = AttributeSet::new();
	let attribute = |ax: AxAttribute| message.ax_value(AX_NS_URI, ax.uri());
	let name = attribute(AxAttribute::Name)
		.map(str::to_owned)
		.unwrap_or_else(|| {
			format!(
				"{} {}",
				attribute(AxAttribute::FirstName).unwrap_or(""),
				attribute(AxAttribute::LastName).unwrap_or(""),
			)
		});

	set.insert(ProfileField::Email, attribute(AxAttribute::Email));
	set.insert(ProfileField::FirstName, attribute(AxAttribute::FirstName));
	set.insert(ProfileField::LastName, attribute(AxAttribute::LastName));
	set.insert(ProfileField::Name, Some(name.trim()));
	set.insert(ProfileField::Nickname, attribute(AxAttribute::Nickname));
	set.insert(ProfileField::Uid, attribute(AxAttribute::Uid));
	set.insert(ProfileField::Image20, attribute(AxAttribute::Image20));
	set.insert(ProfileField::Image50, attribute(AxAttribute::Image50));

	set
}

/// Merged user-info record for one authentication transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
	attributes: AttributeSet,
}
impl UserProfile {
	/// Merges the two attribute sets into one canonical record.
	///
	/// Attribute Exchange data is considered more authoritative than Simple
	/// Registration data, so every key present in `ax` overwrites `sreg`.
	pub fn assemble(sreg: AttributeSet, ax: AttributeSet) -> Self {
		let mut attributes = sreg;

		for (field, value) in ax.iter() {
			attributes.insert(field, Some(value));
		}

		Self { attributes }
	}

	/// Returns the caller-visible unique identifier, when asserted.
	///
	/// Its absence is a caller-level concern, not validated here.
	pub fn uid(&self) -> Option<&str> {
		self.attributes.get(ProfileField::Uid)
	}

	/// Returns the value stored for a field.
	pub fn get(&self, field: ProfileField) -> Option<&str> {
		self.attributes.get(field)
	}

	/// Returns the merged attribute set.
	pub fn attributes(&self) -> &AttributeSet {
		&self.attributes
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn message_with_ax(pairs: &[(AxAttribute, &str)]) -> SignedMessage {
		let args = pairs.iter().enumerate().flat_map(|(index, (attribute, value))| {
			[
				(format!("type.ext{index}"), attribute.uri().to_owned()),
				(format!("value.ext{index}"), (*value).to_owned()),
			]
		});

		SignedMessage::new().with_args(AX_NS_URI, args)
	}

	#[test]
	fn empty_values_are_omitted() {
		let message = SignedMessage::new().with_args(
			SREG_NS_URI,
			[
				("email".to_owned(), "user@example.com".to_owned()),
				("fullname".to_owned(), String::new()),
			],
		);
		let set = sreg_attributes(&message);

		assert_eq!(set.get(ProfileField::Email), Some("user@example.com"));
		assert_eq!(set.get(ProfileField::Name), None);
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn ax_name_attribute_wins_over_the_concatenation() {
		let message = message_with_ax(&[
			(AxAttribute::Name, "Ada Lovelace"),
			(AxAttribute::FirstName, "Augusta"),
			(AxAttribute::LastName, "King"),
		]);

		assert_eq!(ax_attributes(&message).get(ProfileField::Name), Some("Ada Lovelace"));
	}

	#[test]
	fn missing_ax_name_falls_back_to_first_and_last() {
		let message =
			message_with_ax(&[(AxAttribute::FirstName, "Ada"), (AxAttribute::LastName, "Lovelace")]);

		assert_eq!(ax_attributes(&message).get(ProfileField::Name), Some("Ada Lovelace"));

		let message = message_with_ax(&[(AxAttribute::FirstName, "Ada")]);

		assert_eq!(ax_attributes(&message).get(ProfileField::Name), Some("Ada"));

		let message = message_with_ax(&[(AxAttribute::Uid, "u-1")]);

		assert_eq!(ax_attributes(&message).get(ProfileField::Name), None);
	}

	#[test]
	fn assemble_prefers_attribute_exchange_values() {
		let sreg = AttributeSet::from_iter([
			(ProfileField::Name, "A".to_owned()),
			(ProfileField::Email, "a@x".to_owned()),
		]);
		let ax = AttributeSet::from_iter([(ProfileField::Name, "B".to_owned())]);
		let profile = UserProfile::assemble(sreg, ax);

		assert_eq!(profile.get(ProfileField::Name), Some("B"));
		assert_eq!(profile.get(ProfileField::Email), Some("a@x"));
	}
}
