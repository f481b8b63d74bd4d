// self
use crate::{
	_prelude::*,
	extension::{AxAttribute, AxRequest, SregField, SregRequest},
};

/// Attribute field lists requested from the provider on every initiation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
	/// Attribute Exchange attributes the provider must return.
	pub ax_required: Vec<AxAttribute>,
	/// Attribute Exchange attributes the provider may return.
	pub ax_optional: Vec<AxAttribute>,
	/// Simple Registration fields the provider must return.
	pub sreg_required: Vec<SregField>,
	/// Simple Registration fields the provider may return.
	pub sreg_optional: Vec<SregField>,
}
impl Default for AttributeSchema {
	fn default() -> Self {
		Self {
			ax_required: vec![
				AxAttribute::Email,
				AxAttribute::Name,
				AxAttribute::FirstName,
				AxAttribute::LastName,
				AxAttribute::Uid,
				AxAttribute::Image20,
				AxAttribute::Image50,
			],
			ax_optional: vec![AxAttribute::Nickname],
			sreg_required: vec![SregField::Email, SregField::Fullname],
			sreg_optional: vec![SregField::Nickname],
		}
	}
}
impl AttributeSchema {
	/// Builds the Simple Registration request for the schema.
	pub fn sreg_request(&self) -> SregRequest {
		SregRequest::new(self.sreg_required.iter().copied(), self.sreg_optional.iter().copied())
	}

	/// Builds the Attribute Exchange fetch request for the schema.
	pub fn ax_request(&self) -> AxRequest {
		AxRequest::new(self.ax_required.iter().copied(), self.ax_optional.iter().copied())
	}
}
