//! Wire-format value objects for the registration payload.
//!
//! These are plain records mirroring the endpoint's JSON contract; field names serialize
//! verbatim (already snake_case) and absent optional fields serialize as `null`, matching
//! what the registration endpoint expects. They carry no behavior of their own.

// self
use crate::_prelude::*;

/// Introduce-goods document submitted to the registration endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
	/// Nested description block naming the participant.
	pub description: Option<Description>,
	/// Document identifier assigned by the issuing side.
	pub doc_id: Option<String>,
	/// Workflow status of the document.
	pub doc_status: Option<String>,
	/// Document type code, e.g. `LP_INTRODUCE_GOODS`.
	pub doc_type: Option<String>,
	/// Marks the document as describing imported goods.
	pub import_request: bool,
	/// Taxpayer identifier (INN) of the goods owner.
	pub owner_inn: Option<String>,
	/// Taxpayer identifier (INN) of the registration participant.
	pub participant_inn: Option<String>,
	/// Taxpayer identifier (INN) of the producer.
	pub producer_inn: Option<String>,
	/// Production date, `YYYY-MM-DD`.
	pub production_date: Option<String>,
	/// Production type code.
	pub production_type: Option<String>,
	/// Products covered by this document.
	pub products: Vec<Product>,
	/// Registration date, `YYYY-MM-DD`.
	pub reg_date: Option<String>,
	/// Registration number assigned by the endpoint.
	pub reg_number: Option<String>,
}

/// Description block nested inside a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
	/// Taxpayer identifier (INN) of the participant.
	pub participant_inn: Option<String>,
}

/// One product position inside a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Certificate document type code.
	pub certificate_document: Option<String>,
	/// Certificate issue date, `YYYY-MM-DD`.
	pub certificate_document_date: Option<String>,
	/// Certificate number.
	pub certificate_document_number: Option<String>,
	/// Taxpayer identifier (INN) of the goods owner.
	pub owner_inn: Option<String>,
	/// Taxpayer identifier (INN) of the producer.
	pub producer_inn: Option<String>,
	/// Production date, `YYYY-MM-DD`.
	pub production_date: Option<String>,
	/// Commodity classification (TN VED) code.
	pub tnved_code: Option<String>,
	/// Unit identification code.
	pub uit_code: Option<String>,
	/// Aggregated unit identification code.
	pub uitu_code: Option<String>,
}
