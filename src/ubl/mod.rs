//! UBL 2.1 export of assembled invoices.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eurovat::core::*;
//! use eurovat::invoice::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-7", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!     .seller(PartyBuilder::new("Lyon SARL", CountryCode::FR).vat_id("FR12345678901").build())
//!     .buyer(PartyBuilder::new("Berlin GmbH", CountryCode::DE).vat_id("DE123456789").build())
//!     .buyer_type(BuyerType::B2b)
//!     .reverse_charge_note()
//!     .add_line(LineItemBuilder::new("1", "Design work", VatCategory::Others, dec!(500)).build())
//!     .build()
//!     .unwrap();
//!
//! let xml = eurovat::ubl::to_ubl_xml(&invoice).unwrap();
//! assert!(xml.contains("<cbc:ID>AE</cbc:ID>"));
//! ```

mod invoice;
mod xml_writer;

pub use invoice::to_ubl_xml;
pub use xml_writer::format_decimal;

/// EN 16931 core specification identifier (BT-24).
pub const EN16931_CUSTOMIZATION_ID: &str = "urn:cen.eu:en16931:2017";

/// Peppol BIS Billing 3.0 profile identifier (BT-23).
pub const PEPPOL_PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// UNTDID 1001 commercial invoice.
pub const INVOICE_TYPE_CODE: &str = "380";

/// UN/ECE Rec 20 "one" (unit).
pub const UNIT_CODE: &str = "C62";

/// UBL 2.1 namespace URIs.
pub mod ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}
