use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use super::ns;
use crate::core::VatError;

fn xml_io(e: std::io::Error) -> VatError {
    VatError::Xml(format!("write failed: {e}"))
}

/// In-memory writer for one UBL `Invoice` document.
///
/// Element names are given without their namespace prefix: [`cac`] writes
/// aggregate components, [`cbc`] writes basic components. Monetary amounts
/// always carry the document currency.
///
/// [`cac`]: UblWriter::cac
/// [`cbc`]: UblWriter::cbc
pub(crate) struct UblWriter<'c> {
    writer: Writer<Cursor<Vec<u8>>>,
    currency: &'c str,
}

impl<'c> UblWriter<'c> {
    /// Write a complete `ubl:Invoice` whose children come from `body`.
    pub fn invoice<F>(currency: &'c str, body: F) -> Result<String, VatError>
    where
        F: FnOnce(&mut Self) -> Result<(), VatError>,
    {
        let mut w = Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
            currency,
        };
        w.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("ubl:Invoice");
        root.push_attribute(("xmlns:ubl", ns::INVOICE));
        root.push_attribute(("xmlns:cac", ns::CAC));
        root.push_attribute(("xmlns:cbc", ns::CBC));
        w.emit(Event::Start(root))?;
        body(&mut w)?;
        w.emit(Event::End(BytesEnd::new("ubl:Invoice")))?;

        let buf = w.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| VatError::Xml(format!("output is not UTF-8: {e}")))
    }

    pub fn currency(&self) -> &'c str {
        self.currency
    }

    /// `cac:{name}` aggregate.
    pub fn cac<F>(&mut self, name: &str, body: F) -> Result<(), VatError>
    where
        F: FnOnce(&mut Self) -> Result<(), VatError>,
    {
        let tag = format!("cac:{name}");
        self.emit(Event::Start(BytesStart::new(tag.as_str())))?;
        body(self)?;
        self.emit(Event::End(BytesEnd::new(tag.as_str())))
    }

    /// `cbc:{name}` leaf with escaped text.
    pub fn cbc(&mut self, name: &str, value: &str) -> Result<(), VatError> {
        self.leaf(name, value, None)
    }

    /// `cbc:{name}` leaf carrying one attribute, e.g. `schemeID`.
    pub fn cbc_attr(
        &mut self,
        name: &str,
        value: &str,
        attr: (&str, &str),
    ) -> Result<(), VatError> {
        self.leaf(name, value, Some(attr))
    }

    /// Monetary amount in the document currency.
    pub fn amount(&mut self, name: &str, amount: Decimal) -> Result<(), VatError> {
        let currency = self.currency;
        self.leaf(name, &format_decimal(amount), Some(("currencyID", currency)))
    }

    pub fn quantity(&mut self, qty: Decimal, unit_code: &str) -> Result<(), VatError> {
        self.leaf("InvoicedQuantity", &format_decimal(qty), Some(("unitCode", unit_code)))
    }

    /// `cac:TaxScheme` with the fixed scheme ID `VAT`.
    pub fn vat_scheme(&mut self) -> Result<(), VatError> {
        self.cac("TaxScheme", |w| w.cbc("ID", "VAT"))
    }

    /// Tax category block (`TaxCategory` or `ClassifiedTaxCategory`).
    ///
    /// Exemption code and reason are only present for `E` and `AE`.
    pub fn tax_category(
        &mut self,
        wrapper: &str,
        code: &str,
        rate: Decimal,
        exemption: Option<(&str, &str)>,
    ) -> Result<(), VatError> {
        self.cac(wrapper, |w| {
            w.cbc("ID", code)?;
            w.cbc("Percent", &format_decimal(rate))?;
            if let Some((reason_code, reason)) = exemption {
                w.cbc("TaxExemptionReasonCode", reason_code)?;
                w.cbc("TaxExemptionReason", reason)?;
            }
            w.vat_scheme()
        })
    }

    fn leaf(&mut self, name: &str, value: &str, attr: Option<(&str, &str)>) -> Result<(), VatError> {
        let tag = format!("cbc:{name}");
        let mut start = BytesStart::new(tag.as_str());
        if let Some(attr) = attr {
            start.push_attribute(attr);
        }
        self.emit(Event::Start(start))?;
        self.emit(Event::Text(BytesText::new(value)))?;
        self.emit(Event::End(BytesEnd::new(tag.as_str())))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), VatError> {
        self.writer.write_event(event).map_err(xml_io)
    }
}

/// At least two decimal places, trailing zeros beyond that stripped.
pub fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    match s.find('.') {
        Some(dot) => {
            let decimals = s.len() - dot - 1;
            if decimals < 2 {
                format!("{s}{}", "0".repeat(2 - decimals))
            } else {
                s
            }
        }
        None => format!("{s}.00"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_decimal_pads_to_two_places() {
        assert_eq!(format_decimal(dec!(20)), "20.00");
        assert_eq!(format_decimal(dec!(5.5)), "5.50");
        assert_eq!(format_decimal(dec!(1297.000)), "1297.00");
        assert_eq!(format_decimal(dec!(0.125)), "0.125");
        assert_eq!(format_decimal(Decimal::ZERO), "0.00");
    }

    #[test]
    fn leaves_are_escaped_and_prefixed() {
        let xml = UblWriter::invoice("EUR", |w| w.cbc("Note", "Fish & Chips <Ltd>")).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<cbc:Note>Fish &amp; Chips &lt;Ltd&gt;</cbc:Note>"));
        assert!(xml.trim_end().ends_with("</ubl:Invoice>"));
    }

    #[test]
    fn amounts_carry_document_currency() {
        let xml = UblWriter::invoice("GBP", |w| w.amount("PayableAmount", dec!(12.5))).unwrap();
        assert!(xml.contains(r#"<cbc:PayableAmount currencyID="GBP">12.50</cbc:PayableAmount>"#));
    }

    #[test]
    fn exempt_tax_category_has_reason() {
        let xml = UblWriter::invoice("EUR", |w| {
            w.tax_category("TaxCategory", "E", Decimal::ZERO, Some(("VATEX-EU-132", "Exempt")))
        })
        .unwrap();
        assert!(xml.contains("<cbc:ID>E</cbc:ID>"));
        assert!(xml.contains("<cbc:Percent>0.00</cbc:Percent>"));
        assert!(xml.contains("<cbc:TaxExemptionReasonCode>VATEX-EU-132</cbc:TaxExemptionReasonCode>"));
        assert!(xml.contains("<cbc:ID>VAT</cbc:ID>"));
    }
}
