use super::xml_writer::UblWriter;
use super::{EN16931_CUSTOMIZATION_ID, INVOICE_TYPE_CODE, PEPPOL_PROFILE_ID, UNIT_CODE};
use crate::core::VatError;
use crate::invoice::{Invoice, LineItem, Party, PaymentTerms, Totals};

/// Serialize an assembled invoice as a UBL 2.1 `Invoice` document.
///
/// Totals must already be calculated, which [`InvoiceBuilder`] always does.
///
/// [`InvoiceBuilder`]: crate::invoice::InvoiceBuilder
pub fn to_ubl_xml(invoice: &Invoice) -> Result<String, VatError> {
    let totals = invoice.totals.as_ref().ok_or_else(|| {
        VatError::Builder("totals must be calculated before XML generation".into())
    })?;

    UblWriter::invoice(&invoice.currency_code, |w| {
        write_header(w, invoice)?;
        write_party(w, &invoice.seller, "AccountingSupplierParty")?;
        write_party(w, &invoice.buyer, "AccountingCustomerParty")?;
        if let Some(terms) = &invoice.payment_terms {
            write_payment(w, terms)?;
        }
        write_totals(w, totals)?;
        invoice.lines.iter().try_for_each(|line| write_line(w, line))
    })
}

fn write_header(w: &mut UblWriter<'_>, invoice: &Invoice) -> Result<(), VatError> {
    w.cbc("CustomizationID", EN16931_CUSTOMIZATION_ID)?;
    w.cbc("ProfileID", PEPPOL_PROFILE_ID)?;
    w.cbc("ID", &invoice.number)?;
    w.cbc("IssueDate", &invoice.issue_date.to_string())?;
    if let Some(due) = &invoice.due_date {
        w.cbc("DueDate", &due.to_string())?;
    }
    w.cbc("InvoiceTypeCode", INVOICE_TYPE_CODE)?;
    for note in &invoice.notes {
        w.cbc("Note", note)?;
    }
    let currency = w.currency();
    w.cbc("DocumentCurrencyCode", currency)?;

    if let Some(reference) = &invoice.buyer.contract_reference {
        w.cac("ContractDocumentReference", |w| w.cbc("ID", reference))?;
    }
    Ok(())
}

fn write_party(w: &mut UblWriter<'_>, party: &Party, role: &str) -> Result<(), VatError> {
    w.cac(role, |w| {
        w.cac("Party", |w| {
            if let Some(email) = &party.email {
                // EAS code EM: electronic mail
                w.cbc_attr("EndpointID", email, ("schemeID", "EM"))?;
            }
            w.cac("PartyName", |w| w.cbc("Name", &party.name))?;
            w.cac("PostalAddress", |w| {
                if let Some(address) = &party.address {
                    w.cbc("StreetName", address)?;
                }
                w.cac("Country", |w| w.cbc("IdentificationCode", party.country.code()))
            })?;

            if let Some(vat_id) = party.vat_id.as_deref().filter(|v| !v.trim().is_empty()) {
                w.cac("PartyTaxScheme", |w| {
                    w.cbc("CompanyID", vat_id)?;
                    w.vat_scheme()
                })?;
            }
            w.cac("PartyLegalEntity", |w| w.cbc("RegistrationName", &party.name))?;

            if party.phone.is_some() || party.email.is_some() {
                w.cac("Contact", |w| {
                    if let Some(phone) = &party.phone {
                        w.cbc("Telephone", phone)?;
                    }
                    if let Some(email) = &party.email {
                        w.cbc("ElectronicMail", email)?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    })
}

fn write_payment(w: &mut UblWriter<'_>, terms: &PaymentTerms) -> Result<(), VatError> {
    w.cac("PaymentMeans", |w| {
        // 30 = credit transfer, 1 = instrument not defined
        let code = if terms.iban.is_some() { "30" } else { "1" };
        w.cbc_attr("PaymentMeansCode", code, ("name", terms.means.as_str()))?;
        if let Some(iban) = &terms.iban {
            w.cac("PayeeFinancialAccount", |w| w.cbc("ID", iban))?;
        }
        Ok(())
    })?;
    w.cac("PaymentTerms", |w| w.cbc("Note", &terms.summary()))
}

fn write_totals(w: &mut UblWriter<'_>, totals: &Totals) -> Result<(), VatError> {
    w.cac("TaxTotal", |w| {
        w.amount("TaxAmount", totals.vat_total)?;
        for subtotal in &totals.tax_subtotals {
            w.cac("TaxSubtotal", |w| {
                w.amount("TaxableAmount", subtotal.taxable_amount)?;
                w.amount("TaxAmount", subtotal.tax_amount)?;
                let exemption = subtotal
                    .exemption_reason_code
                    .as_deref()
                    .zip(subtotal.exemption_reason.as_deref());
                w.tax_category("TaxCategory", subtotal.category.code(), subtotal.rate, exemption)
            })?;
        }
        Ok(())
    })?;

    w.cac("LegalMonetaryTotal", |w| {
        w.amount("LineExtensionAmount", totals.net_total)?;
        w.amount("TaxExclusiveAmount", totals.net_total)?;
        w.amount("TaxInclusiveAmount", totals.gross_total)?;
        w.amount("PayableAmount", totals.gross_total)
    })
}

fn write_line(w: &mut UblWriter<'_>, line: &LineItem) -> Result<(), VatError> {
    let amount = line
        .line_amount
        .unwrap_or(line.quantity.saturating_mul(line.unit_price));

    w.cac("InvoiceLine", |w| {
        w.cbc("ID", &line.id)?;
        w.quantity(line.quantity, UNIT_CODE)?;
        w.amount("LineExtensionAmount", amount)?;
        w.cac("Item", |w| {
            w.cbc("Description", line.category.label())?;
            w.cbc("Name", &line.description)?;
            w.tax_category(
                "ClassifiedTaxCategory",
                line.tax_category().code(),
                line.tax_rate,
                None,
            )
        })?;
        w.cac("Price", |w| w.amount("PriceAmount", line.unit_price))
    })
}
