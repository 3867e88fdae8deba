use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::*;
use crate::core::{ValidationError, VatClass, VatError};

/// Compute line amounts, the VAT breakdown and document totals.
///
/// Lines are grouped by (tax category, rate); VAT is rounded half-up to two
/// decimals once per bucket, not per line. Amounts too large for `Decimal`
/// are rejected with [`VatError::Builder`].
pub fn calculate_totals(invoice: &mut Invoice) -> Result<(), VatError> {
    for line in &mut invoice.lines {
        line.line_amount = Some(line_net(line)?);
    }

    let mut net_total = Decimal::ZERO;
    let mut buckets: BTreeMap<(TaxCategoryCode, Decimal), Decimal> = BTreeMap::new();
    for line in &invoice.lines {
        let amount = line.line_amount.unwrap_or(Decimal::ZERO);
        net_total = net_total
            .checked_add(amount)
            .ok_or_else(|| overflow("net total"))?;
        let bucket = buckets
            .entry((line.tax_category(), line.tax_rate.normalize()))
            .or_insert(Decimal::ZERO);
        *bucket = bucket
            .checked_add(amount)
            .ok_or_else(|| overflow("taxable amount"))?;
    }

    let mut vat_total = Decimal::ZERO;
    let mut tax_subtotals = Vec::with_capacity(buckets.len());
    for ((category, rate), taxable_amount) in buckets {
        let tax_amount = taxable_amount
            .checked_mul(rate / Decimal::ONE_HUNDRED)
            .map(|v| round_half_up(v, 2))
            .ok_or_else(|| overflow("tax amount"))?;
        vat_total = vat_total
            .checked_add(tax_amount)
            .ok_or_else(|| overflow("VAT total"))?;
        tax_subtotals.push(TaxSubtotal {
            category,
            rate,
            taxable_amount,
            tax_amount,
            exemption_reason: category.exemption_reason().map(String::from),
            exemption_reason_code: category.exemption_reason_code().map(String::from),
        });
    }

    let gross_total = net_total
        .checked_add(vat_total)
        .ok_or_else(|| overflow("gross total"))?;
    invoice.totals = Some(Totals {
        net_total,
        vat_total,
        gross_total,
        tax_subtotals,
    });
    Ok(())
}

/// `quantity × unit_price` for one line.
pub(crate) fn line_net(line: &LineItem) -> Result<Decimal, VatError> {
    line.quantity
        .checked_mul(line.unit_price)
        .ok_or_else(|| VatError::Builder(format!("line {}: amount out of range", line.id)))
}

fn overflow(what: &str) -> VatError {
    VatError::Builder(format!("{what} out of range"))
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Validate an assembled invoice. Returns all errors, not just the first.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice number must not be empty",
            "BR-02",
        ));
    }

    if invoice.currency_code.len() != 3
        || !invoice.currency_code.chars().all(|c| c.is_ascii_uppercase())
    {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!("'{}' is not an ISO 4217 code", invoice.currency_code),
            "BR-05",
        ));
    }

    if let Some(due) = invoice.due_date {
        if due < invoice.issue_date {
            errors.push(ValidationError::new(
                "due_date",
                "due date must not be before the issue date",
            ));
        }
    }

    if invoice.seller.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "seller.name",
            "seller name must not be empty",
            "BR-06",
        ));
    }
    if invoice.buyer.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "buyer.name",
            "buyer name must not be empty",
            "BR-07",
        ));
    }

    if invoice.lines.is_empty() {
        errors.push(ValidationError::with_rule(
            "lines",
            "at least one invoice line is required",
            "BR-16",
        ));
    }

    for (i, line) in invoice.lines.iter().enumerate() {
        if line.quantity < Decimal::ZERO || line.unit_price < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("lines[{i}]"),
                "quantity and unit price must not be negative",
            ));
        }
    }

    let seller_vat_missing = blank(&invoice.seller.vat_id);
    let needs_seller_vat = invoice
        .lines
        .iter()
        .any(|l| !matches!(l.vat_class, VatClass::Exempt));
    if needs_seller_vat && seller_vat_missing {
        errors.push(ValidationError::with_rule(
            "seller.vat_id",
            "seller VAT identifier is required for taxable supplies",
            "BR-S-02",
        ));
    }

    if invoice.has_reverse_charge_lines() {
        if blank(&invoice.buyer.vat_id) {
            errors.push(ValidationError::with_rule(
                "buyer.vat_id",
                "buyer VAT identifier is required for reverse charge",
                "BR-AE-02",
            ));
        }
        if !invoice.has_reverse_charge_note() {
            errors.push(ValidationError::new(
                "notes",
                "reverse charge invoices must carry a reverse charge note",
            ));
        }
    }

    if let Some(totals) = &invoice.totals {
        validate_totals(totals, &mut errors);
    }

    errors
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn validate_totals(totals: &Totals, errors: &mut Vec<ValidationError>) {
    let taxable = checked_sum(totals.tax_subtotals.iter().map(|s| s.taxable_amount));
    if taxable != Some(totals.net_total) {
        errors.push(ValidationError::with_rule(
            "totals.tax_subtotals",
            format!(
                "sum of taxable amounts {} does not match net total {}",
                display_sum(taxable),
                totals.net_total
            ),
            "BR-CO-13",
        ));
    }

    let tax = checked_sum(totals.tax_subtotals.iter().map(|s| s.tax_amount));
    if tax != Some(totals.vat_total) {
        errors.push(ValidationError::with_rule(
            "totals.vat_total",
            format!(
                "sum of bucket tax {} does not match VAT total {}",
                display_sum(tax),
                totals.vat_total
            ),
            "BR-CO-14",
        ));
    }

    if totals.net_total.checked_add(totals.vat_total) != Some(totals.gross_total) {
        errors.push(ValidationError::with_rule(
            "totals.gross_total",
            "gross total must equal net total plus VAT total",
            "BR-CO-15",
        ));
    }
}

fn checked_sum(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

fn display_sum(sum: Option<Decimal>) -> String {
    sum.map_or_else(|| "(out of range)".to_string(), |v| v.to_string())
}
