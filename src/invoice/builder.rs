use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::plan::PlanLimits;
use super::types::*;
use super::validation;
use crate::core::{
    BuyerType, CountryCode, RuleTable, TransactionFacts, VatCategory, VatClass, VatError, VatType,
};
use crate::engine::VatEngine;

/// Builder for assembling an invoice whose lines are resolved by the VAT engine.
///
/// ```
/// use eurovat::core::*;
/// use eurovat::invoice::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("INV-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .seller(PartyBuilder::new("ACME GmbH", CountryCode::DE).vat_id("DE123456789").build())
///     .buyer(PartyBuilder::new("Kunde AG", CountryCode::DE).build())
///     .buyer_type(BuyerType::B2b)
///     .add_line(LineItemBuilder::new("1", "Consulting", VatCategory::Others, dec!(1000)).build())
///     .add_line(LineItemBuilder::new("2", "Catering", VatCategory::BasicFood, dec!(100)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.unwrap().gross_total, dec!(1297.00));
/// ```
pub struct InvoiceBuilder<'a> {
    number: String,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    currency_code: String,
    notes: Vec<String>,
    seller: Option<Party>,
    buyer: Option<Party>,
    buyer_type: BuyerType,
    lines: Vec<LineItem>,
    payment_terms: Option<PaymentTerms>,
    plan_limits: Option<PlanLimits>,
    invoices_this_month: u32,
    engine: VatEngine<'a>,
}

impl InvoiceBuilder<'static> {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            due_date: None,
            currency_code: "EUR".to_string(),
            notes: Vec::new(),
            seller: None,
            buyer: None,
            buyer_type: BuyerType::B2b,
            lines: Vec::new(),
            payment_terms: None,
            plan_limits: None,
            invoices_this_month: 0,
            engine: VatEngine::default(),
        }
    }
}

impl<'a> InvoiceBuilder<'a> {
    /// Resolve lines against a custom rule table instead of the built-in one.
    pub fn rules<'b>(self, rules: &'b RuleTable) -> InvoiceBuilder<'b> {
        InvoiceBuilder {
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            currency_code: self.currency_code,
            notes: self.notes,
            seller: self.seller,
            buyer: self.buyer,
            buyer_type: self.buyer_type,
            lines: self.lines,
            payment_terms: self.payment_terms,
            plan_limits: self.plan_limits,
            invoices_this_month: self.invoices_this_month,
            engine: VatEngine::new(rules),
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add the standard reverse charge note.
    pub fn reverse_charge_note(self) -> Self {
        self.note(REVERSE_CHARGE_NOTE)
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn buyer_type(mut self, buyer_type: BuyerType) -> Self {
        self.buyer_type = buyer_type;
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn payment_terms(mut self, terms: PaymentTerms) -> Self {
        self.payment_terms = Some(terms);
        self
    }

    /// Gate the build on plan quotas.
    pub fn plan_limits(mut self, limits: PlanLimits, invoices_this_month: u32) -> Self {
        self.plan_limits = Some(limits);
        self.invoices_this_month = invoices_this_month;
        self
    }

    /// Resolve VAT per line, calculate totals, apply plan limits and validate.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, VatError> {
        let limits = self.plan_limits.clone();
        let invoices_this_month = self.invoices_this_month;
        let invoice = self.assemble()?;

        if let Some(limits) = limits {
            limits.check(&invoice, invoices_this_month)?;
        }

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(VatError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without plan limits or validation. VAT is still resolved and
    /// totals calculated.
    pub fn build_unchecked(self) -> Result<Invoice, VatError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Invoice, VatError> {
        let seller = self
            .seller
            .ok_or_else(|| VatError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| VatError::Builder("buyer is required".into()))?;

        let mut lines: Vec<LineItem> = self.lines.into_iter().filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(VatError::Builder(
                "at least one line item is required".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(VatError::Builder(
                "invoice number cannot exceed 200 characters".into(),
            ));
        }

        for line in &mut lines {
            let facts = TransactionFacts::new(
                seller.country,
                buyer.country,
                self.buyer_type,
                line.category,
                validation::line_net(line)?,
            )
            .public_transport(line.is_public_transport);
            let outcome = self.engine.evaluate(&facts);
            if outcome.is_unknown() {
                return Err(VatError::UnsupportedCountry(format!(
                    "no VAT rule for line {} ({} → {})",
                    line.id, seller.country, buyer.country
                )));
            }
            line.tax_rate = outcome.vat_rate;
            line.vat_class = outcome.vat_class;
            line.vat_type = outcome.vat_type;
        }

        let mut invoice = Invoice {
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            currency_code: self.currency_code,
            notes: self.notes,
            seller,
            buyer,
            buyer_type: self.buyer_type,
            lines,
            payment_terms: self.payment_terms,
            totals: None,
        };

        validation::calculate_totals(&mut invoice)?;
        debug!(
            number = %invoice.number,
            lines = invoice.lines.len(),
            "invoice assembled"
        );
        Ok(invoice)
    }
}

/// Builder for Party (seller/buyer).
pub struct PartyBuilder {
    name: String,
    country: CountryCode,
    address: Option<String>,
    vat_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    contract_reference: Option<String>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, country: CountryCode) -> Self {
        Self {
            name: name.into(),
            country,
            address: None,
            vat_id: None,
            email: None,
            phone: None,
            contract_reference: None,
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.vat_id = Some(id.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn contract_reference(mut self, reference: impl Into<String>) -> Self {
        self.contract_reference = Some(reference.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            country: self.country,
            address: self.address,
            vat_id: self.vat_id,
            email: self.email,
            phone: self.phone,
            contract_reference: self.contract_reference,
        }
    }
}

/// Builder for LineItem. The VAT treatment is filled in by [`InvoiceBuilder`].
pub struct LineItemBuilder {
    id: String,
    description: String,
    category: VatCategory,
    quantity: Decimal,
    unit_price: Decimal,
    is_public_transport: bool,
}

impl LineItemBuilder {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: VatCategory,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category,
            quantity: Decimal::ONE,
            unit_price,
            is_public_transport: false,
        }
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn public_transport(mut self, confirmed: bool) -> Self {
        self.is_public_transport = confirmed;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            id: self.id,
            description: self.description,
            category: self.category,
            quantity: self.quantity,
            unit_price: self.unit_price,
            is_public_transport: self.is_public_transport,
            tax_rate: Decimal::ZERO,
            vat_class: VatClass::Standard,
            vat_type: VatType::Unknown,
            line_amount: None,
        }
    }
}
