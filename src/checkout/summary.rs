//! Order Summary
//!
//! Terminal rendering of a prepared order: one table row per cart line,
//! followed by the totals block.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::{CheckoutDraft, CheckoutTotals, observations::observations},
    items::LineItem,
    pricing::{self, SurchargeRates},
};

/// Errors that can occur while writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Printable view of an order before submission.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    lines: &'a [LineItem],
    draft: &'a CheckoutDraft,
    rates: SurchargeRates,
    totals: CheckoutTotals,
}

impl<'a> OrderSummary<'a> {
    /// Builds a summary for the given lines and draft.
    #[must_use]
    pub fn new(lines: &'a [LineItem], draft: &'a CheckoutDraft, rates: SurchargeRates) -> Self {
        Self {
            lines,
            draft,
            rates,
            totals: CheckoutTotals::compute(lines, &rates),
        }
    }

    /// Totals shown at the bottom of the summary.
    pub fn totals(&self) -> &CheckoutTotals {
        &self.totals
    }

    /// Writes the summary table and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Producto", "Tamaño", "Cant.", "Precio", "Importe", "Notas"]);

        for (index, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{}", index + 1),
                line.name().to_string(),
                line.size_label().to_string(),
                line.quantity().to_string(),
                pricing::format_amount(line.unit_price()),
                pricing::format_amount(&line.line_total()),
                observations(line, &self.rates).unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(3..6), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}")?;

        self.write_totals(&mut out)?;

        Ok(())
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let mut rows = vec![("Subtotal:", &self.totals.subtotal)];

        if self.totals.milk_surcharge.to_minor_units() > 0 {
            rows.push(("Extra leche:", &self.totals.milk_surcharge));
        }

        if self.totals.extras_surcharge.to_minor_units() > 0 {
            rows.push(("Extras:", &self.totals.extras_surcharge));
        }

        rows.push(("Total:", &self.totals.total));

        let values: Vec<(&str, String)> = rows
            .into_iter()
            .map(|(label, amount)| (label, pricing::format_amount(amount)))
            .collect();

        let label_width = values.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let value_width = values.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &values {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;
        writeln!(out, " Servicio: {}", self.draft.service())?;

        if let Some(name) = self.draft.customer_name() {
            writeln!(out, " Cliente: {name}")?;
        }

        if let Some(comments) = self.draft.comments() {
            writeln!(out, " Comentarios: {comments}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        api::ServiceType,
        items::{
            LineSelection,
            modifiers::{Extra, MilkType},
        },
        products::fixtures::{frappe, sandwich},
    };

    use super::*;

    fn render(summary: &OrderSummary<'_>) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = Vec::new();

        summary.write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn renders_lines_and_totals() -> TestResult {
        let lines = [
            LineItem::new(&frappe(), LineSelection::new(2).milk(MilkType::Almond)),
            LineItem::new(&sandwich(), LineSelection::new(1).extras([Extra::Bacon])),
        ];
        let draft = CheckoutDraft::new(ServiceType::Takeout)
            .with_customer_name("Ana")
            .with_comments("Sin popote");

        let summary = OrderSummary::new(&lines, &draft, SurchargeRates::default());
        let text = render(&summary)?;

        assert!(text.contains("Matcha Frío"));
        assert!(text.contains("Chapata"));
        assert!(text.contains("Leche de almendras"));
        assert!(text.contains("Subtotal:"));
        assert!(text.contains("$130.00"));
        assert!(text.contains("Extra leche:"));
        assert!(text.contains("$30.00"));
        assert!(text.contains("$180.00"));
        assert!(text.contains("Servicio: Para llevar"));
        assert!(text.contains("Cliente: Ana"));
        assert!(text.contains("Comentarios: Sin popote"));

        Ok(())
    }

    #[test]
    fn surcharge_rows_are_omitted_when_zero() -> TestResult {
        let lines = [LineItem::new(&sandwich(), LineSelection::new(1))];
        let draft = CheckoutDraft::default();

        let text = render(&OrderSummary::new(&lines, &draft, SurchargeRates::default()))?;

        assert!(!text.contains("Extra leche:"));
        assert!(!text.contains("Extras:"));
        assert!(!text.contains("Cliente:"));
        assert!(text.contains("Total:"));

        Ok(())
    }
}
