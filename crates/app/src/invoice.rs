//! Invoice/bill rendering.
//!
//! Renders a confirmation into a printable HTML document the shell can
//! share or mail. This runs strictly after the order is confirmed; a
//! rendering failure never rolls back the order.

use askama::Template;
use thiserror::Error;

use crate::models::Confirmation;

/// Errors that can occur while rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Invoice document template.
#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoiceTemplate<'a> {
    customer: &'a str,
    order_number: &'a str,
    date: String,
    lines: Vec<InvoiceLine>,
    total: String,
    address: String,
}

/// One rendered invoice line.
struct InvoiceLine {
    name: String,
    quantity: u32,
    unit_price: String,
    line_total: String,
}

/// Render a confirmation as an HTML invoice.
///
/// # Errors
///
/// Returns `InvoiceError::Template` if rendering fails.
pub fn render_invoice(
    confirmation: &Confirmation,
    customer_name: &str,
) -> Result<String, InvoiceError> {
    let lines = confirmation
        .items
        .iter()
        .map(|line| InvoiceLine {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.display(),
            line_total: line.unit_price.times(line.quantity).display(),
        })
        .collect();

    let template = InvoiceTemplate {
        customer: customer_name,
        order_number: confirmation.order_number.as_str(),
        date: confirmation.confirmed_at.format("%d/%m/%Y").to_string(),
        lines,
        total: confirmation.total.display(),
        address: confirmation.address.full_address(),
    };

    Ok(template.render()?)
}
