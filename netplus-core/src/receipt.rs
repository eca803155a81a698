//! Receipt formatting
//!
//! Pure rendering of a settled payment into the two receipt dialects:
//! tagged markup for BLE device printers and plain text for chat/SMS,
//! the intent backend and on-screen preview. Same inputs always produce
//! byte-identical output.

use crate::error::{PosError, PosResult};
use crate::models::{Customer, IssuerProfile, PaymentRequest, PaymentResult, Receipt};
use netplus_printer::MarkupBuilder;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// Fixed sentinel for customers without box identifiers
const NO_BOXES: &str = "N/A";

const PLAIN_SEP: &str = "---------------------------";

/// Render a receipt for a settled payment.
///
/// Fails only when the paid amount is not positive; the settlement
/// collaborator should have rejected such a request long before this
/// point, but a receipt must never be produced for one.
pub fn format_receipt(
    customer: &Customer,
    request: &PaymentRequest,
    result: &PaymentResult,
    issuer: &IssuerProfile,
) -> PosResult<Receipt> {
    if request.amount_paid <= Decimal::ZERO {
        return Err(PosError::InvalidAmount(request.amount_paid.to_string()));
    }

    let boxes = join_boxes(&customer.box_numbers);
    let amount = rupees(request.amount_paid);
    let balance = rupees(result.new_balance);

    Ok(Receipt {
        markup: render_markup(customer, request, result, issuer, &boxes, &amount, &balance),
        plain_text: render_plain(customer, request, result, issuer, &boxes, &amount, &balance),
    })
}

/// Two fractional digits on every rendered currency field, midpoints
/// rounded away from zero
fn rupees(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Comma-space join in existing order; `N/A` when absent
fn join_boxes(boxes: &[String]) -> String {
    if boxes.is_empty() {
        NO_BOXES.to_string()
    } else {
        boxes.join(", ")
    }
}

#[allow(clippy::too_many_arguments)]
fn render_markup(
    customer: &Customer,
    request: &PaymentRequest,
    result: &PaymentResult,
    issuer: &IssuerProfile,
    boxes: &str,
    amount: &str,
    balance: &str,
) -> String {
    let mut b = MarkupBuilder::new();
    b.text_center(&issuer.name);
    b.newlines(2);
    b.text_left(&format!("Complaint:{}", issuer.contact));
    b.newlines(3);

    b.text_center("RECEIPT");
    b.newline();
    b.line('=');

    b.text_left(&format!("Name        : {}", customer.name));
    b.newline();
    b.text_left(&format!("Date        : {}", result.date));
    b.newline();
    b.text_left(&format!("Time        : {}", result.time));
    b.newline();
    b.text_left(&format!("Address     : {}", customer.address));
    b.newline();
    b.text_left(&format!("Box/Id      : {}", boxes));
    b.newline();
    b.text_left(&format!("Amount Paid : Rs. {}", amount));
    b.newline();
    b.text_left(&format!("Method      : {}", request.payment_method));
    b.newlines(2);
    b.text_left(&format!("Curr Outstanding : Rs. {}", balance));
    b.newline();
    b.line('=');
    b.newline();

    b.text_center("THANK YOU");
    b.newline();
    b.finish()
}

#[allow(clippy::too_many_arguments)]
fn render_plain(
    customer: &Customer,
    request: &PaymentRequest,
    result: &PaymentResult,
    issuer: &IssuerProfile,
    boxes: &str,
    amount: &str,
    balance: &str,
) -> String {
    let mut s = String::new();
    // writeln! to a String is infallible
    let _ = writeln!(s, "{}", issuer.name);
    let _ = writeln!(s, "Complaint : {}", issuer.contact);
    let _ = writeln!(s, "{}", PLAIN_SEP);
    let _ = writeln!(s, "         RECEIPT");
    let _ = writeln!(s, "{}", PLAIN_SEP);
    let _ = writeln!(s, "Name : {}", customer.name);
    let _ = writeln!(s, "Date : {}", result.date);
    let _ = writeln!(s, "Time : {}", result.time);
    let _ = writeln!(s, "Address : {}", customer.address);
    let _ = writeln!(s, "Box/Id : {}", boxes);
    let _ = writeln!(s, "Amount Paid : ₹{}", amount);
    let _ = writeln!(s, "Method : {}", request.payment_method);
    let _ = writeln!(s, "{}", PLAIN_SEP);
    let _ = writeln!(s, "Current Outstanding : ₹{}", balance);
    let _ = writeln!(s, "{}", PLAIN_SEP);
    let _ = writeln!(s, "THANK YOU 🙏");
    s
}
