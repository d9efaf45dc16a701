//! Ticket operations against the document store
//!
//! Request-scoped, stateless between calls: every operation reads the
//! store's current state, applies the pure domain logic from
//! [`shared::models::ticket`], and writes back. No caching, no locking —
//! concurrent writers race and the last write wins.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::json;
use tracing::info;

use shared::models::ticket::{Ticket, TicketCreate, TicketStatus};
use shared::util::format_datetime;

use crate::store::{DocumentStore, ListOptions, decode, decode_list};
use crate::utils::AppError;

use super::money;

/// Primary ticket collection
pub const TICKETS: &str = "tickets";

/// Payment amount set written to a ticket
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AmountsPatch {
    pub subtotal_amount: f64,
    pub tax_amount: f64,
    pub tip_amount: f64,
    pub total_amount: f64,
}

#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn DocumentStore>,
}

impl TicketService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a ticket in `open` state with zeroed monetary fields.
    pub async fn create(
        &self,
        input: TicketCreate,
        now: NaiveDateTime,
    ) -> Result<Ticket, AppError> {
        input.validate()?;

        let ticket_number = generate_ticket_number();
        let mut ticket = Ticket::open(
            String::new(),
            ticket_number,
            input.table_id,
            input.server_id,
            input.customer_count,
            now,
        )?;
        ticket.special_instructions = input.special_instructions;

        let record = self
            .store
            .create(TICKETS, serde_json::to_value(&ticket).map_err(internal)?)
            .await?;
        let created: Ticket = decode(record)?;
        info!(
            ticket = %created.ticket_number,
            table = %created.table_id,
            "ticket opened"
        );
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Ticket, AppError> {
        Ok(decode(self.store.get_one(TICKETS, id).await?)?)
    }

    /// All tickets, newest first.
    pub async fn list(&self) -> Result<Vec<Ticket>, AppError> {
        let records = self
            .store
            .get_full_list(TICKETS, ListOptions::default().with_sort("-created"))
            .await?;
        Ok(decode_list(records)?)
    }

    /// Apply a status transition and persist the changed fields.
    ///
    /// Illegal targets surface as a business-rule error naming the target;
    /// the stored record is untouched in that case. Store write failures
    /// propagate as-is — no retry on the ticket path.
    pub async fn set_status(
        &self,
        id: &str,
        target: TicketStatus,
        now: NaiveDateTime,
    ) -> Result<Ticket, AppError> {
        let mut ticket = self.get(id).await?;
        ticket.transition(target, now)?;

        let mut patch = json!({
            "status": target,
            "updated": format_datetime(&now),
        });
        if let Some(start) = &ticket.kitchen_start_time {
            patch["kitchen_start_time"] = json!(format_datetime(start));
        }
        if let Some(ready) = &ticket.kitchen_ready_time {
            patch["kitchen_ready_time"] = json!(format_datetime(ready));
        }

        let record = self.store.update(TICKETS, id, patch).await?;
        info!(ticket = %ticket.ticket_number, status = %target, "ticket status changed");
        Ok(decode(record)?)
    }

    /// Write the payment amount set after validating arithmetic.
    pub async fn set_amounts(&self, id: &str, amounts: AmountsPatch) -> Result<Ticket, AppError> {
        if !money::validate_payment_amounts(
            amounts.subtotal_amount,
            amounts.tax_amount,
            amounts.tip_amount,
            amounts.total_amount,
        ) {
            return Err(AppError::validation(format!(
                "payment amounts do not add up: {} + {} + {} != {}",
                amounts.subtotal_amount,
                amounts.tax_amount,
                amounts.tip_amount,
                amounts.total_amount
            )));
        }

        // Amounts are stored at 2 decimal places, matching the arithmetic
        let record = self
            .store
            .update(
                TICKETS,
                id,
                json!({
                    "subtotal_amount": money::round2(amounts.subtotal_amount),
                    "tax_amount": money::round2(amounts.tax_amount),
                    "tip_amount": money::round2(amounts.tip_amount),
                    "total_amount": money::round2(amounts.total_amount),
                }),
            )
            .await?;
        Ok(decode(record)?)
    }
}

fn generate_ticket_number() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("T-{}", &id[..6].to_uppercase())
}

fn internal(e: serde_json::Error) -> AppError {
    AppError::internal(e.to_string())
}
