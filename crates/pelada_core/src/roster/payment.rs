use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "cartao")]
    Card,
}

impl PaymentMethod {
    pub fn parse(input: &str) -> Result<Self, RosterError> {
        match input.trim().to_lowercase().as_str() {
            "pix" => Ok(Self::Pix),
            "dinheiro" => Ok(Self::Cash),
            "cartao" | "cartão" => Ok(Self::Card),
            _ => Err(RosterError::InvalidPaymentMethod { input: input.trim().to_string() }),
        }
    }

    /// Marker rendered next to a paid participant.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pix => "🔄",
            Self::Cash => "💵",
            Self::Card => "💳",
        }
    }

    /// Canonical command word, also the wire format.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::Cash => "dinheiro",
            Self::Card => "cartao",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One confirmed payment. Serialized field names follow the bot's data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipoPagamento")]
    pub method: PaymentMethod,
    #[serde(rename = "dataPagamento")]
    pub date: NaiveDate,
}

/// Append-only payment history for the season, keyed by (name, date).
///
/// Cycle resets leave the ledger alone: records are dated, so each cycle
/// only ever sees its own entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLedger {
    records: Vec<PaymentRecord>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<PaymentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn find(&self, name: &str, date: NaiveDate) -> Option<&PaymentRecord> {
        self.records.iter().find(|record| record.name == name && record.date == date)
    }

    /// Append a record, rejecting a second payment by the same participant
    /// on the same date. The error carries the prior record.
    pub fn record(
        &mut self,
        name: &str,
        method: PaymentMethod,
        date: NaiveDate,
    ) -> Result<(), RosterError> {
        if let Some(prior) = self.find(name, date) {
            return Err(RosterError::DuplicatePayment {
                name: prior.name.clone(),
                method: prior.method,
                date: prior.date,
            });
        }
        self.records.push(PaymentRecord { name: name.to_string(), method, date });
        Ok(())
    }

    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &PaymentRecord> {
        self.records.iter().filter(move |record| record.date == date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_accepts_command_words() {
        assert_eq!(PaymentMethod::parse("pix").unwrap(), PaymentMethod::Pix);
        assert_eq!(PaymentMethod::parse("DINHEIRO").unwrap(), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse(" cartao ").unwrap(), PaymentMethod::Card);
        assert_eq!(PaymentMethod::parse("cartão").unwrap(), PaymentMethod::Card);

        assert!(matches!(
            PaymentMethod::parse("cheque"),
            Err(RosterError::InvalidPaymentMethod { .. })
        ));
    }

    #[test]
    fn test_duplicate_payment_rejected_for_same_date() {
        let mut ledger = PaymentLedger::new();
        let day = date("2025-03-06");

        ledger.record("Rafael (21 99999-0001)", PaymentMethod::Pix, day).unwrap();

        let err = ledger.record("Rafael (21 99999-0001)", PaymentMethod::Cash, day).unwrap_err();
        match err {
            RosterError::DuplicatePayment { name, method, date } => {
                assert_eq!(name, "Rafael (21 99999-0001)");
                assert_eq!(method, PaymentMethod::Pix);
                assert_eq!(date, day);
            }
            other => panic!("expected DuplicatePayment, got {:?}", other),
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_same_participant_can_pay_on_another_date() {
        let mut ledger = PaymentLedger::new();

        ledger.record("Bruno", PaymentMethod::Card, date("2025-03-06")).unwrap();
        ledger.record("Bruno", PaymentMethod::Card, date("2025-03-13")).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.for_date(date("2025-03-06")).count(), 1);
        assert_eq!(ledger.for_date(date("2025-03-13")).count(), 1);
    }

    #[test]
    fn test_wire_format_field_names() {
        let record = PaymentRecord {
            name: "Bruno".to_string(),
            method: PaymentMethod::Cash,
            date: date("2025-03-06"),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nome"], "Bruno");
        assert_eq!(json["tipoPagamento"], "dinheiro");
        assert_eq!(json["dataPagamento"], "2025-03-06");
    }
}
