//! Factory for payment processors.
//!
//! The set of payment methods is closed: [`PaymentMethod`] enumerates it and
//! [`PaymentProcessor`] holds one concrete processor per method, so dispatch is an
//! exhaustive `match`. Unknown methods can only enter through their string tags,
//! where they are rejected with [`FactoryError::UnknownVariant`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("unknown payment type: {tag}")]
    UnknownVariant { tag: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error("invalid amount {amount}: must be a positive, finite number")]
    InvalidAmount { amount: f64 },

    #[error("invalid {field} for {processor}: {reason}")]
    InvalidDetails {
        processor: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Tags accepted by [`PaymentMethod::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CreditCard,
    PayPal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::BankTransfer => "bank",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = FactoryError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.tag() == tag)
            .ok_or_else(|| FactoryError::UnknownVariant {
                tag: tag.to_string(),
            })
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCardProcessor {
    card_number: String,
    cvv: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPalProcessor {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransferProcessor {
    account_number: String,
    routing_number: String,
}

/// A payment processor of any supported method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentProcessor {
    CreditCard(CreditCardProcessor),
    PayPal(PayPalProcessor),
    BankTransfer(BankTransferProcessor),
}

/// Record of a processed payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub processor: &'static str,
    pub amount: f64,
    pub description: String,
}

/// Builds the processor for `method` from string-keyed `details`.
///
/// Keys per method: `cardNumber` and `cvv`; `email`; `accountNumber` and
/// `routingNumber`. Missing keys become empty strings.
///
/// # Examples
///
/// ```
/// use creational_patterns::factory::{create_payment_processor, PaymentMethod};
/// use std::collections::HashMap;
///
/// let details = HashMap::from([("email".to_string(), "user@example.com".to_string())]);
/// let processor = create_payment_processor(PaymentMethod::PayPal, &details);
/// assert_eq!(processor.name(), "PayPal");
/// ```
pub fn create_payment_processor(
    method: PaymentMethod,
    details: &HashMap<String, String>,
) -> PaymentProcessor {
    let detail = |key: &str| details.get(key).cloned().unwrap_or_default();

    match method {
        PaymentMethod::CreditCard => PaymentProcessor::CreditCard(CreditCardProcessor {
            card_number: detail("cardNumber"),
            cvv: detail("cvv"),
        }),
        PaymentMethod::PayPal => PaymentProcessor::PayPal(PayPalProcessor {
            email: detail("email"),
        }),
        PaymentMethod::BankTransfer => PaymentProcessor::BankTransfer(BankTransferProcessor {
            account_number: detail("accountNumber"),
            routing_number: detail("routingNumber"),
        }),
    }
}

/// Same as [`create_payment_processor`], selecting the method by its string tag.
///
/// # Errors
///
/// - [`FactoryError::UnknownVariant`] naming `tag` when it is not `credit`, `paypal`
///   or `bank`.
pub fn create_payment_processor_from_tag(
    tag: &str,
    details: &HashMap<String, String>,
) -> Result<PaymentProcessor, FactoryError> {
    let method = tag.parse()?;
    Ok(create_payment_processor(method, details))
}

impl PaymentProcessor {
    pub fn name(&self) -> &'static str {
        match self {
            PaymentProcessor::CreditCard(_) => "Credit Card",
            PaymentProcessor::PayPal(_) => "PayPal",
            PaymentProcessor::BankTransfer(_) => "Bank Transfer",
        }
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentProcessor::CreditCard(_) => PaymentMethod::CreditCard,
            PaymentProcessor::PayPal(_) => PaymentMethod::PayPal,
            PaymentProcessor::BankTransfer(_) => PaymentMethod::BankTransfer,
        }
    }

    /// Simulates charging `amount`.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::InvalidAmount`] for zero, negative or non-finite amounts.
    /// - [`PaymentError::InvalidDetails`] when a credit card number has fewer than four
    ///   characters. Multi-byte characters count as one.
    pub fn process(&self, amount: f64) -> Result<PaymentReceipt, PaymentError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::InvalidAmount { amount });
        }

        let description = match self {
            PaymentProcessor::CreditCard(card) => {
                let last_four = card
                    .card_number
                    .char_indices()
                    .rev()
                    .nth(3)
                    .map(|(start, _)| &card.card_number[start..])
                    .ok_or_else(|| PaymentError::InvalidDetails {
                        processor: self.name(),
                        field: "cardNumber",
                        reason: "card number must have at least 4 characters".to_string(),
                    })?;
                format!("Processing ${amount:.2} via Credit Card ending in {last_four}")
            }
            PaymentProcessor::PayPal(paypal) => {
                format!("Processing ${amount:.2} via PayPal for {}", paypal.email)
            }
            PaymentProcessor::BankTransfer(bank) => format!(
                "Processing ${amount:.2} via Bank Transfer to account {}",
                bank.account_number
            ),
        };

        log::info!("{description}");
        Ok(PaymentReceipt {
            processor: self.name(),
            amount,
            description,
        })
    }
}

impl CreditCardProcessor {
    pub fn cvv(&self) -> &str {
        &self.cvv
    }
}

impl BankTransferProcessor {
    pub fn routing_number(&self) -> &str {
        &self.routing_number
    }
}

impl fmt::Display for PaymentProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tags_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.tag().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "unknown".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(
            err,
            FactoryError::UnknownVariant {
                tag: "unknown".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown payment type: unknown");
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Credit".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_credit_card_receipt() {
        let processor = create_payment_processor(
            PaymentMethod::CreditCard,
            &details(&[("cardNumber", "1234567890123456"), ("cvv", "123")]),
        );

        let receipt = processor.process(99.99).unwrap();
        assert_eq!(receipt.processor, "Credit Card");
        assert_eq!(
            receipt.description,
            "Processing $99.99 via Credit Card ending in 3456"
        );
    }

    #[test]
    fn test_short_card_number() {
        let processor = create_payment_processor(PaymentMethod::CreditCard, &HashMap::new());

        let err = processor.process(10.0).unwrap_err();
        assert!(matches!(
            err,
            PaymentError::InvalidDetails {
                field: "cardNumber",
                ..
            }
        ));
    }

    #[test]
    fn test_card_suffix_counts_characters() {
        let processor = create_payment_processor(
            PaymentMethod::CreditCard,
            &details(&[("cardNumber", "4111 1111 1111 ١٢٣٤")]),
        );

        let receipt = processor.process(5.0).unwrap();
        assert!(receipt.description.ends_with("ending in ١٢٣٤"));

        let short = create_payment_processor(
            PaymentMethod::CreditCard,
            &details(&[("cardNumber", "éé1")]),
        );
        assert!(matches!(
            short.process(5.0),
            Err(PaymentError::InvalidDetails { .. })
        ));
    }

    #[test]
    fn test_invalid_amounts() {
        let processor = create_payment_processor(
            PaymentMethod::PayPal,
            &details(&[("email", "user@example.com")]),
        );

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                processor.process(amount),
                Err(PaymentError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_method_and_display() {
        let processor = create_payment_processor(PaymentMethod::BankTransfer, &HashMap::new());
        assert_eq!(processor.method(), PaymentMethod::BankTransfer);
        assert_eq!(processor.to_string(), "Bank Transfer");
        assert_eq!(PaymentMethod::PayPal.to_string(), "paypal");
    }
}
