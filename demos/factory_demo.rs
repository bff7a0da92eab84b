//! Factory walkthrough.
//!
//! Demonstrates:
//! - Creating processors for each payment method
//! - Processing payments through the common interface
//! - Rejecting unknown payment tags
//!
//! Run with: `cargo run --example factory_demo`

#[path = "common/mod.rs"]
mod common;

use creational_patterns::factory::{
    create_payment_processor, create_payment_processor_from_tag, PaymentMethod, PaymentProcessor,
};
use std::collections::HashMap;

fn details(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() {
    common::init_logger();

    println!("=== Factory Pattern Demo ===\n");

    // -------------------------------------------------------------------------
    // 1. Creating processors
    // -------------------------------------------------------------------------
    println!("1. Creating payment processors via factory:");

    let requests = [
        (
            PaymentMethod::CreditCard,
            details(&[("cardNumber", "1234567890123456"), ("cvv", "123")]),
        ),
        (
            PaymentMethod::PayPal,
            details(&[("email", "user@example.com")]),
        ),
        (
            PaymentMethod::BankTransfer,
            details(&[("accountNumber", "987654321"), ("routingNumber", "123456789")]),
        ),
    ];

    let processors: Vec<PaymentProcessor> = requests
        .iter()
        .map(|(method, details)| create_payment_processor(*method, details))
        .collect();

    for processor in &processors {
        println!("   Created: {processor} processor");
    }

    // -------------------------------------------------------------------------
    // 2. Processing payments
    // -------------------------------------------------------------------------
    println!("\n2. Processing payments:");

    let amounts = [99.99, 149.50, 299.00];
    for (i, (processor, amount)) in processors.iter().zip(amounts).enumerate() {
        println!("   Payment {}:", i + 1);
        match processor.process(amount) {
            Ok(receipt) => println!("   {}", receipt.description),
            Err(err) => println!("   Error processing payment: {err}"),
        }
    }

    // -------------------------------------------------------------------------
    // 3. Selecting by tag
    // -------------------------------------------------------------------------
    println!("\n3. Selecting processors by tag:");

    for tag in ["credit", "paypal", "bank"] {
        match create_payment_processor_from_tag(tag, &HashMap::new()) {
            Ok(processor) => println!("   {tag:>6} -> {}", processor.name()),
            Err(err) => println!("   {tag:>6} -> error: {err}"),
        }
    }

    // -------------------------------------------------------------------------
    // 4. Error handling
    // -------------------------------------------------------------------------
    println!("\n4. Error handling:");

    if let Err(err) = create_payment_processor_from_tag("unknown", &HashMap::new()) {
        println!("   ✓ Factory properly handles unknown types: {err}");
    }

    if let Err(err) = processors[0].process(-1.0) {
        println!("   ✓ Processors reject bad amounts: {err}");
    }
}
