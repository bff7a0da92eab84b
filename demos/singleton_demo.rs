//! Singleton walkthrough.
//!
//! Demonstrates:
//! - Repeated `instance()` calls returning the same connection
//! - Using the shared connection
//! - Thread-safe first access from many threads
//! - A failing initializer poisoning its singleton
//!
//! Run with: `cargo run --example singleton_demo`
//! Set `DEMO_LOG_LEVEL=debug` to see the library's log records.

#[path = "common/mod.rs"]
mod common;

use creational_patterns::database::DatabaseConnection;
use creational_patterns::{define_singleton, LazySingleton};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

define_singleton!(database: DatabaseConnection, init = DatabaseConnection::with_defaults);

fn main() {
    common::init_logger();

    println!("=== Singleton Pattern Demo ===\n");

    // -------------------------------------------------------------------------
    // 1. Multiple accesses, one instance
    // -------------------------------------------------------------------------
    println!("1. Getting multiple instances:");

    let db1 = database::instance().unwrap();
    let db2 = database::instance().unwrap();
    let db3 = database::instance().unwrap();

    println!("   db1 connection ID: {}", db1.connection_id());
    println!("   db2 connection ID: {}", db2.connection_id());
    println!("   db3 connection ID: {}", db3.connection_id());

    if Arc::ptr_eq(&db1, &db2) && Arc::ptr_eq(&db2, &db3) {
        println!("   ✓ All references point to the same instance!");
    }

    // -------------------------------------------------------------------------
    // 2. Using the instance
    // -------------------------------------------------------------------------
    println!("\n2. Using the singleton instance:");

    db1.connect();
    for sql in ["SELECT * FROM users", "SELECT * FROM products"] {
        match db1.query(sql) {
            Ok(outcome) => println!(
                "   Executed: {} (connection ID: {})",
                outcome.sql, outcome.connection_id
            ),
            Err(err) => println!("   Error: {err}"),
        }
    }
    db1.disconnect();

    if let Err(err) = db2.query("SELECT 1") {
        println!("   ✓ db2 sees the disconnect too: {err}");
    }

    // -------------------------------------------------------------------------
    // 3. Concurrent access
    // -------------------------------------------------------------------------
    println!("\n3. Testing thread-safety with concurrent access:");

    let fresh: Arc<LazySingleton<DatabaseConnection>> = Arc::new(LazySingleton::new());
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let fresh = fresh.clone();
            thread::spawn(move || {
                // Small delay to increase chance of concurrent access
                thread::sleep(Duration::from_millis(10));
                fresh.get_or_init(DatabaseConnection::with_defaults)
            })
        })
        .collect();

    let instances: Vec<Arc<DatabaseConnection>> = handles
        .into_iter()
        .filter_map(|h| h.join().ok()?.ok())
        .collect();

    let first_id = instances[0].connection_id();
    let mismatched: Vec<_> = instances
        .iter()
        .enumerate()
        .filter(|(_, inst)| inst.connection_id() != first_id)
        .collect();

    for (i, inst) in &mismatched {
        println!("   ✗ Instance {i} has different ID: {}", inst.connection_id());
    }
    if mismatched.is_empty() {
        println!(
            "   ✓ All {} threads received the same instance (ID: {first_id})",
            instances.len()
        );
        println!("   ✓ Thread-safety verified!");
    }

    // -------------------------------------------------------------------------
    // 4. Poisoning
    // -------------------------------------------------------------------------
    println!("\n4. Failing initializer:");

    let broken: LazySingleton<DatabaseConnection> = LazySingleton::new();
    for attempt in 1..=2 {
        match broken.get_instance(|| Err::<DatabaseConnection, _>("connection refused")) {
            Ok(_) => println!("   attempt {attempt}: unexpectedly connected"),
            Err(err) => println!("   attempt {attempt}: {err}"),
        }
    }
    println!("   ✓ The failure is permanent: state is {:?}", broken.state());

    // -------------------------------------------------------------------------
    // 5. Persistence
    // -------------------------------------------------------------------------
    println!("\n5. Instance persistence:");
    println!("   Connection string: {}", db1.connection_string());
    println!("   Connection ID: {}", db1.connection_id());
    println!("   ✓ The same instance is reused across the entire program lifecycle");
}
