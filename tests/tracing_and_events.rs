//! Integration tests for tracing and event monitoring.
//!
//! This test demonstrates how to use the tracing callback to watch a singleton
//! being created, failing, or being served to waiting and late callers.

use creational_patterns::{define_singleton, InitState, LazySingleton, SingletonEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_basic_tracing() {
    define_singleton!(traced1: i32, init = || 42);

    // Set up event collection
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    traced1::set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(format!("{}", event));
    });

    let _ = traced1::instance();
    let _ = traced1::instance();

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            "init_started { type_name: i32 }",
            "init_completed { type_name: i32 }",
            "hit { type_name: i32, found: true }",
        ]
    );
}

#[test]
fn test_trace_failure_event() {
    define_singleton!(traced2: u32, try_init = || Err::<u32, _>("no route to host"));

    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    traced2::set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    let _ = traced2::instance();
    let _ = traced2::instance();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert_eq!(
        captured[1],
        SingletonEvent::InitFailed {
            type_name: "u32",
            reason: "no route to host".to_string(),
        }
    );
    assert_eq!(
        captured[2],
        SingletonEvent::Hit {
            type_name: "u32",
            found: false,
        }
    );

    traced2::clear_trace_callback();
}

#[test]
fn test_trace_waiting_event() {
    let registry = Arc::new(LazySingleton::<String>::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    registry.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let initializer = {
        let registry = registry.clone();
        thread::spawn(move || {
            registry.get_or_init(move || {
                started_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                "slow".to_string()
            })
        })
    };

    started_rx.recv().unwrap();

    let waiter = {
        let registry = registry.clone();
        thread::spawn(move || registry.get_or_init(|| "never".to_string()))
    };

    // Give the waiter time to block before releasing the initializer
    while !events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, SingletonEvent::Waiting { .. }))
    {
        thread::sleep(Duration::from_millis(1));
    }
    release_tx.send(()).unwrap();

    let a = initializer.join().unwrap().unwrap();
    let b = waiter.join().unwrap().unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let captured = events.lock().unwrap();
    assert_eq!(
        captured[0],
        SingletonEvent::InitStarted {
            type_name: "alloc::string::String"
        }
    );
    assert!(captured.contains(&SingletonEvent::InitCompleted {
        type_name: "alloc::string::String"
    }));
    assert_eq!(
        captured
            .iter()
            .filter(|e| matches!(e, SingletonEvent::InitStarted { .. }))
            .count(),
        1
    );
}

#[test]
fn test_clear_trace_callback() {
    define_singleton!(traced3: u8, init = || 1);

    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();

    traced3::set_trace_callback(move |_| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });

    let _ = traced3::instance();
    traced3::clear_trace_callback();

    let _ = traced3::instance();
    let _ = traced3::instance();

    // Only the start and completion of the first access were traced
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_trace_callback_with_custom_logic() {
    let registry: LazySingleton<u64> = LazySingleton::new();

    // Example: Count hits separately from initializations
    let hits = Arc::new(AtomicUsize::new(0));
    let inits = Arc::new(AtomicUsize::new(0));

    let hits_clone = hits.clone();
    let inits_clone = inits.clone();

    registry.set_trace_callback(move |event| match event {
        SingletonEvent::Hit { .. } => {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        }
        SingletonEvent::InitStarted { .. } => {
            inits_clone.fetch_add(1, Ordering::SeqCst);
        }
        _ => {}
    });

    for _ in 0..5 {
        let _ = registry.get_or_init(|| 99);
    }

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn test_panicking_callback_does_not_jam_initialization() {
    let registry = Arc::new(LazySingleton::<u32>::new());

    registry.set_trace_callback(|event| {
        if matches!(event, SingletonEvent::InitStarted { .. }) {
            panic!("callback exploded");
        }
    });

    // The initializing caller is not unwound by the callback
    let first = registry.get_or_init(|| 1).unwrap();
    assert_eq!(*first, 1);
    assert_eq!(registry.state(), InitState::Completed);

    registry.clear_trace_callback();

    let (tx, rx) = mpsc::channel();
    {
        let registry = registry.clone();
        thread::spawn(move || {
            let _ = tx.send(registry.get_or_init(|| 2));
        });
    }

    // A second caller must return rather than block on the gate
    let second = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("second caller blocked")
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
