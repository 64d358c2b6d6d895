use memento::{HostEnvironment, Memoized};
use std::cell::RefCell;

// Counter to verify how many times the method executes
thread_local! {
    static EXEC_COUNT: RefCell<usize> = RefCell::new(0);
}

struct Geometry;

impl Geometry {
    fn double(&self, x: i64) -> i64 {
        EXEC_COUNT.with(|count| {
            *count.borrow_mut() += 1;
        });
        println!("Executing double({x})");
        x * 2
    }
}

fn exec_count() -> usize {
    EXEC_COUNT.with(|count| *count.borrow())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let double = Memoized::builder(|g: &Geometry, (x,): (i64,)| g.double(x))
        .name("double")
        .host(HostEnvironment::Browser)
        .build()
        .expect("default capacity is valid");

    let geometry = Geometry;

    println!("\n=== Basic Memoization ===\n");

    // Call 1: miss -> cache: [3]
    println!("Calling double(3)...");
    let result = double.call(&geometry, (3,));
    assert_eq!(result, 6);
    println!("Result: {}\n", result);

    // Call 2: hit -> cache: [3]
    println!("Calling double(3) again...");
    let result = double.call(&geometry, (3,));
    assert_eq!(result, 6);
    println!("Result: {} (should be cached)\n", result);

    // Call 3: miss -> cache: [3, 4]
    println!("Calling double(4)...");
    let result = double.call(&geometry, (4,));
    assert_eq!(result, 8);
    println!("Result: {}\n", result);

    assert_eq!(exec_count(), 2);
    println!("Total executions: {}", exec_count());
    println!("Cached entries: {}", double.len());

    #[cfg(feature = "stats")]
    {
        let stats = double.stats();
        println!(
            "Hits: {}, misses: {}, hit rate: {:.1}%",
            stats.hits(),
            stats.misses(),
            stats.hit_rate() * 100.0
        );
    }

    println!("\n✅ Basic memoization test PASSED");
}
