use memento::{HostEnvironment, Memoized, StoreKind};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct Report {
    rows: Vec<u64>,
}

struct Analytics {
    scans: Cell<usize>,
}

impl Analytics {
    fn total(&self, report: &Report) -> u64 {
        self.scans.set(self.scans.get() + 1);
        println!("Scanning {} rows", report.rows.len());
        report.rows.iter().sum()
    }
}

fn main() {
    let total = Memoized::builder(|a: &Analytics, (report,): (Rc<Report>,)| a.total(&report))
        .name("report_total")
        .host(HostEnvironment::Browser)
        .build()
        .expect("default capacity is valid");

    let analytics = Analytics {
        scans: Cell::new(0),
    };

    println!("\n=== Identity-Keyed Memoization ===\n");

    let q1 = Rc::new(Report {
        rows: vec![10, 20, 30],
    });
    let q1_copy = Rc::new(Report {
        rows: vec![10, 20, 30],
    });

    assert_eq!(total.store_kind(&(q1.clone(),)), StoreKind::Identity);

    println!("total(q1) = {}", total.call(&analytics, (q1.clone(),)));
    println!("total(q1) = {} (same reference, cached)", total.call(&analytics, (q1.clone(),)));
    println!(
        "total(q1_copy) = {} (equal contents, different reference)",
        total.call(&analytics, (q1_copy.clone(),))
    );
    assert_eq!(analytics.scans.get(), 2);

    println!("\nLive entries: {}", total.len());
    assert_eq!(total.len(), 2);

    println!("Dropping q1...");
    drop(q1);
    println!("Live entries: {}", total.len());
    assert_eq!(total.len(), 1);

    println!("\n✅ Identity key test PASSED");
}
