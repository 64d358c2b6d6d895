use memento::{CacheKey, HostEnvironment, Memoized};
use std::cell::Cell;

struct Translator {
    requests: Cell<usize>,
}

impl Translator {
    fn translate(&self, text: &str, lang: &str, _trace_id: u64) -> String {
        self.requests.set(self.requests.get() + 1);
        println!("Translating {text:?} to {lang}");
        format!("[{lang}] {text}")
    }
}

fn main() {
    println!("\n=== Coarse Keys Without a Resolver ===\n");

    let coarse = Memoized::builder(
        |t: &Translator, (text, lang, trace_id): (&str, &str, u64)| t.translate(text, lang, trace_id),
    )
    .host(HostEnvironment::Browser)
    .build()
    .expect("default capacity is valid");

    let translator = Translator {
        requests: Cell::new(0),
    };

    println!("{}", coarse.call(&translator, ("hello", "fr", 1)));
    // Same first argument: served from the cache even though lang differs
    println!("{}", coarse.call(&translator, ("hello", "de", 2)));
    assert_eq!(translator.requests.get(), 1);

    println!("\n=== Resolver Over Text And Language ===\n");

    let keyed = Memoized::builder(
        |t: &Translator, (text, lang, trace_id): (&str, &str, u64)| t.translate(text, lang, trace_id),
    )
    .resolver(|&(text, lang, _): &(&str, &str, u64)| CacheKey::composite([text, lang]))
    .host(HostEnvironment::Browser)
    .build()
    .expect("default capacity is valid");

    let translator = Translator {
        requests: Cell::new(0),
    };

    println!("{}", keyed.call(&translator, ("hello", "fr", 1)));
    println!("{}", keyed.call(&translator, ("hello", "de", 2)));
    // trace_id is not part of the key
    println!("{}", keyed.call(&translator, ("hello", "fr", 3)));
    assert_eq!(translator.requests.get(), 2);

    println!("\n✅ Resolver test PASSED");
}
