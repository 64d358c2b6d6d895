use memento::{HostEnvironment, Memoized};
use std::cell::Cell;
use std::rc::Rc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("memento_core=trace"))
        .init();

    println!("\n=== Host Gate ===\n");
    println!("Ambient host: {}", HostEnvironment::ambient());

    let rendering_on_server = Rc::new(Cell::new(true));
    let flag = Rc::clone(&rendering_on_server);
    let renders = Cell::new(0);

    let render = Memoized::builder(|renders: &Cell<u32>, (page,): (&str,)| {
        renders.set(renders.get() + 1);
        format!("<h1>{page}</h1>")
    })
    .name("render")
    .host_probe(move || {
        if flag.get() {
            HostEnvironment::Server
        } else {
            HostEnvironment::Browser
        }
    })
    .build()
    .expect("default capacity is valid");

    println!("Server-side render:");
    render.call(&renders, ("home",));
    render.call(&renders, ("home",));
    println!("  renders so far: {} (no caching)", renders.get());
    assert_eq!(renders.get(), 2);

    println!("Hydrated in the browser:");
    rendering_on_server.set(false);
    render.call(&renders, ("home",));
    render.call(&renders, ("home",));
    println!("  renders so far: {} (second call cached)", renders.get());
    assert_eq!(renders.get(), 3);

    #[cfg(feature = "stats")]
    println!("  bypassed calls: {}", render.stats().bypasses());

    println!("\n✅ Host gate test PASSED");
}
