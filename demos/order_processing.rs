//! Order lifecycle driven through a machine, with hooks reporting
//! progress.

use transit::builder::MachineBuilder;

fn main() {
    let mut order = MachineBuilder::new()
        .initial("new")
        .event("pay", "new", "paid")
        .event("ship", "paid", "shipped")
        .event("deliver", "shipped", "done")
        .event("cancel", ["new", "paid"], "cancelled")
        .build()
        .expect("order machine builds");

    order.on("before-transition", |ctx| {
        println!("-> {} ({} -> {})", ctx.event, ctx.from, ctx.to);
    });
    order.on("onDone", |_| println!("order complete"));

    for event in ["ship", "pay", "ship", "deliver"] {
        if !order.fire(event) {
            println!("ignored '{}' from '{}'", event, order.current_state());
        }
    }

    println!("visited: {:?}", order.history());
}
