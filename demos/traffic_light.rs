//! Classic traffic light: one event cycling through three states.

use transit::machine;

fn main() {
    let mut light = machine! {
        initial: "red",
        events: [
            "advance": "red" => "green",
            "advance": "green" => "yellow",
            "advance": "yellow" => "red",
        ]
    }
    .expect("light machine builds");

    light.on("enter-state", |ctx| println!("light is now {}", ctx.to));

    for _ in 0..6 {
        light.fire("advance");
    }

    assert!(light.is("red"));
    println!("cycled back to {}", light.current_state());
}
