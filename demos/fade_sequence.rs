//! Fade a row of cards out one by one, then bring the first back.
//!
//! Runs against the in-memory document and prints what happens on its
//! virtual clock.

use segue::animation::then;
use segue::builder::{opacity_steps, AnimatorBuilder, SequenceBuilder};
use segue::host::{ElementId, MemoryDocument};

fn main() {
    let doc = MemoryDocument::new();
    let cards: Vec<ElementId> = (0..3).map(|_| doc.create_element("section")).collect();

    let animator = match AnimatorBuilder::new().stall_timeout(2.0).build(doc.clone()) {
        Ok(animator) => animator,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    let clock = doc.clone();
    let finale = animator.clone();
    let first = cards[0];
    let result = SequenceBuilder::new()
        .steps(opacity_steps(cards.iter().copied(), "0", 250))
        .on_step(move |card: &ElementId, index, total| {
            println!("[{:>4}ms] {card:?} faded ({}/{total})", clock.now_ms(), index + 1);
        })
        .on_complete(move || {
            println!("all cards hidden; fading the first back in");
            let shown = then(|card: &ElementId| println!("{card:?} visible"));
            if let Err(err) = finale.fade_in(&first, 400, shown) {
                eprintln!("fade in failed: {err}");
            }
        })
        .run(&animator);

    let handle = match result {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("sequence rejected: {err}");
            return;
        }
    };

    let elapsed = doc.run_until_idle();
    println!(
        "sequence {} finished in {elapsed}ms after {} steps",
        handle.id(),
        handle.history().steps().len()
    );
}
