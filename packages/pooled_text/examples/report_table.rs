//! Assembles a small aligned report with `TextBuilder`.
//!
//! The rows are formatted into a stack buffer first and spill over into the shared pool once the
//! report outgrows it.

use pooled_text::{NumberFormat, TextBuilder};

struct Row {
    item: &'static str,
    quantity: u32,
    price: f64,
}

const ROWS: &[Row] = &[
    Row {
        item: "Widget",
        quantity: 12,
        price: 3.5,
    },
    Row {
        item: "Gadget",
        quantity: 1500,
        price: 1249.99,
    },
    Row {
        item: "Gizmo 🦀",
        quantity: 7,
        price: 0.25,
    },
];

fn main() {
    println!("=== TextBuilder report example ===");
    println!();

    for (name, numbers) in [
        ("Invariant", NumberFormat::INVARIANT),
        ("German", NumberFormat::new(',', '.', '-')),
    ] {
        let mut stack = [0_u16; 64];
        let mut report = TextBuilder::new_fixed(&mut stack);

        report
            .format_into(
                Some(&numbers),
                "{0,-10}|{1,8}|{2,12}\n",
                &["Item".into(), "Qty".into(), "Price".into()],
            )
            .expect("header template is valid");
        report.append_repeated(u16::from(b'-'), 32);
        report.append_char(u16::from(b'\n'));

        for row in ROWS {
            report
                .format_into(
                    Some(&numbers),
                    "{0,-10}|{1,8:N0}|{2,12:N2}\n",
                    &[row.item.into(), (&row.quantity).into(), (&row.price).into()],
                )
                .expect("row template is valid");
        }

        println!("{name} (capacity {} after growth):", report.capacity());
        print!("{}", report.into_string());
        println!();
    }
}
