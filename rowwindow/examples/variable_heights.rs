// Example: rows with their own heights, re-measured after first paint.
use rowwindow::{RowLayout, VariableRows, Viewport, WindowOptions, Windower};

fn main() {
    // Folio lines: every fifth row carries a wrapped note and is taller.
    let rows = VariableRows::from_fn(2_000, |i| if i % 5 == 0 { 72 } else { 36 })
        .expect("estimates are non-zero");
    let mut w = Windower::new(rows, WindowOptions::new().with_overscan(2))
        .with_viewport(Viewport::new(1_000, 300));

    println!("total={} window={:?}", w.total_height(), w.window().range());

    // The host measured row 30 taller than estimated.
    let delta = w
        .update_layout(|rows| rows.set_height(30, 150))
        .expect("measurement is non-zero");
    println!("delta={delta} total={}", w.total_height());
    println!("row 30 starts at {}", w.layout().row_start(30));
    println!("window now {:?}", w.window().range());
}
