// Example: window a long fixed-height list and follow a scroll.
use rowwindow::{Align, Viewport, WindowOptions, Windower};

fn main() {
    let rooms: Vec<String> = (0..10_000).map(|i| format!("Room {:04}", i + 1)).collect();

    let mut w = Windower::fixed(rooms.len(), 48, WindowOptions::default())
        .expect("row height is non-zero")
        .with_viewport(Viewport::new(0, 480));

    let window = w.window();
    println!("spacer={} rows={:?}", window.total_height, window.range());

    w.set_scroll_top(96_000);
    let window = w.window();
    println!("offset_y={} rows={:?}", window.offset_y, window.range());
    for v in window.items(&rooms).take(3) {
        println!("  #{:<5} {}", v.index, v.item);
    }

    let off = w.scroll_to_index(9_999, Align::End);
    println!("after scroll_to_index: scroll_top={off} window={:?}", w.window().range());
}
