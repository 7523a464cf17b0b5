// Example: a bookings table with debounced search, sorting and a shrink mid-scroll.
use rowwindow_view::{Column, SearchPhase, SortDirection, TableOptions, TableView};

#[derive(Clone, Debug)]
struct Booking {
    guest: String,
    room: u32,
    nights: u32,
}

fn main() {
    let bookings: Vec<Booking> = (0..5_000)
        .map(|i| Booking {
            guest: if i % 997 == 0 {
                "Nakamura".to_string()
            } else {
                format!("Guest {i:05}")
            },
            room: 100 + i % 350,
            nights: 1 + i % 9,
        })
        .collect();

    let columns = vec![
        Column::new("guest", |b: &Booking| b.guest.clone()).with_header("Guest"),
        Column::new("room", |b: &Booking| b.room.to_string())
            .with_header("Room")
            .sortable_by_key(|b: &Booking| b.room),
        Column::new("nights", |b: &Booking| b.nights.to_string())
            .sortable_by_key(|b: &Booking| b.nights)
            .with_searchable(false),
    ];

    let mut table = TableView::new(
        bookings,
        columns,
        TableOptions::new()
            .with_row_height(36)
            .with_container_height(360),
    )
    .expect("row height is non-zero");

    table.on_scroll(90_000);
    println!(
        "rows={} window={:?} offset_y={}",
        table.len(),
        table.window().range(),
        table.offset_y()
    );

    // Keystrokes arrive faster than the debounce delay; only the last one is applied.
    for (now, text) in [(0, "n"), (90, "na"), (180, "nak")] {
        table.on_search_input(text, now);
    }
    assert_eq!(table.phase(), SearchPhase::PendingSearch);
    table.tick(400);
    println!("still pending at 400ms: {}", table.phase() == SearchPhase::PendingSearch);
    table.tick(480);

    table.sort_by("room", SortDirection::Descending);
    println!(
        "after search: rows={} scroll_top={} spacer={}",
        table.len(),
        table.scroll_top(),
        table.spacer_height()
    );
    for cells in table.visible_cells() {
        println!("  {}", cells.join(" | "));
    }

    table.dispose();
}
