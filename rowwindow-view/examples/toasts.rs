// Example: a bounded toast queue driven by a fake clock.
use rowwindow_view::{Toast, ToastConfig, ToastKind, ToastQueue};

fn main() {
    let mut toasts = ToastQueue::new(
        ToastConfig::new()
            .with_capacity(3)
            .with_default_duration_ms(2_000),
    );

    toasts.push(ToastKind::Success, "Reservation #4471 confirmed", 0);
    toasts.push(ToastKind::Error, "Card declined for folio 118", 100);
    toasts.push_toast(
        Toast::new(ToastKind::Info, "Night audit in progress")
            .title("Audit")
            .sticky(),
        200,
    );
    let out = toasts.push(ToastKind::Warning, "Room 312 out of order", 300);
    println!("pushed {:?}, evicted {:?}", out.id, out.evicted);

    for now in [1_000, 2_300, 4_100] {
        let expired = toasts.tick(now);
        let showing: Vec<&str> = toasts.iter().map(|t| t.toast.message.as_str()).collect();
        println!("t={now}ms expired={expired:?} showing={showing:?}");
    }

    println!("{:?}", toasts.stats());
}
