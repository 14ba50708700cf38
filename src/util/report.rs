use crate::models::disk::DiskUsageRecord;
use crate::ui::palette::{hex_color, Palette};
use crossterm::style::Stylize;
use serde_json::{json, Value};

/// `[ { .. }, { .. } ]`, or `[]` for an empty model.
pub fn fmt_model(records: &[DiskUsageRecord]) -> String {
    if records.is_empty() { return "[]".into(); }
    let items: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    format!("[ {} ]", items.join(", "))
}

/// Final block printed after a scan: the model, one swatch row per disk, and
/// the count.
pub fn summary(records: &[DiskUsageRecord], color: bool) -> String {
    let mut out = String::new();

    out.push_str("\n=== Final Result ===\n");
    out.push_str(&format!("Disk model: {}\n", fmt_model(records)));
    for r in records {
        let swatch = match hex_color(&r.color) {
            Some(c) if color => "██".with(c).to_string(),
            _                => "██".to_string(),
        };
        out.push_str(&format!(
            "  {} {:<20} {:>6}  {}\n",
            swatch, r.mount_point, format!("{}%", r.usage), r.color
        ));
    }
    out.push_str(&format!("Count: {}\n", records.len()));
    out
}

/// One-shot machine-readable snapshot of the disk model.
pub fn snapshot(records: &[DiskUsageRecord], palette: &Palette) -> Value {
    json!({
        "diskmodel_version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Local::now().to_rfc3339(),
        "palette":   palette.variant.name(),
        "count":     records.len(),
        "disks":     records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::disk::Usage;

    fn model() -> Vec<DiskUsageRecord> {
        vec![
            DiskUsageRecord { mount_point: "/".into(),     usage: Usage::Value(7), color: "#cba6f7".into() },
            DiskUsageRecord { mount_point: "/boot".into(), usage: Usage::Value(6), color: "#fab387".into() },
        ]
    }

    #[test]
    fn model_formatting() {
        assert_eq!(fmt_model(&[]), "[]");
        assert_eq!(
            fmt_model(&model()),
            "[ { mountPoint: '/', usage: 7, color: '#cba6f7' }, { mountPoint: '/boot', usage: 6, color: '#fab387' } ]"
        );
    }

    #[test]
    fn plain_summary_has_no_escape_codes() {
        let s = summary(&model(), false);
        assert!(s.starts_with("\n=== Final Result ===\nDisk model: [ "));
        assert!(s.ends_with("Count: 2\n"));
        assert!(!s.contains('\u{1b}'));
        assert!(s.contains("/boot"));
        assert!(s.contains("6%"));
    }

    #[test]
    fn coloured_summary_uses_true_colour() {
        // crossterm itself honours NO_COLOR
        if std::env::var_os("NO_COLOR").is_some() { return; }
        let s = summary(&model(), true);
        // 0xcb,0xa6,0xf7 as an SGR truecolour foreground
        assert!(s.contains("38;2;203;166;247"));
    }

    #[test]
    fn empty_summary_counts_zero() {
        let s = summary(&[], true);
        assert!(s.contains("Disk model: []\n"));
        assert!(s.ends_with("Count: 0\n"));
    }

    #[test]
    fn snapshot_shape() {
        let mut m = model();
        m[1].usage = Usage::NaN;
        let v = snapshot(&m, &Palette::default());
        assert_eq!(v["palette"], "mocha");
        assert_eq!(v["count"], 2);
        assert_eq!(v["disks"][0]["mountPoint"], "/");
        assert_eq!(v["disks"][0]["usage"], 7);
        assert!(v["disks"][1]["usage"].is_null());
        assert!(v["timestamp"].is_string());
    }
}
