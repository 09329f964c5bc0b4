//! Order notifications published to the event feed.

use jiff::{Timestamp, Zoned, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::{cart::CartLine, prices::format_price};

/// Title of every order confirmation.
pub const ORDER_PLACED_TITLE: &str = "Đặt hàng thành công";

/// A flat, denormalized feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline.
    pub title: String,

    /// Secondary line, carrying the localized order date.
    pub subtitle: String,

    /// One line per ordered item.
    pub detail: String,

    /// Localized timestamp.
    pub date: String,

    /// Image of the first ordered item, or empty.
    pub image: String,
}

impl Notification {
    /// Confirmation for an order of the given lines placed at `placed_at`.
    #[must_use]
    pub fn order_placed(lines: &[CartLine], placed_at: &Zoned) -> Self {
        Self {
            title: ORDER_PLACED_TITLE.to_string(),
            subtitle: format!("Đặt hàng ngày {}", placed_at.strftime("%-d/%-m/%Y")),
            detail: order_detail(lines),
            date: placed_at.strftime("%H:%M:%S %-d/%-m/%Y").to_string(),
            image: lines
                .first()
                .map(|line| line.image.clone())
                .unwrap_or_default(),
        }
    }
}

/// A notification read back from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNotification {
    /// Document id.
    pub id: String,

    /// When the feed accepted the document.
    pub created_at: Timestamp,

    /// Document body.
    pub notification: Notification,
}

/// Order the feed by arrival, breaking ties on id.
pub fn sort_by_arrival(notifications: &mut [StoredNotification]) {
    notifications.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

/// `"<name> - Số lượng: <qty> - Giá: <price>"`, one line per item.
#[must_use]
pub fn order_detail(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{} - Số lượng: {} - Giá: {}",
                line.name,
                line.quantity.get(),
                format_price(&line.price)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Localize a timestamp into the shop's display zone.
#[must_use]
pub fn localize(at: Timestamp, zone: &TimeZone) -> Zoned {
    at.to_zoned(zone.clone())
}

#[cfg(test)]
mod tests {
    use jiff::tz::Offset;
    use testresult::TestResult;

    use crate::{cart::Quantity, prices::vnd};

    use super::*;

    fn line(name: &str, price: i64, quantity: u32, image: &str) -> CartLine {
        CartLine {
            id: name.into(),
            product_id: name.into(),
            category_id: "c1".into(),
            name: name.to_string(),
            category: "Indoor".to_string(),
            price: vnd(price),
            quantity: Quantity::new(quantity),
            image: image.to_string(),
            checked: true,
        }
    }

    fn hanoi() -> TestResult<TimeZone> {
        Ok(TimeZone::fixed(Offset::from_hours(7)?))
    }

    #[test]
    fn order_placed_notification_fields() -> TestResult {
        let placed_at = localize("2026-03-04T23:30:05Z".parse()?, &hanoi()?);

        let notification = Notification::order_placed(
            &[line("Fern", 120_000, 2, "https://img/fern.png"), line("Cactus", 35_000, 1, "")],
            &placed_at,
        );

        assert_eq!(notification.title, ORDER_PLACED_TITLE);
        assert_eq!(notification.subtitle, "Đặt hàng ngày 5/3/2026");
        assert_eq!(notification.date, "06:30:05 5/3/2026");
        assert_eq!(notification.image, "https://img/fern.png");
        assert_eq!(
            notification.detail,
            "Fern - Số lượng: 2 - Giá: 120.000đ\nCactus - Số lượng: 1 - Giá: 35.000đ"
        );

        Ok(())
    }

    #[test]
    fn no_items_means_no_image() -> TestResult {
        let placed_at = localize(Timestamp::UNIX_EPOCH, &hanoi()?);

        let notification = Notification::order_placed(&[], &placed_at);

        assert!(notification.image.is_empty());
        assert!(notification.detail.is_empty());

        Ok(())
    }

    #[test]
    fn sorts_by_arrival_then_id() -> TestResult {
        let stored = |id: &str, at: &str| -> TestResult<StoredNotification> {
            Ok(StoredNotification {
                id: id.to_string(),
                created_at: at.parse()?,
                notification: Notification::default(),
            })
        };

        let mut feed = vec![
            stored("c", "2026-01-02T00:00:00Z")?,
            stored("b", "2026-01-01T00:00:00Z")?,
            stored("a", "2026-01-02T00:00:00Z")?,
        ];

        sort_by_arrival(&mut feed);

        let ids: Vec<_> = feed.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(ids, ["b", "a", "c"]);

        Ok(())
    }
}
