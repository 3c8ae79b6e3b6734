use serde::{Deserialize, Serialize};
use swd_reconcile::ReconciliationItem;

use crate::{stripe_stats, StripeStats};

/// The two named sales-channel partitions. Channels outside both sets are
/// excluded from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Online,
    Kiosk,
}

/// Channel-name sets for the online/kiosk partition. Matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSets {
    pub online: Vec<String>,
    pub kiosk: Vec<String>,
}

impl Default for ChannelSets {
    fn default() -> Self {
        Self {
            online: vec![
                "online".to_string(),
                "click-and-collect".to_string(),
                "click_and_collect".to_string(),
            ],
            kiosk: vec!["kiosk".to_string()],
        }
    }
}

impl ChannelSets {
    pub fn classify(&self, sales_channel: &str) -> Option<Channel> {
        let names = |set: &[String]| set.iter().any(|n| n.eq_ignore_ascii_case(sales_channel));
        if names(&self.online) {
            Some(Channel::Online)
        } else if names(&self.kiosk) {
            Some(Channel::Kiosk)
        } else {
            None
        }
    }
}

/// Per-channel sums over the live priced item set, with nested Stripe sums
/// over the same partition. Cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub item_count: usize,
    pub skipass_gross_cents: i64,
    pub lifepass_gross_cents: i64,
    pub insurance_gross_cents: i64,
    pub stripe: StripeStats,
}

/// Reduce the live priced subset belonging to one channel partition.
pub fn channel_stats(
    items: &[ReconciliationItem],
    sets: &ChannelSets,
    channel: Channel,
) -> ChannelStats {
    let partition: Vec<&ReconciliationItem> = items
        .iter()
        .filter(|i| {
            i.is_priced()
                && !i.record.test_order
                && sets.classify(&i.record.sales_channel) == Some(channel)
        })
        .collect();

    let mut out = ChannelStats {
        stripe: stripe_stats(partition.iter().copied()),
        ..ChannelStats::default()
    };
    for item in partition {
        let r = &item.record;
        out.item_count += 1;
        out.skipass_gross_cents += r.skipass_gross_cents;
        out.lifepass_gross_cents += r.lifepass_gross_cents;
        out.insurance_gross_cents += r.insurance_gross_cents;
    }
    out
}
