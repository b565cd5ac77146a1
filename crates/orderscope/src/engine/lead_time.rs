//! Monthly mean lead time per fulfilment stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{OrderRecord, fractional_days};

/// Mean stage durations in fractional days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeStages {
    /// Purchase to payment approval.
    pub purchase_to_approval: f64,
    /// Approval to carrier handoff.
    pub approval_to_carrier: f64,
    /// Carrier handoff to customer delivery.
    pub carrier_to_delivery: f64,
}

impl LeadTimeStages {
    /// Sum of the three stages.
    pub fn total(&self) -> f64 {
        self.purchase_to_approval + self.approval_to_carrier + self.carrier_to_delivery
    }
}

/// Stage means for one purchase month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLeadTime {
    /// Purchase month as `YYYY-MM`.
    pub month: String,
    /// Orders that contributed to the means.
    pub orders: usize,
    pub stages: LeadTimeStages,
}

#[derive(Default)]
struct StageSums {
    count: usize,
    purchase_to_approval: f64,
    approval_to_carrier: f64,
    carrier_to_delivery: f64,
}

/// Group orders by purchase month and average the three stage durations.
///
/// Orders missing any of the four timestamps are left out of this
/// aggregate. Months come back in ascending order; no complete orders
/// gives an empty vector.
pub fn monthly_lead_times<'a, I>(orders: I) -> Vec<MonthlyLeadTime>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut months: BTreeMap<String, StageSums> = BTreeMap::new();

    for order in orders {
        let (Some(purchase), Some(approved), Some(carrier), Some(delivered)) = (
            order.purchase_timestamp,
            order.approved_timestamp,
            order.carrier_timestamp,
            order.delivered_timestamp,
        ) else {
            continue;
        };

        let sums = months
            .entry(purchase.format("%Y-%m").to_string())
            .or_default();
        sums.count += 1;
        sums.purchase_to_approval += fractional_days(approved - purchase);
        sums.approval_to_carrier += fractional_days(carrier - approved);
        sums.carrier_to_delivery += fractional_days(delivered - carrier);
    }

    months
        .into_iter()
        .map(|(month, sums)| {
            let n = sums.count as f64;
            MonthlyLeadTime {
                month,
                orders: sums.count,
                stages: LeadTimeStages {
                    purchase_to_approval: sums.purchase_to_approval / n,
                    approval_to_carrier: sums.approval_to_carrier / n,
                    carrier_to_delivery: sums.carrier_to_delivery / n,
                },
            }
        })
        .collect()
}
