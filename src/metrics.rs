use serde::Serialize;

use crate::summary::GroupStats;
use crate::types::GroupKey;

/// How evenly total sales spread across groups.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SalesConcentration {
    pub total: f64,
    pub groups: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub max_share: f64,
    pub min_share: f64,
    pub ratio: f64,
    pub per_group: Vec<GroupShare>,
}

/// One group's share of total sales.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupShare {
    pub key: GroupKey,
    pub sales: f64,
    pub share: f64,
}

/// Compute concentration metrics from grouped sales sums.
/// Shares are ordered by sales descending, then key.
pub fn sales_concentration(groups: &[GroupStats]) -> Option<SalesConcentration> {
    let min = groups.iter().map(|group| group.sum).min_by(f64::total_cmp)?;
    let max = groups.iter().map(|group| group.sum).max_by(f64::total_cmp)?;
    let total: f64 = groups.iter().map(|group| group.sum).sum();
    let share_of = |value: f64| if total == 0.0 { 0.0 } else { value / total };
    let ratio = if min == 0.0 { f64::INFINITY } else { max / min };
    let mut per_group: Vec<GroupShare> = groups
        .iter()
        .map(|group| GroupShare {
            key: group.key.clone(),
            sales: group.sum,
            share: share_of(group.sum),
        })
        .collect();
    per_group.sort_by(|a, b| b.sales.total_cmp(&a.sales).then_with(|| a.key.cmp(&b.key)));
    Some(SalesConcentration {
        total,
        groups: groups.len(),
        min,
        max,
        mean: total / groups.len() as f64,
        max_share: share_of(max),
        min_share: share_of(min),
        ratio,
        per_group,
    })
}
