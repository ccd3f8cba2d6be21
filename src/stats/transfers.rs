use std::collections::HashMap;

use itertools::Itertools;

use crate::model::{
    Bootstrap, GameweekSnapshot, SeasonHistoryEntry, TransferIn, TransferRecord, TransferSummary,
};

/// Points deducted per transfer beyond the free allowance.
pub const HIT_COST: u32 = 4;

/// A transfer with the point cost it incurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedTransfer {
    pub record: TransferRecord,
    pub point_cost: u32,
}

/// Attribute each gameweek's `event_transfers_cost` to its transfers. The
/// free ones come first; the last `cost / 4` transfers of the gameweek (by
/// time) are the hits.
pub fn price_transfers(
    transfers: &[TransferRecord],
    history: &[SeasonHistoryEntry],
) -> Vec<PricedTransfer> {
    let hits_by_gameweek: HashMap<u32, usize> = history
        .iter()
        .map(|entry| (entry.gameweek, (entry.event_transfers_cost / HIT_COST) as usize))
        .collect();

    let priced = transfers
        .iter()
        .sorted_by(|a, b| {
            a.gameweek
                .cmp(&b.gameweek)
                .then_with(|| match (a.time, b.time) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
        })
        .chunk_by(|t| t.gameweek)
        .into_iter()
        .flat_map(|(gameweek, group)| {
            let group: Vec<&TransferRecord> = group.collect();
            let hits = hits_by_gameweek.get(&gameweek).copied().unwrap_or(0);
            let free = group.len().saturating_sub(hits);
            group
                .into_iter()
                .enumerate()
                .map(move |(i, record)| PricedTransfer {
                    record: record.clone(),
                    point_cost: if i >= free { HIT_COST } else { 0 },
                })
                .collect::<Vec<_>>()
        })
        .collect();
    priced
}

/// Transfer activity. When the transfers list could not be fetched the
/// counts come from the history and no best transfer is reported.
pub fn transfer_summary(
    transfers: Option<&[TransferRecord]>,
    history: &[SeasonHistoryEntry],
    snapshots: &[GameweekSnapshot],
    bootstrap: &Bootstrap,
) -> TransferSummary {
    let points_spent_on_hits: u32 = history.iter().map(|e| e.event_transfers_cost).sum();
    let total_hits = points_spent_on_hits / HIT_COST;

    let Some(transfers) = transfers else {
        return TransferSummary {
            total_transfers: history.iter().map(|e| e.event_transfers).sum(),
            total_hits,
            points_spent_on_hits,
            best_transfer_in: None,
            estimated: true,
        };
    };

    let priced = price_transfers(transfers, history);
    TransferSummary {
        total_transfers: transfers.len() as u32,
        total_hits,
        points_spent_on_hits,
        best_transfer_in: best_transfer_in(&priced, snapshots, bootstrap),
        estimated: false,
    }
}

/// The incoming player who scored most in fetched gameweeks strictly after
/// the transfer. Transfers with no later fetched gameweek are not ranked.
fn best_transfer_in(
    priced: &[PricedTransfer],
    snapshots: &[GameweekSnapshot],
    bootstrap: &Bootstrap,
) -> Option<TransferIn> {
    priced
        .iter()
        .filter_map(|transfer| {
            let record = &transfer.record;
            let later: Vec<&GameweekSnapshot> = snapshots
                .iter()
                .filter(|s| s.gameweek > record.gameweek)
                .collect();
            if later.is_empty() {
                return None;
            }
            let points_after: i32 = later.iter().map(|s| s.raw_points(record.element_in)).sum();
            Some((transfer, points_after))
        })
        .max_by(|(a, a_points), (b, b_points)| {
            a_points
                .cmp(b_points)
                .then(b.record.gameweek.cmp(&a.record.gameweek))
                .then(b.record.element_in.cmp(&a.record.element_in))
        })
        .map(|(transfer, points_after)| TransferIn {
            gameweek: transfer.record.gameweek,
            player_in_id: transfer.record.element_in,
            player_in_name: bootstrap.player_name(transfer.record.element_in),
            player_out_id: transfer.record.element_out,
            player_out_name: bootstrap.player_name(transfer.record.element_out),
            point_cost: transfer.point_cost,
            points_after,
        })
}
