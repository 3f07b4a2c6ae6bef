use crate::model::{Database, Item, ProfitTable};
use crate::utility::{item_utility, transaction_utility};
use fnv::FnvHashMap;

/// One occurrence of a candidate item: the transaction id and the item's
/// utility inside that transaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Posting {
    pub tid: usize,
    pub utility: f64,
}

/// Posting lists for the candidate items of one run
///
/// Candidate `k` (its position in the ascending-TWU order) owns the sorted
/// list of transactions containing it, each tagged with the item's utility
/// there. An itemset is covered by the ascending ids of the transactions
/// containing it; extending it intersects that cover with the new item's
/// list, so no transaction is rescanned.
///
/// Utilities are summed per transaction in item order, whatever the
/// extension order was, then across transactions in ascending id order.
/// That is the order the scanning engines use for a sorted itemset, so both
/// produce the same `f64` values.
#[derive(Debug, Clone)]
pub(crate) struct PostingIndex {
    postings: Vec<Vec<Posting>>,
    item_rank: Vec<usize>,
    transaction_utility: Vec<f64>,
    transaction_len: Vec<usize>,
}

impl PostingIndex {
    pub fn build(database: &Database, profits: &ProfitTable, candidates: &[Item]) -> Self {
        let position: FnvHashMap<&Item, usize> = candidates
            .iter()
            .enumerate()
            .map(|(pos, item)| (item, pos))
            .collect();

        let mut by_item: Vec<usize> = (0..candidates.len()).collect();
        by_item.sort_by(|&a, &b| candidates[a].cmp(&candidates[b]));
        let mut item_rank = vec![0; candidates.len()];
        for (rank, &pos) in by_item.iter().enumerate() {
            item_rank[pos] = rank;
        }

        let mut postings = vec![Vec::new(); candidates.len()];
        let mut transaction_utilities = Vec::with_capacity(database.len());
        let mut transaction_len = Vec::with_capacity(database.len());

        for (tid, transaction) in database.iter().enumerate() {
            transaction_utilities.push(transaction_utility(transaction, profits));
            transaction_len.push(transaction.len());

            for item in transaction.items() {
                if let Some(&pos) = position.get(item) {
                    postings[pos].push(Posting {
                        tid,
                        utility: item_utility(item, transaction, profits),
                    });
                }
            }
        }

        Self {
            postings,
            item_rank,
            transaction_utility: transaction_utilities,
            transaction_len,
        }
    }

    /// Transactions containing `{candidate}`
    pub fn cover(&self, candidate: usize) -> Vec<usize> {
        self.postings[candidate].iter().map(|p| p.tid).collect()
    }

    /// Cover of `prefix ∪ {candidate}` given the cover of `prefix`
    pub fn extend(&self, prefix: &[usize], candidate: usize) -> Vec<usize> {
        let other = &self.postings[candidate];
        let mut merged = Vec::with_capacity(prefix.len().min(other.len()));
        let (mut i, mut j) = (0, 0);

        while i < prefix.len() && j < other.len() {
            match prefix[i].cmp(&other[j].tid) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    merged.push(prefix[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        merged
    }

    /// TWU of the itemset owning `cover`
    pub fn twu(&self, cover: &[usize]) -> f64 {
        cover
            .iter()
            .fold(0.0, |acc, &tid| acc + self.transaction_utility[tid])
    }

    /// Exact utility of `itemset` (candidate positions) over its `cover`
    pub fn utility(&self, itemset: &[usize], cover: &[usize]) -> f64 {
        let mut ordered = itemset.to_vec();
        ordered.sort_by_key(|&pos| self.item_rank[pos]);

        // One cursor per item; covers are subsets of every member's list
        let mut cursors = vec![0usize; ordered.len()];
        let mut total = 0.0;

        for &tid in cover {
            let mut in_transaction = 0.0;
            for (cursor, &pos) in cursors.iter_mut().zip(&ordered) {
                let list = &self.postings[pos];
                while list[*cursor].tid < tid {
                    *cursor += 1;
                }
                in_transaction += list[*cursor].utility;
            }
            total += in_transaction;
        }

        total
    }

    /// Average occupancy of an itemset of `itemset_len` items (0.0 when unsupported)
    pub fn occupancy(&self, cover: &[usize], itemset_len: usize) -> f64 {
        if cover.is_empty() {
            return 0.0;
        }

        let sum = cover.iter().fold(0.0, |acc, &tid| {
            acc + itemset_len as f64 / self.transaction_len[tid] as f64
        });
        sum / cover.len() as f64
    }
}
