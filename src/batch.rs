use crate::delay;
use log::{info, warn};

/// Partitions `items` into contiguous, order-preserving batches. The final
/// batch may be smaller; a size of zero is treated as one.
pub fn split_batches<T>(items: &[T], batch_size: usize) -> Vec<&[T]> {
    items.chunks(batch_size.max(1)).collect()
}

/// Runs `extract` over every item, batch by batch, with the randomized batch
/// pause before each batch. `None` results are skipped; everything else is
/// accumulated in input order.
pub fn run_batches<T, R>(
    items: &[T],
    batch_size: usize,
    mut extract: impl FnMut(&T) -> Option<R>,
) -> Vec<R> {
    if batch_size > items.len() {
        warn!(
            "Batch size {} is greater than the number of items {}; running as a single batch.",
            batch_size,
            items.len()
        );
    }

    let batches = split_batches(items, batch_size);
    info!(
        "Splitting {} items into {} batches for detail extraction.",
        items.len(),
        batches.len()
    );

    let mut results = Vec::with_capacity(items.len());
    for (batch_num, batch) in batches.iter().enumerate() {
        delay::random_batch_delay();
        info!("(Batch {}) Fetching full job details...", batch_num + 1);

        for item in *batch {
            if let Some(result) = extract(item) {
                results.push(result);
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_into_ceil_n_over_b_batches() {
        for (n, b) in [(10usize, 3usize), (9, 3), (1, 5), (7, 1), (50, 50)] {
            let items: Vec<usize> = (0..n).collect();
            let batches = split_batches(&items, b);

            assert_eq!(batches.len(), n.div_ceil(b), "n={} b={}", n, b);
            for batch in &batches[..batches.len() - 1] {
                assert_eq!(batch.len(), b);
            }
            assert!(batches.last().unwrap().len() <= b);

            let rejoined: Vec<usize> = batches.concat();
            assert_eq!(rejoined, items);
        }
    }

    #[test]
    fn oversized_batch_size_yields_one_batch() {
        let items = [1, 2, 3];
        let batches = split_batches(&items, 10);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], &items);
    }

    #[test]
    fn failed_items_are_skipped_and_order_preserved() {
        let refs = ["page-1", "page-2", "page-3"];
        // page-2 times out.
        let results = run_batches(&refs, 2, |r| {
            if *r == "page-2" {
                None
            } else {
                Some(r.to_uppercase())
            }
        });
        assert_eq!(results, vec!["PAGE-1", "PAGE-3"]);
    }

    #[test]
    fn empty_input_yields_no_results() {
        let refs: [&str; 0] = [];
        let results = run_batches(&refs, 5, |r| Some(r.to_string()));
        assert!(results.is_empty());
    }
}
