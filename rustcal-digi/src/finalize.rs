//! End-of-event finalization: re-merge, threshold filter, area filter.

use rustcal_core::{BlockHit, BlockId, CalConstants, FINALIZE_WINDOW_NS};

/// Exhaustive pairwise re-merge and threshold filter for one block.
///
/// The online pass compares each deposit against a single position in
/// the ordered scan, so hits from one track segment split up by
/// interactions inside the block can survive it as near duplicates.
/// Here every later hit within [`FINALIZE_WINDOW_NS`] of hit `i` is
/// folded into it (energy sums, time takes the minimum); the inner scan
/// restarts at the same index after each removal so chained merges are
/// caught. Once hit `i` has absorbed everything it can, it is dropped if
/// its energy is below the readout threshold. A hit exactly at threshold
/// survives.
///
/// Running this twice is a no-op the second time.
pub fn merge_and_filter(hits: &mut Vec<BlockHit>, thresh_mev: f64) {
    let mut i = 0;
    while i < hits.len() {
        let mut j = i + 1;
        while j < hits.len() {
            if (hits[i].t_ns - hits[j].t_ns).abs() < FINALIZE_WINDOW_NS {
                hits[i].e_mev += hits[j].e_mev;
                if hits[i].t_ns > hits[j].t_ns {
                    hits[i].t_ns = hits[j].t_ns;
                }
                hits.remove(j);
            } else {
                j += 1;
            }
        }
        if hits[i].e_mev < thresh_mev {
            hits.remove(i);
        } else {
            i += 1;
        }
    }
}

/// True when the block's physical center lies inside the active radius.
///
/// Blocks outside are legitimate dead border material (and the landing
/// spot of unresolved-geometry sentinels); dropping them is silent.
#[must_use]
pub fn in_active_area(constants: &CalConstants, id: BlockId) -> bool {
    let (x0, y0) = id.center_cm(
        constants.central_column,
        constants.central_row,
        constants.block_width_cm,
    );
    x0.hypot(y0) < constants.active_radius_cm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hit(e_mev: f64, t_ns: f64) -> BlockHit {
        BlockHit::new(e_mev, t_ns)
    }

    #[test]
    fn test_near_duplicates_merge() {
        let mut hits = vec![hit(6.0, 50.0), hit(6.0, 50.4), hit(6.0, 120.0)];
        merge_and_filter(&mut hits, 5.0);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].e_mev, 12.0, epsilon = 1e-12);
        assert_relative_eq!(hits[0].t_ns, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_chained_merges_restart_inner_scan() {
        // After 50.5 is folded into 50.0 and removed, the inner scan
        // resumes at the same index and finds 50.9, which is also inside
        // the window of hit 0.
        let mut hits = vec![hit(4.0, 50.0), hit(1.0, 50.5), hit(1.0, 50.9)];
        merge_and_filter(&mut hits, 5.0);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].e_mev, 6.0, epsilon = 1e-12);
        assert_relative_eq!(hits[0].t_ns, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly at threshold survives; just below does not.
        let mut hits = vec![hit(5.0, 50.0), hit(4.999, 200.0)];
        merge_and_filter(&mut hits, 5.0);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].t_ns, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let mut hits = vec![
            hit(3.0, 50.0),
            hit(3.0, 50.5),
            hit(7.0, 80.0),
            hit(2.0, 300.0),
        ];
        merge_and_filter(&mut hits, 5.0);
        let once = hits.clone();
        merge_and_filter(&mut hits, 5.0);
        assert_eq!(hits, once);
    }

    #[test]
    fn test_empty_and_single() {
        let mut hits: Vec<BlockHit> = Vec::new();
        merge_and_filter(&mut hits, 5.0);
        assert!(hits.is_empty());

        let mut hits = vec![hit(9.0, 10.0)];
        merge_and_filter(&mut hits, 5.0);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_active_area() {
        let constants = CalConstants::default();
        // Central block is inside.
        assert!(in_active_area(&constants, BlockId::new(29, 29)));
        // 30 blocks out along one axis: 120 cm = the radius, excluded.
        assert!(!in_active_area(&constants, BlockId::new(59, 29)));
        // Unresolved sentinel block lands well outside.
        assert!(!in_active_area(&constants, BlockId::new(-1, -1)));
    }
}
