//! Route ranking for planning results.

use std::cmp::Ordering;

use super::search::RouteResult;

/// Order two routes by preference: fewer transfers first, then shorter
/// total distance.
pub fn compare_routes(a: &RouteResult, b: &RouteResult) -> Ordering {
    a.total_transfers
        .cmp(&b.total_transfers)
        .then_with(|| a.total_distance.total_cmp(&b.total_distance))
}

/// Rank routes best-first.
///
/// The sort is stable, so equally ranked routes keep the order in which
/// their candidate pairs were searched.
pub fn rank_routes(mut routes: Vec<RouteResult>) -> Vec<RouteResult> {
    routes.sort_by(compare_routes);
    routes
}


#[cfg(test)]
mod tests {
    use super::fixtures::route;
    use super::*;

    fn keys(routes: &[RouteResult]) -> Vec<(usize, f64)> {
        routes
            .iter()
            .map(|r| (r.total_transfers, r.total_distance))
            .collect()
    }

    #[test]
    fn fewer_transfers_beat_shorter_distance() {
        let ranked = rank_routes(vec![
            route("A", 1, 2.0),
            route("B", 0, 9.5),
            route("C", 2, 0.5),
        ]);
        assert_eq!(keys(&ranked), [(0, 9.5), (1, 2.0), (2, 0.5)]);
    }

    #[test]
    fn distance_breaks_transfer_ties() {
        let ranked = rank_routes(vec![route("A", 1, 3.25), route("B", 1, 1.75)]);
        assert_eq!(keys(&ranked), [(1, 1.75), (1, 3.25)]);
    }

    #[test]
    fn equal_routes_keep_search_order() {
        let ranked = rank_routes(vec![
            route("A", 0, 1.0),
            route("B", 0, 1.0),
            route("C", 0, 1.0),
        ]);
        let origins: Vec<&str> = ranked.iter().map(|r| r.origin.id.as_str()).collect();
        assert_eq!(origins, ["A", "B", "C"]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_routes(Vec::new()).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::fixtures::route;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ranked_routes_are_in_preference_order(
            metrics in prop::collection::vec((0usize..4, 0.0f64..50.0), 0..20)
        ) {
            let routes = metrics
                .iter()
                .enumerate()
                .map(|(i, &(t, d))| route(&format!("S{i}"), t, d))
                .collect();
            let ranked = rank_routes(routes);

            prop_assert_eq!(ranked.len(), metrics.len());
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.total_transfers < b.total_transfers
                        || (a.total_transfers == b.total_transfers
                            && a.total_distance <= b.total_distance)
                );
            }
        }
    }
}
