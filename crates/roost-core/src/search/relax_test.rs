#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::error::{Result, RoostError};
    use crate::filters::{CanonicalFilters, FilterKey};
    use crate::listing::ListingPage;
    use crate::query::Predicate;
    use crate::search::relax::{ListingOracle, RELAXATION_PRIORITY, plan};

    /// Oracle that replays a fixed sequence of counts.
    struct ScriptedOracle {
        counts: Mutex<VecDeque<u64>>,
        calls: AtomicUsize,
    }

    impl ScriptedOracle {
        fn new(counts: impl IntoIterator<Item = u64>) -> Self {
            Self {
                counts: Mutex::new(counts.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListingOracle for ScriptedOracle {
        async fn count(&self, _predicate: &Predicate) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut counts = self.counts.lock().unwrap();
            // Once the script runs out, keep answering zero.
            Ok(counts.pop_front().unwrap_or(0))
        }

        async fn fetch_page(
            &self,
            _predicate: &Predicate,
            _page: u32,
            _page_size: u32,
        ) -> Result<ListingPage> {
            Ok(ListingPage::empty())
        }
    }

    /// Oracle that actually evaluates predicates over a document set and
    /// records every count it produced.
    struct DocsOracle {
        docs: Vec<Value>,
        observed: Mutex<Vec<u64>>,
    }

    impl DocsOracle {
        fn new(docs: Vec<Value>) -> Self {
            Self {
                docs,
                observed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ListingOracle for DocsOracle {
        async fn count(&self, predicate: &Predicate) -> Result<u64> {
            let count = self.docs.iter().filter(|doc| predicate.matches(doc)).count() as u64;
            self.observed.lock().unwrap().push(count);
            Ok(count)
        }

        async fn fetch_page(
            &self,
            _predicate: &Predicate,
            _page: u32,
            _page_size: u32,
        ) -> Result<ListingPage> {
            Ok(ListingPage::empty())
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl ListingOracle for FailingOracle {
        async fn count(&self, _predicate: &Predicate) -> Result<u64> {
            Err(RoostError::oracle("listing store unavailable"))
        }

        async fn fetch_page(
            &self,
            _predicate: &Predicate,
            _page: u32,
            _page_size: u32,
        ) -> Result<ListingPage> {
            Err(RoostError::oracle("listing store unavailable"))
        }
    }

    #[tokio::test]
    async fn test_perfect_match_short_circuits() {
        let oracle = ScriptedOracle::new([7]);
        let filters = CanonicalFilters {
            city: Some("Lahore".to_string()),
            min_rent: Some(50000.0),
            ..Default::default()
        };

        let result = plan(&filters, &oracle).await.unwrap();

        assert_eq!(result.result_count, 7);
        assert!(result.dropped_keys.is_empty());
        assert_eq!(result.filters_used, filters);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_drops_keys_in_priority_order_and_stops_at_first_hit() {
        // amenities drops first (still zero), then minRent (3 results).
        let oracle = ScriptedOracle::new([0, 0, 3]);
        let filters = CanonicalFilters {
            city: Some("Lahore".to_string()),
            min_rent: Some(50000.0),
            bedrooms: Some(2),
            amenities: Some(vec!["wifi".to_string()]),
            ..Default::default()
        };

        let result = plan(&filters, &oracle).await.unwrap();

        assert_eq!(
            result.dropped_keys,
            vec![FilterKey::Amenities, FilterKey::MinRent]
        );
        assert_eq!(result.result_count, 3);
        // The surviving filters still carry everything that was not dropped.
        assert_eq!(result.filters_used.city.as_deref(), Some("Lahore"));
        assert_eq!(result.filters_used.bedrooms, Some(2));
        assert_eq!(result.filters_used.min_rent, None);
        assert_eq!(result.filters_used.amenities, None);
        assert!(result.message.contains("amenities"));
        assert!(result.message.contains("minRent"));
    }

    #[tokio::test]
    async fn test_city_fallback_discards_address_query() {
        let oracle = ScriptedOracle::new([0, 0, 0, 0, 12]);
        let filters = CanonicalFilters {
            city: Some("Karachi".to_string()),
            address_query: Some("Clifton Block 2".to_string()),
            min_rent: Some(30000.0),
            max_rent: Some(60000.0),
            hostel_type: Some(crate::filters::HostelType::Mixed),
            ..Default::default()
        };

        let result = plan(&filters, &oracle).await.unwrap();

        // 1 full count + minRent + maxRent drops + 1 fallback count = 4... the
        // scripted fifth value is never reached.
        assert_eq!(oracle.calls(), 4);
        assert_eq!(
            result.dropped_keys,
            vec![
                FilterKey::MinRent,
                FilterKey::MaxRent,
                FilterKey::AddressQuery
            ]
        );
        assert_eq!(
            result.filters_used,
            CanonicalFilters {
                city: Some("Karachi".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(result.result_count, 0);
        assert!(result.message.contains("Karachi"));
    }

    #[tokio::test]
    async fn test_address_fallback_when_no_city() {
        let oracle = ScriptedOracle::new([0, 0, 5]);
        let filters = CanonicalFilters {
            address_query: Some("Gulberg".to_string()),
            bedrooms: Some(3),
            ..Default::default()
        };

        let result = plan(&filters, &oracle).await.unwrap();

        assert_eq!(result.dropped_keys, vec![FilterKey::Bedrooms]);
        assert_eq!(
            result.filters_used,
            CanonicalFilters {
                address_query: Some("Gulberg".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(result.result_count, 5);
    }

    #[tokio::test]
    async fn test_open_fallback_zero_count_is_terminal_not_error() {
        let oracle = ScriptedOracle::new([]);
        let filters = CanonicalFilters {
            bedrooms: Some(4),
            ..Default::default()
        };

        let result = plan(&filters, &oracle).await.unwrap();

        assert_eq!(result.dropped_keys, vec![FilterKey::Bedrooms]);
        assert!(result.filters_used.is_empty());
        assert_eq!(result.result_count, 0);
    }

    #[tokio::test]
    async fn test_call_count_is_bounded() {
        // Worst case: every priority key present, oracle never finds anything.
        let filters = CanonicalFilters {
            city: Some("Multan".to_string()),
            address_query: Some("cantt".to_string()),
            min_rent: Some(1.0),
            max_rent: Some(2.0),
            bedrooms: Some(1),
            bathrooms: Some(1),
            beds: Some(1),
            persons: Some(1),
            floor_level: Some(0),
            host_option: Some(crate::filters::HostOption::Home),
            state_territory: Some("Punjab".to_string()),
            min_security: Some(1.0),
            max_security: Some(2.0),
            highlighted: Some(true),
            amenities: Some(vec!["wifi".to_string()]),
            bills: Some(vec!["gas".to_string()]),
            safety: Some(vec!["guard".to_string()]),
            meal_plan: Some(vec!["breakfast".to_string()]),
            rules: Some(vec!["no pets".to_string()]),
            ..Default::default()
        };

        let oracle = ScriptedOracle::new([]);
        let result = plan(&filters, &oracle).await.unwrap();

        // Initial count, one per priority key, one fallback count.
        assert_eq!(oracle.calls(), 1 + RELAXATION_PRIORITY.len() + 1);
        assert_eq!(result.dropped_keys.len(), RELAXATION_PRIORITY.len() + 1);
        assert_eq!(
            result.dropped_keys.last().copied(),
            Some(FilterKey::AddressQuery)
        );
    }

    #[tokio::test]
    async fn test_counts_are_monotonically_non_decreasing() {
        let docs = vec![
            json!({"title": "Studio", "location": "", "street": "", "city": "Lahore",
                   "stateTerritory": "Punjab", "rent": 20000, "securityDeposit": 40000,
                   "bedrooms": 1, "bathrooms": 1, "beds": 1, "persons": 1, "floorLevel": 0,
                   "hostOption": "apartment", "amenities": [], "bills": [], "mealPlan": [],
                   "rules": [], "safety": [], "highlighted": false, "status": "active"}),
            json!({"title": "Family home", "location": "", "street": "", "city": "Lahore",
                   "stateTerritory": "Punjab", "rent": 80000, "securityDeposit": 160000,
                   "bedrooms": 4, "bathrooms": 3, "beds": 4, "persons": 6, "floorLevel": 0,
                   "hostOption": "home", "amenities": ["wifi"], "bills": [], "mealPlan": [],
                   "rules": [], "safety": [], "highlighted": false, "status": "active"}),
            json!({"title": "Hostel bed", "location": "", "street": "", "city": "Karachi",
                   "stateTerritory": "Sindh", "rent": 9000, "securityDeposit": 9000,
                   "bedrooms": 1, "bathrooms": 1, "beds": 6, "persons": 6, "floorLevel": 2,
                   "hostOption": "hostel", "amenities": [], "bills": [], "mealPlan": [],
                   "rules": [], "safety": [], "highlighted": false, "status": "active"}),
        ];
        let oracle = DocsOracle::new(docs);

        // Impossible combination that forces a long relaxation run.
        let filters = CanonicalFilters {
            city: Some("Lahore".to_string()),
            min_rent: Some(100000.0),
            bedrooms: Some(9),
            amenities: Some(vec!["pool".to_string()]),
            highlighted: Some(true),
            ..Default::default()
        };

        plan(&filters, &oracle).await.unwrap();

        let observed = oracle.observed.lock().unwrap().clone();
        assert!(observed.len() >= 2);
        assert!(
            observed.windows(2).all(|pair| pair[0] <= pair[1]),
            "counts must not shrink as filters are dropped: {observed:?}"
        );
    }

    #[tokio::test]
    async fn test_oracle_failure_aborts_the_plan() {
        let filters = CanonicalFilters {
            city: Some("Lahore".to_string()),
            ..Default::default()
        };

        let err = plan(&filters, &FailingOracle).await.unwrap_err();
        assert!(err.is_oracle());
    }
}
