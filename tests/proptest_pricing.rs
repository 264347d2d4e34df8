//! Property-based tests for pricing and availability filtering.
//!
//! These tests use proptest to verify that pricing and filter properties
//! hold for randomly generated inputs, catching edge cases that
//! example-based tests might miss.
//!
//! # Properties Tested
//!
//! 1. **Pricing Totals**: costs are positive, monotone in duration, and
//!    billed in whole periods for day/month rates
//! 2. **Filter Soundness**: every returned spot satisfies the filter
//! 3. **Filter Stability**: filtering is deterministic, order-preserving,
//!    and idempotent

use chrono::Duration;
use park_kit::pricing::round_to_cents;
use park_kit::{
    booking_cost, filter_spots, ParkingSpot, ParkingType, PriceType, SpotFilters, SpotStatus,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_price() -> impl Strategy<Value = f64> {
    // Cents-aligned prices, the shape real listings carry.
    (1u32..100_000).prop_map(|cents| cents as f64 / 100.0)
}

fn arb_price_type() -> impl Strategy<Value = PriceType> {
    prop_oneof![
        Just(PriceType::Hour),
        Just(PriceType::Day),
        Just(PriceType::Month),
    ]
}

/// Generate a plausible listing with bounded text fields
fn arb_spot() -> impl Strategy<Value = ParkingSpot> {
    (
        "[a-z0-9]{1,12}",
        "[A-Za-z ]{1,30}",
        "[A-Za-z0-9 ]{1,40}",
        arb_price(),
        arb_price_type(),
        1u32..100,
        prop::collection::vec("[A-Za-z ]{1,20}", 0..5),
    )
        .prop_map(
            |(id, name, address, price, price_type, total_slots, amenities)| ParkingSpot {
                id,
                owner_id: "owner".to_string(),
                name,
                address,
                description: String::new(),
                price,
                price_type,
                total_slots,
                available_slots: total_slots,
                status: SpotStatus::Active,
                amenities,
                opening_hours: "24/7".to_string(),
                phone: None,
                rating: 0.0,
                review_count: 0,
                version: 0,
            },
        )
}

/// A batch of listings with ids made unique by position
fn arb_spots(max: usize) -> impl Strategy<Value = Vec<ParkingSpot>> {
    prop::collection::vec(arb_spot(), 0..max).prop_map(|mut spots| {
        for (i, spot) in spots.iter_mut().enumerate() {
            spot.id = format!("spot_{}", i);
        }
        spots
    })
}

fn arb_filters() -> impl Strategy<Value = SpotFilters> {
    (
        1u32..200_000,
        prop_oneof![
            Just(ParkingType::All),
            Just(ParkingType::Covered),
            Just(ParkingType::Valet),
            Just(ParkingType::Security),
        ],
        prop::collection::vec("[A-Za-z ]{1,20}", 0..3),
    )
        .prop_map(|(cents, parking_type, amenities)| SpotFilters {
            max_price: cents as f64 / 100.0,
            parking_type,
            amenities,
        })
}

// ============================================================================
// Property 1: Pricing Totals
// ============================================================================

proptest! {
    /// Property: Any positive duration yields a positive cost
    #[test]
    fn prop_cost_is_positive(
        price in arb_price(),
        price_type in arb_price_type(),
        minutes in 1i64..1_000_000,
    ) {
        let cost = booking_cost(price, price_type, Duration::minutes(minutes))
            .expect("Positive durations should always price");
        prop_assert!(cost > 0.0, "Cost should be positive, got {}", cost);
    }

    /// Property: A longer stay never costs less
    #[test]
    fn prop_cost_is_monotone_in_duration(
        price in arb_price(),
        price_type in arb_price_type(),
        minutes in 1i64..500_000,
        extra in 0i64..500_000,
    ) {
        let shorter = booking_cost(price, price_type, Duration::minutes(minutes))
            .expect("Pricing should succeed");
        let longer = booking_cost(price, price_type, Duration::minutes(minutes + extra))
            .expect("Pricing should succeed");
        prop_assert!(
            longer >= shorter,
            "{} minutes cost {} but {} minutes cost {}",
            minutes + extra, longer, minutes, shorter
        );
    }

    /// Property: Day and month rates bill whole periods
    ///
    /// Partial days (months) round up, so the total is always an integer
    /// multiple of the listed rate.
    #[test]
    fn prop_period_rates_bill_whole_periods(
        price in arb_price(),
        minutes in 1i64..1_000_000,
        monthly in any::<bool>(),
    ) {
        let price_type = if monthly { PriceType::Month } else { PriceType::Day };
        let cost = booking_cost(price, price_type, Duration::minutes(minutes))
            .expect("Pricing should succeed");

        let periods = (cost / price).round();
        prop_assert!(periods >= 1.0);
        prop_assert!(
            (cost - periods * price).abs() < 0.005,
            "Cost {} is not a whole multiple of rate {}",
            cost, price
        );
    }

    /// Property: Hourly totals are exactly the cents-rounded pro-rated
    /// amount
    #[test]
    fn prop_hourly_rate_is_linear(
        price in arb_price(),
        minutes in 1i64..500_000,
    ) {
        let cost = booking_cost(price, PriceType::Hour, Duration::minutes(minutes))
            .expect("Pricing should succeed");
        let expected = round_to_cents((minutes as f64 / 60.0) * price);
        prop_assert_eq!(
            cost, expected,
            "Hourly cost {} is not the rounded pro-rated amount {}",
            cost, expected
        );
    }

    /// Property: Zero and negative durations are always rejected
    #[test]
    fn prop_non_positive_durations_rejected(
        price in arb_price(),
        price_type in arb_price_type(),
        minutes in -1_000_000i64..=0,
    ) {
        let result = booking_cost(price, price_type, Duration::minutes(minutes));
        prop_assert!(result.is_err(), "Duration of {} minutes should be rejected", minutes);
    }
}

// ============================================================================
// Property 2: Filter Soundness
// ============================================================================

proptest! {
    /// Property: Every returned spot satisfies every active criterion
    #[test]
    fn prop_filter_results_satisfy_filters(
        spots in arb_spots(20),
        query in "[a-z ]{0,8}",
        filters in arb_filters(),
    ) {
        let results = filter_spots(&spots, &query, &filters);

        for spot in &results {
            prop_assert!(spot.price <= filters.max_price);

            let q = query.trim().to_lowercase();
            if !q.is_empty() {
                prop_assert!(
                    spot.name.to_lowercase().contains(&q)
                        || spot.address.to_lowercase().contains(&q),
                    "Spot '{}' at '{}' does not match query '{}'",
                    spot.name, spot.address, q
                );
            }

            for wanted in &filters.amenities {
                prop_assert!(
                    spot.has_amenity_like(wanted),
                    "Spot '{}' is missing amenity '{}'",
                    spot.name, wanted
                );
            }
        }
    }

    /// Property: Results are always drawn from the input
    #[test]
    fn prop_filter_returns_subset(
        spots in arb_spots(20),
        query in "[a-z ]{0,8}",
        filters in arb_filters(),
    ) {
        let results = filter_spots(&spots, &query, &filters);
        prop_assert!(results.len() <= spots.len());
        for spot in &results {
            prop_assert!(spots.iter().any(|s| s.id == spot.id));
        }
    }

    /// Property: A wide-open filter keeps everything
    #[test]
    fn prop_open_filter_keeps_everything(
        spots in arb_spots(20),
    ) {
        let open = SpotFilters {
            max_price: f64::MAX,
            parking_type: ParkingType::All,
            amenities: vec![],
        };
        let results = filter_spots(&spots, "", &open);
        prop_assert_eq!(results.len(), spots.len());
    }
}

// ============================================================================
// Property 3: Filter Stability
// ============================================================================

proptest! {
    /// Property: Filtering twice with the same inputs gives the same output
    #[test]
    fn prop_filter_is_deterministic(
        spots in arb_spots(20),
        query in "[a-z ]{0,8}",
        filters in arb_filters(),
    ) {
        let first = filter_spots(&spots, &query, &filters);
        let second = filter_spots(&spots, &query, &filters);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(&a.id, &b.id);
        }
    }

    /// Property: Results preserve the input ordering
    #[test]
    fn prop_filter_preserves_order(
        spots in arb_spots(20),
        query in "[a-z ]{0,8}",
        filters in arb_filters(),
    ) {
        let results = filter_spots(&spots, &query, &filters);
        let positions: Vec<usize> = results
            .iter()
            .map(|spot| spots.iter().position(|s| s.id == spot.id).unwrap())
            .collect();
        prop_assert!(
            positions.windows(2).all(|w| w[0] <= w[1]),
            "Filter reordered its input: {:?}",
            positions
        );
    }

    /// Property: Filtering its own output changes nothing
    #[test]
    fn prop_filter_is_idempotent(
        spots in arb_spots(20),
        query in "[a-z ]{0,8}",
        filters in arb_filters(),
    ) {
        let once = filter_spots(&spots, &query, &filters);
        let twice = filter_spots(&once, &query, &filters);
        prop_assert_eq!(once.len(), twice.len());
    }
}
