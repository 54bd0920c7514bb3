#[cfg(test)]
mod normalize {
    use rental_eda::{
        analysis::normalize::{normalize_listing, normalize_listings, normalize_review, parse_price},
        models::{RawListing, RawReview},
        EdaError,
    };

    fn raw_listing(id: &str, price: &str) -> RawListing {
        RawListing {
            id: id.to_string(),
            host_id: "18446744073709551617".to_string(),
            neighbourhood_cleansed: "De Pijp".to_string(),
            neighbourhood_group_cleansed: None,
            property_type: Some("Entire rental unit".to_string()),
            price: price.to_string(),
            accommodates: "4".to_string(),
            number_of_reviews: "12".to_string(),
        }
    }

    #[test]
    fn price_with_symbol_and_separator() {
        assert_eq!(parse_price("1", "$1,234").unwrap(), 1234.0);
    }

    #[test]
    fn price_zero() {
        assert_eq!(parse_price("1", "$0").unwrap(), 0.0);
    }

    #[test]
    fn price_with_cents() {
        assert_eq!(parse_price("1", "$12,500.50").unwrap(), 12500.5);
    }

    #[test]
    fn price_not_a_number() {
        match parse_price("7", "abc") {
            Err(EdaError::MalformedPrice { listing_id, raw }) => {
                assert_eq!(listing_id, "7");
                assert_eq!(raw, "abc");
            }
            other => panic!("expected MalformedPrice, got {:?}", other),
        }
    }

    #[test]
    fn price_rejects_float_keywords_and_signs() {
        for raw in ["NaN", "inf", "-$5", "", "$", "1.2.3"] {
            assert!(
                matches!(parse_price("1", raw), Err(EdaError::MalformedPrice { .. })),
                "'{}' should be rejected",
                raw
            );
        }
    }

    #[test]
    fn listing_takes_cleansed_location_and_keeps_ids_as_text() {
        let listing = normalize_listing(&raw_listing("000123", "$150.00")).unwrap();
        assert_eq!(listing.id, "000123");
        assert_eq!(listing.host_id, "18446744073709551617");
        assert_eq!(listing.neighbourhood, "De Pijp");
        assert_eq!(listing.neighbourhood_group, "");
        assert_eq!(listing.price, 150.0);
        assert_eq!(listing.accommodates, 4);
        assert_eq!(listing.number_of_reviews, 12);
    }

    #[test]
    fn bad_price_is_not_zeroed() {
        let rows = vec![raw_listing("1", "$10"), raw_listing("2", "ten dollars")];
        let err = normalize_listings(&rows).unwrap_err();
        assert!(err.is_data_quality());
        assert!(matches!(err, EdaError::MalformedPrice { ref listing_id, .. } if listing_id == "2"));
    }

    #[test]
    fn bad_review_count() {
        let mut raw = raw_listing("9", "$10");
        raw.number_of_reviews = "many".to_string();
        match normalize_listing(&raw) {
            Err(EdaError::MalformedCount { field, .. }) => assert_eq!(field, "number_of_reviews"),
            other => panic!("expected MalformedCount, got {:?}", other),
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut raw = raw_listing("11", "$80");
        raw.accommodates = "0".to_string();
        match normalize_listing(&raw) {
            Err(EdaError::MalformedCount { field, raw, .. }) => {
                assert_eq!(field, "accommodates");
                assert_eq!(raw, "0");
            }
            other => panic!("expected MalformedCount, got {:?}", other),
        }

        raw.accommodates = "1".to_string();
        assert_eq!(normalize_listing(&raw).unwrap().accommodates, 1);
    }

    #[test]
    fn review_date_and_missing_comment() {
        let raw = RawReview {
            id: "r1".to_string(),
            listing_id: "000123".to_string(),
            reviewer_id: "42".to_string(),
            date: "2019-03-24".to_string(),
            comments: None,
        };
        let review = normalize_review(&raw).unwrap();
        assert_eq!(review.date.to_string(), "2019-03-24");
        assert_eq!(review.listing_id, "000123");
        assert_eq!(review.comments, None);
    }

    #[test]
    fn review_date_malformed() {
        let raw = RawReview {
            id: "r1".to_string(),
            listing_id: "1".to_string(),
            reviewer_id: "42".to_string(),
            date: "24/03/2019".to_string(),
            comments: Some("Great".to_string()),
        };
        assert!(matches!(
            normalize_review(&raw),
            Err(EdaError::MalformedDate { .. })
        ));
    }
}
