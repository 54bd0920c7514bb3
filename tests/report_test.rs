#[cfg(test)]
mod report {
    use std::fs;
    use std::path::{Path, PathBuf};

    use rental_eda::analysis::{normalize_listings, normalize_reviews};
    use rental_eda::config::{self, parse_config};
    use rental_eda::loaders::{parse_neighbourhoods, read_listings_from, read_reviews_from};
    use rental_eda::report::{build_report, write_report, Dataset};

    const LISTINGS: &str = "\
id,host_id,neighbourhood_cleansed,neighbourhood_group_cleansed,property_type,price,accommodates,number_of_reviews
1,h1,Jordaan,,Entire rental unit,$150.00,2,4
2,h1,Jordaan,,Private room in serviced apartment,$90.00,1,1
3,h2,De Pijp,,Houseboat,\"$1,200.00\",6,0
4,h3,Jordaan,,Private room,$40.00,2,2
5,h1,Oud-West,,Entire home,$210.00,4,3
";

    const REVIEWS: &str = "\
id,listing_id,reviewer_id,date,comments
r1,1,alice,2021-05-01,Great place
r2,2,bob,2021-05-03,
r3,1,alice,2021-07-11,Again lovely
r4,4,alice,2021-07-20,ok
r5,999,carol,2021-08-01,Listing no longer online
r6,5,bob,2022-01-09,Nice
";

    const NEIGHBOURHOODS: &str = r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"neighbourhood": "Jordaan", "neighbourhood_group": "Centrum"},
   "geometry": {"type": "Polygon", "coordinates": [[[4.87, 52.37], [4.89, 52.37], [4.89, 52.38], [4.87, 52.37]]]}},
  {"type": "Feature", "properties": {"neighbourhood": "De Pijp", "neighbourhood_group": "Zuid"},
   "geometry": {"type": "Polygon", "coordinates": [[[4.89, 52.35], [4.90, 52.35], [4.90, 52.36], [4.89, 52.35]]]}},
  {"type": "Feature", "properties": {"neighbourhood": "Oud-West", "neighbourhood_group": "West"},
   "geometry": {"type": "Polygon", "coordinates": [[[4.86, 52.36], [4.87, 52.36], [4.87, 52.37], [4.86, 52.36]]]}}
]}"#;

    fn dataset() -> Dataset {
        let raw_listings = read_listings_from(LISTINGS.as_bytes(), Path::new("listings.csv")).unwrap();
        let raw_reviews = read_reviews_from(REVIEWS.as_bytes(), Path::new("reviews.csv")).unwrap();
        let layer = parse_neighbourhoods(NEIGHBOURHOODS, Path::new("neighbourhoods.geojson")).unwrap();

        Dataset {
            listings: normalize_listings(&raw_listings).unwrap(),
            reviews: normalize_reviews(&raw_reviews).unwrap(),
            neighbourhoods: layer.features,
            waterways: Vec::new(),
            skipped_neighbourhood_features: layer.skipped,
            skipped_waterway_features: 0,
        }
    }

    #[test]
    fn whole_pipeline() {
        let mut config = config::create_test_config();
        config.focus_neighbourhoods = vec!["Jordaan".to_string()];
        let report = build_report(&dataset(), &config);

        assert_eq!(report.count_listings, 5);
        assert_eq!(report.count_reviewed_listings, 4);
        assert_eq!(report.neighbourhoods_all.len(), 3);
        assert_eq!(report.neighbourhoods_reviewed.len(), 2);
        assert_eq!(report.coverage_gaps, vec!["De Pijp".to_string()]);

        let jordaan = &report.neighbourhoods_reviewed[0];
        assert_eq!(jordaan.neighbourhood, "Jordaan");
        assert_eq!(jordaan.count_listings, 3);
        assert_eq!(jordaan.count_reviews, 7);
        assert_eq!(jordaan.avg_price, (150.0 + 90.0 + 40.0) / 3.0);

        // h1 has three listings citywide but only two in Jordaan
        assert_eq!(report.host_types_citywide.multi, 3);
        assert_eq!(report.host_types_by_neighbourhood["Oud-West"].multi, 0);
        assert_eq!(report.focus_neighbourhoods[0].host_types.multi, 2);
        assert_eq!(report.focus_neighbourhoods[0].host_types.single, 1);

        assert_eq!(report.count_reviewers, 3);
        assert_eq!(report.count_multi_reviewers, 2);
        assert_eq!(report.top_reviewers[0].reviewer_id, "alice");
        assert_eq!(report.top_reviewers[1].reviewer_id, "bob");
        assert_eq!(report.top_reviewers[2].reviewer_id, "carol");

        let alice = &report.reviewer_profiles[0];
        assert_eq!(alice.count_stays, 3);
        assert_eq!(alice.timeline.len(), 2);
        assert_eq!(alice.host_concentration[0].host_id, "h1");
        assert!(alice.host_concentration[0].repeated);

        let bob = &report.reviewer_profiles[1];
        assert_eq!(bob.comment_lengths.missing, 1);
        assert_eq!(bob.comment_lengths.lengths, vec![4]);

        let carol = &report.reviewer_profiles[2];
        assert_eq!(carol.count_stays, 0);
        assert_eq!(carol.reviews_without_listing, 1);
        assert_eq!(report.join_gaps.reviews_without_listing, 1);
    }

    #[test]
    fn rerun_is_identical() {
        let config = config::create_test_config();
        let first = serde_json::to_string(&build_report(&dataset(), &config)).unwrap();
        let second = serde_json::to_string(&build_report(&dataset(), &config)).unwrap();
        assert_eq!(first, second);
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rental_eda_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn written_files_are_identical_across_runs() {
        let config = config::create_test_config();
        let report = build_report(&dataset(), &config);
        let first_dir = scratch_dir("first_run");
        let second_dir = scratch_dir("second_run");

        let first = write_report(&report, &first_dir).unwrap();
        let second = write_report(&build_report(&dataset(), &config), &second_dir).unwrap();

        let names: Vec<_> = first.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(
            names,
            vec![
                "neighbourhoods_all.csv",
                "neighbourhoods_reviewed.csv",
                "neighbourhoods_reviewed.geojson",
                "reviewers_top.csv",
                "report.json",
            ]
        );
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap(), "{:?} differs", a);
        }

        let reviewed = fs::read_to_string(first_dir.join("neighbourhoods_reviewed.csv")).unwrap();
        let mut lines = reviewed.lines();
        assert_eq!(
            lines.next(),
            Some("neighbourhood,neighbourhood_group,count_listings,count_reviews,avg_price")
        );
        assert!(lines.next().unwrap().starts_with("Jordaan,Centrum,3,7,93.3"));
        assert!(lines.next().unwrap().starts_with("Oud-West,West,1,3,210"));
        assert_eq!(lines.next(), None);

        let geojson: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(first_dir.join("neighbourhoods_reviewed.geojson")).unwrap(),
        )
        .unwrap();
        let features = geojson["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["neighbourhood"], "Jordaan");
        assert_eq!(features[0]["properties"]["count_reviews"], 7);
        assert_eq!(features[0]["geometry"]["type"], "Polygon");

        let json = fs::read_to_string(first_dir.join("report.json")).unwrap();
        assert!(json.ends_with("}\n"));

        let _ = fs::remove_dir_all(&first_dir);
        let _ = fs::remove_dir_all(&second_dir);
    }

    #[test]
    fn empty_tables_keep_their_header() {
        let empty = Dataset {
            listings: Vec::new(),
            reviews: Vec::new(),
            neighbourhoods: Vec::new(),
            waterways: Vec::new(),
            skipped_neighbourhood_features: 0,
            skipped_waterway_features: 0,
        };
        let report = build_report(&empty, &config::create_test_config());
        let dir = scratch_dir("empty_tables");
        write_report(&report, &dir).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("neighbourhoods_all.csv")).unwrap(),
            "neighbourhood,neighbourhood_group,count_listings,count_reviews,avg_price\n"
        );
        assert_eq!(
            fs::read_to_string(dir.join("reviewers_top.csv")).unwrap(),
            "reviewer_id,count_reviews\n"
        );
        assert!(!dir.join("waterways.geojson").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn focus_reviewers_override_top_k() {
        let mut config = config::create_test_config();
        config.focus_reviewers = vec!["bob".to_string(), "nobody".to_string()];
        let report = build_report(&dataset(), &config);

        assert_eq!(report.reviewer_profiles.len(), 2);
        assert_eq!(report.reviewer_profiles[0].reviewer_id, "bob");
        assert_eq!(report.reviewer_profiles[1].count_reviews, 0);
        assert!(report.reviewer_profiles[1].timeline.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config = parse_config(
            r#"
listings_path = "data/listings.csv"
reviews_path = "data/reviews.csv"
neighbourhoods_path = "data/neighbourhoods.geojson"
output_dir = "out"
"#,
        )
        .unwrap();
        assert_eq!(config.top_reviewers, 10);
        assert_eq!(config.waterway_limit, 400);
        assert!(config.waterways_path.is_none());
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn config_missing_field() {
        assert!(parse_config("listings_path = \"x\"").is_err());
    }
}
