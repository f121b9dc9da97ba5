//! File-level tests for the dataset loader and geocode cache.

use carefind_core::lat_lon;
use carefind_data::{DatasetError, GeocodeCache, GeocodeCacheError, load_candidates};
use rstest::rstest;

mod support;

use support::Workspace;

const DATASET: &str = "\
Name,Full Address,Services,Cost Level,Quality Score,User Rating
Lagoon Heart Hospital,\"12 Allen Avenue, Ikeja\",\"Cardiology, ICU\",Low,4.5,4.2
Smile Dental Clinic,\"Opebi Road, Ikeja\",Dental Surgery,Medium,4.0,3.9
Nameless,,Cardiology,Low,,4.0
";

#[rstest]
fn loads_a_dataset_file_and_counts_dropped_rows() {
    let workspace = Workspace::new();
    let path = workspace.write("hospitals.csv", DATASET);
    let loaded = load_candidates(&path).unwrap_or_else(|err| panic!("dataset loads: {err}"));
    assert_eq!(loaded.candidates.len(), 2);
    assert_eq!(loaded.dropped, 1);
    assert_eq!(
        loaded.candidates.first().map(|c| c.address.as_str()),
        Some("12 Allen Avenue, Ikeja")
    );
}

#[rstest]
fn missing_dataset_reports_its_path() {
    let workspace = Workspace::new();
    let path = workspace.path("absent.csv");
    match load_candidates(&path) {
        Err(DatasetError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[rstest]
fn missing_cache_file_starts_empty() {
    let workspace = Workspace::new();
    let cache = GeocodeCache::load(&workspace.path("absent.csv"))
        .unwrap_or_else(|err| panic!("missing cache is not an error: {err}"));
    assert!(cache.is_empty());
}

#[rstest]
fn cache_survives_a_save_and_reload() {
    let workspace = Workspace::new();
    let path = workspace.path("nested/coordinates.csv");
    let mut cache = GeocodeCache::default();
    cache.insert("12 Allen Avenue, Ikeja", Some(lat_lon(6.615, 3.358)));
    cache.insert("Atlantis", None);
    cache
        .save(&path)
        .unwrap_or_else(|err| panic!("cache saves: {err}"));
    let reloaded = GeocodeCache::load(&path).unwrap_or_else(|err| panic!("cache loads: {err}"));
    assert_eq!(reloaded, cache);
}

#[rstest]
fn cache_without_expected_columns_is_rejected() {
    let workspace = Workspace::new();
    let path = workspace.write("coordinates.csv", "Place,Where\nIkeja,None\n");
    assert!(matches!(
        GeocodeCache::load(&path),
        Err(GeocodeCacheError::MissingColumns)
    ));
}
