//! Behavioural tests for [`CachingResolver`] over [`NominatimGeocoder`].
//!
//! A local stub server stands in for the geocoding service.

use std::cell::RefCell;

use carefind_core::{CoordinateResolver, ResolveError};
use carefind_data::{CachingResolver, GeocodeCache, NominatimGeocoder};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

mod support;

use support::{StubGeocodingServer, Workspace};

const CACHE_FILE: &str = "hospital_coordinates.csv";

/// Aggregate fixtures shared across the scenarios.
pub struct GeocodingContext {
    workspace: Workspace,
    server: RefCell<Option<StubGeocodingServer>>,
    lookup: RefCell<Option<Result<Coord<f64>, ResolveError>>>,
}

#[fixture]
/// Build a fresh context for each scenario run.
pub fn context() -> GeocodingContext {
    GeocodingContext {
        workspace: Workspace::new(),
        server: RefCell::new(None),
        lookup: RefCell::new(None),
    }
}

impl GeocodingContext {
    fn requests(&self) -> usize {
        self.server
            .borrow()
            .as_ref()
            .map_or(0, StubGeocodingServer::requests)
    }

    fn geocoder(&self) -> NominatimGeocoder {
        let server = self.server.borrow();
        let base = server
            .as_ref()
            .map(StubGeocodingServer::base_url)
            .unwrap_or_else(|| panic!("server started"));
        NominatimGeocoder::new(base).unwrap_or_else(|err| panic!("geocoder builds: {err}"))
    }

    fn cache(&self) -> GeocodeCache {
        GeocodeCache::load(&self.workspace.path(CACHE_FILE))
            .unwrap_or_else(|err| panic!("cache loads: {err}"))
    }

    fn resolve_twice_and_save(&self, address: &str) {
        let resolver = CachingResolver::new(self.geocoder(), self.cache());
        let first = resolver.resolve(address);
        let second = resolver.resolve(address);
        assert_eq!(first, second);
        resolver
            .into_cache()
            .save(&self.workspace.path(CACHE_FILE))
            .unwrap_or_else(|err| panic!("cache saves: {err}"));
        *self.lookup.borrow_mut() = Some(second);
    }
}

#[given("a geocoding service that knows Ikeja")]
fn service_knows_ikeja(context: &GeocodingContext) {
    *context.server.borrow_mut() =
        Some(StubGeocodingServer::start(&[("Ikeja", (6.6018, 3.3515))]));
}

#[given("an empty geocode cache file")]
fn empty_cache(context: &GeocodingContext) {
    context.workspace.write(CACHE_FILE, "Address,Coordinates\n");
}

#[given("a geocode cache file that knows Yaba")]
fn cache_knows_yaba(context: &GeocodingContext) {
    context
        .workspace
        .write(CACHE_FILE, "Address,Coordinates\nYaba,\"(6.5095,3.3711)\"\n");
}

#[when("Ikeja is resolved twice and the cache is saved")]
fn resolve_ikeja_twice(context: &GeocodingContext) {
    context.resolve_twice_and_save("Ikeja");
}

#[when("Atlantis is resolved twice and the cache is saved")]
fn resolve_atlantis_twice(context: &GeocodingContext) {
    context.resolve_twice_and_save("Atlantis");
}

#[when("Ikeja is resolved offline")]
fn resolve_offline(context: &GeocodingContext) {
    let resolver = CachingResolver::<NominatimGeocoder>::offline(context.cache());
    *context.lookup.borrow_mut() = Some(resolver.resolve("Ikeja"));
}

#[then("the geocoding service was queried once")]
fn queried_once(context: &GeocodingContext) {
    assert_eq!(context.requests(), 1);
}

#[then("the geocoding service was queried zero times")]
fn never_queried(context: &GeocodingContext) {
    assert_eq!(context.requests(), 0);
}

#[then("the cache file records the coordinates of Ikeja")]
fn cache_records_ikeja(context: &GeocodingContext) {
    assert_eq!(
        context.workspace.read(CACHE_FILE),
        "Address,Coordinates\nIkeja,\"(6.6018,3.3515)\"\n"
    );
}

#[then("the cache file records Atlantis as unresolved")]
fn cache_records_atlantis(context: &GeocodingContext) {
    assert_eq!(
        context.workspace.read(CACHE_FILE),
        "Address,Coordinates\nAtlantis,None\n"
    );
}

#[then("the lookup reports the address as not found")]
fn lookup_not_found(context: &GeocodingContext) {
    assert!(matches!(
        context.lookup.borrow().as_ref(),
        Some(Err(ResolveError::NotFound { .. }))
    ));
}

#[scenario(path = "tests/features/geocoding.feature", index = 0)]
fn repeated_lookups_use_the_cache(context: GeocodingContext) {
    let _ = context;
}

#[scenario(path = "tests/features/geocoding.feature", index = 1)]
fn unknown_addresses_are_remembered(context: GeocodingContext) {
    let _ = context;
}

#[scenario(path = "tests/features/geocoding.feature", index = 2)]
fn offline_lookups_stay_local(context: GeocodingContext) {
    let _ = context;
}
