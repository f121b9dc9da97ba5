//! Test helpers for composing CLI workspaces and stub geocoders.

use camino::{Utf8Path, Utf8PathBuf};
use carefind_core::test_support::MemoryResolver;
use carefind_core::{CoordinateResolver, lat_lon};
use tempfile::TempDir;

use crate::CliError;
use crate::recommend::{GeocoderBuilder, RecommendConfig};

/// Five Lagos hospitals with known coordinates.
pub(super) const HOSPITALS_CSV: &str = "\
Name,Full Address,Services,Cost Level,Quality Score,User Rating,Latitude,Longitude
Lagoon Heart Hospital,\"12 Allen Avenue, Ikeja\",\"Cardiology, ICU, Emergency\",Low,4.5,4.2,6.6150,3.3580
Smile Dental Clinic,\"Opebi Road, Ikeja\",\"Dental Surgery, Orthodontics\",Medium,4.0,4.1,6.5960,3.3600
Clearview Eye Centre,\"Ogba, Lagos\",Ophthalmology,Low,3.5,3.9,6.6300,3.3400
Allen Cardiac Institute,\"Toyin Street, Ikeja\",\"Interventional Cardiology, Cardiac Surgery\",Premium,3.2,3.8,6.6400,3.3900
Lekki Family Hospital,\"Admiralty Way, Lekki\",\"Paediatrics, Maternity\",High,4.8,4.6,6.4474,3.4725
";

/// Write `bytes` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, bytes: &[u8]) {
    std::fs::write(path, bytes).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// Temporary directory holding a dataset and a cache path.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) dataset: Utf8PathBuf,
    pub(super) cache: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("utf-8 workspace: {path:?}"));
        let dataset = root.join("hospitals.csv");
        let cache = root.join("hospital_coordinates.csv");
        write_utf8(&dataset, HOSPITALS_CSV.as_bytes());
        Self {
            _dir: dir,
            root,
            dataset,
            cache,
        }
    }
}

/// Geocoder builder handing out an in-memory resolver.
#[derive(Debug)]
pub(super) struct StubGeocoderBuilder {
    pub(super) resolver: MemoryResolver,
}

impl StubGeocoderBuilder {
    /// Resolver that knows where Ikeja is.
    pub(super) fn ikeja() -> Self {
        Self {
            resolver: MemoryResolver::with_entries([("Ikeja", lat_lon(6.6018, 3.3515))]),
        }
    }
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &RecommendConfig) -> Result<Box<dyn CoordinateResolver>, CliError> {
        Ok(Box::new(self.resolver.clone()))
    }
}
