use async_trait::async_trait;
use cycleplore::error::{AppError, Result};
use cycleplore::models::Coordinates;
use cycleplore::services::exporter::FileExporter;
use cycleplore::services::geocoding::GeocodingService;
use cycleplore::services::places::{PlaceCategory, PlacesSearchService};
use cycleplore::services::trip_planner::TripPlanner;
use cycleplore::AppState;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Warsaw city centre, the map's default centre in the mobile app
#[allow(dead_code)]
pub fn warsaw() -> Coordinates {
    Coordinates::new(52.2297, 21.0122).unwrap()
}

/// Geocoder answering from a fixed address book
#[allow(dead_code)]
pub struct FakeGeocoder {
    pub known: HashMap<String, Coordinates>,
}

#[async_trait]
impl GeocodingService for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        if address == "unreachable" {
            return Err(AppError::Geocoding("connection refused".to_string()));
        }
        Ok(self.known.get(address).copied())
    }
}

/// Places search returning a fixed station, if any, and recording each
/// `(radius_m, category)` it was asked for
#[allow(dead_code)]
pub struct FakePlaces {
    pub station: Option<Coordinates>,
    pub searches: Mutex<Vec<(f64, PlaceCategory)>>,
}

#[async_trait]
impl PlacesSearchService for FakePlaces {
    async fn find_nearest(
        &self,
        _center: &Coordinates,
        radius_m: f64,
        category: PlaceCategory,
    ) -> Result<Option<Coordinates>> {
        self.searches.lock().unwrap().push((radius_m, category));
        Ok(self.station)
    }
}

/// Exporter keeping documents in memory
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryExporter {
    pub files: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl FileExporter for MemoryExporter {
    async fn export(&self, file_stem: &str, document: &str) -> Result<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .insert(file_stem.to_string(), document.to_string());
        Ok(PathBuf::from(format!("memory/{}.gpx", file_stem)))
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub places: Arc<FakePlaces>,
    pub exporter: Arc<MemoryExporter>,
}

/// Build the API router over in-process fakes
#[allow(dead_code)]
pub fn setup_test_app(station: Option<Coordinates>) -> TestApp {
    let mut known = HashMap::new();
    known.insert("Plac Defilad 1, Warszawa".to_string(), warsaw());

    let places = Arc::new(FakePlaces {
        station,
        searches: Mutex::new(Vec::new()),
    });
    let exporter = Arc::new(MemoryExporter::default());
    let state = Arc::new(AppState {
        planner: TripPlanner::new(places.clone(), 5000.0),
        geocoder: Arc::new(FakeGeocoder { known }),
        exporter: exporter.clone(),
    });

    TestApp {
        router: cycleplore::routes::create_router(state),
        places,
        exporter,
    }
}

/// Pull `(lat, lon)` of every `<trkpt>` out of a GPX document
#[allow(dead_code)]
pub fn parse_trackpoints(xml: &str) -> Vec<(f64, f64)> {
    let mut reader = Reader::from_str(xml);
    let mut points = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"trkpt" => {
                let mut lat = None;
                let mut lon = None;
                for attr in e.attributes() {
                    let attr = attr.unwrap();
                    let value: f64 = std::str::from_utf8(&attr.value).unwrap().parse().unwrap();
                    match attr.key.local_name().as_ref() {
                        b"lat" => lat = Some(value),
                        b"lon" => lon = Some(value),
                        _ => {}
                    }
                }
                points.push((lat.unwrap(), lon.unwrap()));
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid GPX: {e}"),
            _ => {}
        }
    }

    points
}
