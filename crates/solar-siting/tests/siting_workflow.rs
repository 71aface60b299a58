use geo::{LineString, MultiPolygon, Polygon};
use solar_siting::siting::{
    footprint_area, BoundingRegion, FeatureCollectionImporter, FeatureProperties,
    OptimalSiteLocator, PolygonFeature, ScoreTable, ScoringMode, SiteOutcome, SourceLayer,
    SuitabilityScorer, HEIGHT_ATTRIBUTE,
};

const EPSILON: f64 = 1e-9;

fn square(center_x: f64, center_y: f64, half: f64, category: &str) -> PolygonFeature {
    PolygonFeature::new(
        Polygon::new(
            LineString::from(vec![
                (center_x - half, center_y - half),
                (center_x + half, center_y - half),
                (center_x + half, center_y + half),
                (center_x - half, center_y + half),
                (center_x - half, center_y - half),
            ]),
            vec![],
        ),
        FeatureProperties::with_category(category),
    )
}

fn viewport() -> BoundingRegion {
    BoundingRegion::new(-1.0, 50.0, 1.0, 52.0).expect("valid viewport")
}

fn locate_land_use(features: &[PolygonFeature]) -> SiteOutcome {
    OptimalSiteLocator::default().locate(&viewport(), features, ScoringMode::Category)
}

#[test]
fn two_industrial_zones_meet_between_them() {
    let features = vec![
        square(-0.5, 51.0, 0.25, "industrial"),
        square(0.5, 51.0, 0.25, "industrial"),
    ];

    let outcome = locate_land_use(&features);

    let site = outcome.site().expect("a site is located");
    assert!(site.x.abs() < EPSILON, "x was {}", site.x);
    assert!((site.y - 51.0).abs() < EPSILON, "y was {}", site.y);
    assert!((site.score - 3.0).abs() < EPSILON);
}

#[test]
fn small_residential_building_is_not_a_site() {
    // ~31.6 m square at the equator, about 1000 m².
    let half = 31.622_776_6 / 111_319.490_8 / 2.0;
    let mut building = square(0.0, 0.0, half, "residential");
    building
        .properties
        .attributes
        .insert(HEIGHT_ATTRIBUTE.to_string(), 10.0);

    let area = footprint_area(&building);
    assert!((area - 1000.0).abs() < 10.0, "area was {area}");

    let scorer = SuitabilityScorer::default();
    let score = scorer.score(&building, ScoringMode::MagnitudeAdjusted);
    assert!((score - 0.03).abs() < 0.001, "score was {score}");

    let region = BoundingRegion::new(-0.01, -0.01, 0.01, 0.01).expect("valid region");
    let outcome = OptimalSiteLocator::default().locate(
        &region,
        &[building],
        ScoringMode::MagnitudeAdjusted,
    );
    assert_eq!(outcome, SiteOutcome::NoSite);
}

#[test]
fn large_commercial_building_is_a_site() {
    let mut building = square(0.0, 0.0, 0.0005, "commercial");
    building
        .properties
        .attributes
        .insert(HEIGHT_ATTRIBUTE.to_string(), 30.0);

    let region = BoundingRegion::new(-0.01, -0.01, 0.01, 0.01).expect("valid region");
    let outcome = OptimalSiteLocator::default().locate(
        &region,
        &[building],
        ScoringMode::MagnitudeAdjusted,
    );

    let site = outcome.site().expect("tall commercial footprint qualifies");
    assert!(site.x.abs() < EPSILON && site.y.abs() < EPSILON);
    assert!(site.score > 0.5);
}

#[test]
fn low_scoring_candidates_yield_no_site() {
    let features = vec![
        square(-0.5, 51.0, 0.25, "residential"),
        square(0.5, 51.0, 0.25, "farmland"),
        square(0.0, 50.5, 0.25, "residential"),
    ];

    let outcome = locate_land_use(&features);
    assert_eq!(outcome, SiteOutcome::NoSite);
}

#[test]
fn features_outside_viewport_do_not_pull_the_site() {
    let features = vec![
        square(-0.5, 51.0, 0.25, "industrial"),
        square(40.0, 10.0, 0.25, "industrial"),
    ];

    let outcome = locate_land_use(&features);
    let site = outcome.site().expect("site located");
    assert!((site.x + 0.5).abs() < EPSILON);
    assert!((site.score - 1.5).abs() < EPSILON);
}

#[test]
fn multipolygon_zone_does_not_produce_a_site() {
    let member = Polygon::try_from(square(0.0, 51.0, 0.25, "industrial").geometry)
        .expect("square is a polygon");
    let features = vec![PolygonFeature::new(
        MultiPolygon::new(vec![member]),
        FeatureProperties::with_category("industrial"),
    )];

    assert_eq!(locate_land_use(&features), SiteOutcome::NoSite);
}

#[test]
fn straddling_zone_contributes_its_full_centroid() {
    let features = vec![square(1.0, 51.0, 0.5, "commercial")];

    let outcome = locate_land_use(&features);
    let site = outcome.site().expect("partially visible zone is kept");
    assert!((site.x - 1.0).abs() < EPSILON);
}

#[test]
fn weights_pull_toward_higher_scores() {
    let features = vec![
        square(-0.5, 51.0, 0.25, "industrial"),
        square(0.5, 51.0, 0.25, "commercial"),
    ];

    let outcome = locate_land_use(&features);
    let site = outcome.site().expect("site located");
    let expected_x = (-0.5 * 1.5 + 0.5 * 0.9) / 2.4;
    assert!((site.x - expected_x).abs() < EPSILON);
    assert!((site.score - 2.4).abs() < EPSILON);
}

#[test]
fn locate_is_repeatable() {
    let features = vec![
        square(-0.3, 50.7, 0.1, "industrial"),
        square(0.6, 51.4, 0.2, "commercial"),
        square(0.1, 51.9, 0.3, "industrial"),
    ];
    let locator = OptimalSiteLocator::default();

    let first = locator.locate(&viewport(), &features, ScoringMode::Category);
    let second = locator.locate(&viewport(), &features, ScoringMode::Category);

    let (first, second) = (first.site().expect("site"), second.site().expect("site"));
    assert_eq!(first.x.to_bits(), second.x.to_bits());
    assert_eq!(first.y.to_bits(), second.y.to_bits());
    assert_eq!(first.score.to_bits(), second.score.to_bits());
}

#[test]
fn custom_tables_replace_standard_weights() {
    let land_use =
        ScoreTable::new([("solar_farm", 4.0), ("default", 0.0)]).expect("valid table");
    let scorer = SuitabilityScorer::new(land_use, ScoreTable::structure());
    let locator = OptimalSiteLocator::new(scorer);
    let features = vec![
        square(-0.5, 51.0, 0.25, "industrial"),
        square(0.5, 51.0, 0.25, "solar_farm"),
    ];

    let outcome = locator.locate(&viewport(), &features, ScoringMode::Category);
    let site = outcome.site().expect("site located");
    assert!((site.x - 0.5).abs() < EPSILON);
    assert_eq!(site.score, 4.0);
}

#[test]
fn imported_land_use_collection_locates_site() {
    let geojson = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-0.75, 50.75], [-0.25, 50.75], [-0.25, 51.25], [-0.75, 51.25], [-0.75, 50.75]]]
                },
                "properties": { "class": "industrial" }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.25, 50.75], [0.75, 50.75], [0.75, 51.25], [0.25, 51.25], [0.25, 50.75]]]
                },
                "properties": { "class": "industrial" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0.0, 50.0], [0.0, 52.0]] },
                "properties": { "class": "industrial" }
            }
        ]
    }"#;

    let layer = SourceLayer::LandUse;
    let features = FeatureCollectionImporter::new(layer)
        .import_reader(geojson.as_bytes())
        .expect("collection imports");
    assert_eq!(features.len(), 3);

    let report = OptimalSiteLocator::default().locate_with_report(
        &viewport(),
        &features,
        layer.scoring_mode(),
    );

    assert_eq!(report.in_bounds, 2);
    let site = report.site.expect("site located");
    assert!(site.x.abs() < EPSILON);
    assert!((site.y - 51.0).abs() < EPSILON);
    assert!((site.score - 3.0).abs() < EPSILON);
}
