use featuremap_core::db::open_db_in_memory;
use featuremap_core::{
    Feature, FeatureRepository, FeatureService, FeatureValidationError, MutationOutcome,
    RepoError, SqliteFeatureRepository,
};

fn park() -> Feature {
    Feature::new("f1", "Park", "Polygon", vec![vec![1.0, 2.0], vec![3.0, 4.0]])
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    let feature = park().with_kind("green-space");
    let id = repo.create_feature(&feature).unwrap();
    assert_eq!(id, "f1");

    let loaded = repo.get_feature("f1").unwrap().unwrap();
    assert_eq!(loaded, feature);
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    assert!(repo.get_feature("nope").unwrap().is_none());
}

#[test]
fn duplicate_id_is_rejected_and_first_row_kept() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    repo.create_feature(&park()).unwrap();
    let clash = Feature::new("f1", "Lake", "Point", vec![vec![9.0, 9.0]]);
    let err = repo.create_feature(&clash).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(ref id) if id == "f1"));

    let all = repo.list_features().unwrap();
    assert_eq!(all, vec![park()]);
}

#[test]
fn create_rejects_empty_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    let mut feature = park();
    feature.title.clear();
    let err = repo.create_feature(&feature).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(FeatureValidationError::MissingField("title"))
    ));
    assert!(repo.list_features().unwrap().is_empty());
}

#[test]
fn empty_coordinates_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    let feature = Feature::new("empty", "Nothing yet", "LineString", Vec::new());
    repo.create_feature(&feature).unwrap();

    let loaded = repo.get_feature("empty").unwrap().unwrap();
    assert!(loaded.coordinates.is_empty());
}

#[test]
fn replace_overwrites_all_mutable_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    repo.create_feature(&park().with_kind("green-space")).unwrap();

    let replacement = Feature::new("f1", "City Park", "MultiPolygon", vec![vec![5.5, 6.5]]);
    repo.replace_feature(&replacement).unwrap();

    let loaded = repo.get_feature("f1").unwrap().unwrap();
    assert_eq!(loaded.title, "City Park");
    assert_eq!(loaded.kind, None);
    assert_eq!(loaded.geometry_type, "MultiPolygon");
    assert_eq!(loaded.coordinates, vec![vec![5.5, 6.5]]);
}

#[test]
fn replace_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    let err = repo.replace_feature(&park()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref id) if id == "f1"));
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    repo.create_feature(&park()).unwrap();
    repo.delete_feature("f1").unwrap();
    assert!(repo.get_feature("f1").unwrap().is_none());

    let err = repo.delete_feature("f1").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn deleted_id_can_be_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    repo.create_feature(&park()).unwrap();
    repo.delete_feature("f1").unwrap();
    repo.create_feature(&park()).unwrap();

    assert_eq!(repo.list_features().unwrap().len(), 1);
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    for id in ["zeta", "alpha", "mid"] {
        repo.create_feature(&Feature::new(id, id, "Point", vec![vec![0.0, 0.0]]))
            .unwrap();
    }

    let ids = repo
        .list_features()
        .unwrap()
        .into_iter()
        .map(|feature| feature.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn list_rejects_corrupt_coordinates() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO features (id, title, type, geometry_type, coordinates)
         VALUES ('bad', 'Broken', NULL, 'Point', 'not-json');",
        [],
    )
    .unwrap();

    let repo = SqliteFeatureRepository::new(&conn);
    let err = repo.list_features().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("bad")));
}

#[test]
fn service_reports_no_match_without_touching_store() {
    let conn = open_db_in_memory().unwrap();
    let service = FeatureService::new(SqliteFeatureRepository::new(&conn));

    service.add_feature(&park()).unwrap();

    let ghost = Feature::new("ghost", "Ghost", "Point", vec![vec![0.0, 0.0]]);
    assert_eq!(service.edit_feature(&ghost).unwrap(), MutationOutcome::NoMatch);
    assert_eq!(service.delete_feature("ghost").unwrap(), MutationOutcome::NoMatch);

    assert_eq!(service.all_features().unwrap(), vec![park()]);
}

#[test]
fn service_edit_and_delete_apply_to_existing_feature() {
    let conn = open_db_in_memory().unwrap();
    let service = FeatureService::new(SqliteFeatureRepository::new(&conn));

    service.add_feature(&park()).unwrap();

    let edited = Feature::new("f1", "Renamed", "Polygon", vec![vec![1.0, 1.0]]).with_kind("plaza");
    assert_eq!(service.edit_feature(&edited).unwrap(), MutationOutcome::Applied);
    assert_eq!(service.all_features().unwrap(), vec![edited]);

    assert_eq!(service.delete_feature("f1").unwrap(), MutationOutcome::Applied);
    assert!(service.all_features().unwrap().is_empty());
}

#[test]
fn service_edit_still_validates_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = FeatureService::new(SqliteFeatureRepository::new(&conn));

    service.add_feature(&park()).unwrap();

    let mut edited = park();
    edited.geometry_type = String::new();
    let err = service.edit_feature(&edited).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(FeatureValidationError::MissingField("geometryType"))
    ));
}

fn coordinate_bits(coordinates: &[Vec<f64>]) -> Vec<Vec<u64>> {
    coordinates
        .iter()
        .map(|tuple| tuple.iter().map(|value| value.to_bits()).collect())
        .collect()
}

#[test]
fn full_precision_coordinates_survive_storage_bit_for_bit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    let coordinates = vec![
        vec![127.03465148502943, 37.49794199999999],
        vec![-179.99999999999997, 0.1 + 0.2],
        vec![f64::MIN_POSITIVE, f64::MAX, -0.0],
        vec![5e-324, 1.7976931348623157e308],
    ];
    let feature = Feature::new("precise", "Precise", "Polygon", coordinates.clone());
    repo.create_feature(&feature).unwrap();

    let loaded = repo.get_feature("precise").unwrap().unwrap();
    assert_eq!(coordinate_bits(&loaded.coordinates), coordinate_bits(&coordinates));

    let replacement = Feature::new("precise", "Precise", "Polygon", vec![vec![-33.86881999999999, 151.20929000000001]]);
    repo.replace_feature(&replacement).unwrap();
    let listed = repo.list_features().unwrap();
    assert_eq!(
        coordinate_bits(&listed[0].coordinates),
        coordinate_bits(&replacement.coordinates)
    );
}

#[test]
fn generated_coordinates_survive_storage_bit_for_bit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFeatureRepository::new(&conn);

    // Deterministic LCG over [-180, 180).
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let coordinates = (0..5_000)
        .map(|_| {
            (0..2)
                .map(|_| {
                    state = state
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    let unit = (state >> 11) as f64 / (1_u64 << 53) as f64;
                    unit * 360.0 - 180.0
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    repo.create_feature(&Feature::new("grid", "Grid", "MultiPoint", coordinates.clone()))
        .unwrap();

    let loaded = repo.get_feature("grid").unwrap().unwrap();
    assert_eq!(coordinate_bits(&loaded.coordinates), coordinate_bits(&coordinates));
}
