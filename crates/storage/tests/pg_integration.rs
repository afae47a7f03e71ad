//! Integration tests for PgStorage against a PostGIS-enabled database.
//! Run with: DATABASE_URL=... cargo test -p geostuff-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use geostuff_core::{City, GeoPoint, NewCity};
use geostuff_storage::{CityStore, PgStorage, PoolSettings, StorageError, run_pg_migrations};

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

/// Cities from parallel tests share the table, so queries are filtered by this
/// test's own rows.
fn only<'a>(cities: &'a [City], ids: &[i32]) -> Vec<&'a City> {
    cities.iter().filter(|c| ids.contains(&c.point_id)).collect()
}

fn contains(cities: &[City], point_id: i32) -> bool {
    cities.iter().any(|c| c.point_id == point_id)
}

// ── Schema ───────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn pg_schema_creation_is_idempotent() {
    let storage = create_pg_storage().await;
    run_pg_migrations(storage.pool()).await.unwrap();
    storage.create_schema().await.unwrap();

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'cities'",
    )
    .fetch_one(storage.pool())
    .await
    .unwrap();
    assert_eq!(tables, 1);
}

#[tokio::test]
#[ignore]
async fn pg_connect_without_migrations() {
    let url = std::env::var("DATABASE_URL").unwrap();
    let storage = PgStorage::connect(&url, PoolSettings::default()).await.unwrap();
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(storage.pool()).await.unwrap();
    assert_eq!(one, 1);
}

#[tokio::test]
#[ignore]
async fn pg_schema_rejects_null_coordinates() {
    let storage = create_pg_storage().await;
    let err = sqlx::query("INSERT INTO cities (location, longitude, latitude) VALUES ($1, NULL, 1.0)")
        .bind("Unplaced")
        .execute(storage.pool())
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).map(|c| c.into_owned());
    assert_eq!(code.as_deref(), Some("23502"));

    // Listing keeps working because no such row can exist.
    storage.list_cities().await.unwrap();
}

// ── add_city ─────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn pg_add_city_then_lookup_decodes_geometry() {
    let storage = create_pg_storage().await;
    let added = storage.add_city(&NewCity::new("Portland", -122.68, 45.52)).await.unwrap();

    let fetched = storage.get_city(added.point_id).await.unwrap().unwrap();
    assert_eq!(fetched.location, "Portland");
    assert_eq!(fetched.longitude, -122.68);
    assert_eq!(fetched.latitude, 45.52);
    let geo = fetched.geo.expect("geo set on insert");
    assert!(geo.approx_eq(&GeoPoint::new(-122.68, 45.52).unwrap(), 1e-9));
    assert!(fetched.geo_in_sync());
}

#[tokio::test]
#[ignore]
async fn pg_add_city_accepts_out_of_range_coordinates() {
    let storage = create_pg_storage().await;
    let added = storage.add_city(&NewCity::new("Off the map", 361.0, -100.0)).await.unwrap();
    assert_eq!(added.geo, Some(GeoPoint::new(361.0, -100.0).unwrap()));
}

#[tokio::test]
#[ignore]
async fn pg_add_city_rejects_overlong_location() {
    let storage = create_pg_storage().await;
    let name = "x".repeat(31);
    let err = storage.add_city(&NewCity::new(name, 0.0, 0.0)).await.unwrap_err();
    assert!(matches!(err, StorageError::Database(_)), "got {err:?}");
}

#[tokio::test]
#[ignore]
async fn pg_point_ids_are_assigned_and_unique() {
    let storage = create_pg_storage().await;
    let a = storage.add_city(&NewCity::new("Twin", 1.0, 1.0)).await.unwrap();
    let b = storage.add_city(&NewCity::new("Twin", 1.0, 1.0)).await.unwrap();
    assert_ne!(a.point_id, b.point_id);

    let all = storage.list_cities().await.unwrap();
    assert_eq!(only(&all, &[a.point_id, b.point_id]).len(), 2);
}

// ── get_cities_within_radius ─────────────────────────────────────

#[tokio::test]
#[ignore]
async fn pg_portland_seattle_radius() {
    let storage = create_pg_storage().await;
    let portland = storage.add_city(&NewCity::new("Portland", -122.68, 45.52)).await.unwrap();
    let seattle = storage.add_city(&NewCity::new("Seattle", -122.33, 47.61)).await.unwrap();

    let wide = storage.get_cities_within_radius(&portland, 300_000.0).await.unwrap();
    assert!(contains(&wide, seattle.point_id));

    let narrow = storage.get_cities_within_radius(&portland, 100_000.0).await.unwrap();
    assert!(!contains(&narrow, seattle.point_id));
}

#[tokio::test]
#[ignore]
async fn pg_radius_boundary_is_exclusive() {
    let storage = create_pg_storage().await;
    let a = storage.add_city(&NewCity::new("Boundary A", 10.0, 10.0)).await.unwrap();
    let b = storage.add_city(&NewCity::new("Boundary B", 10.5, 10.5)).await.unwrap();

    let d = storage.distance_between(b.point_id, a.point_id).await.unwrap().unwrap();
    assert!(d > 0.0);

    let at = storage.get_cities_within_radius(&a, d).await.unwrap();
    assert!(!contains(&at, b.point_id));

    let beyond = storage.get_cities_within_radius(&a, d + 1.0).await.unwrap();
    assert!(contains(&beyond, b.point_id));
}

#[tokio::test]
#[ignore]
async fn pg_radius_includes_origin() {
    let storage = create_pg_storage().await;
    let origin = storage.add_city(&NewCity::new("Origin", 30.0, -20.0)).await.unwrap();

    let hits = storage.get_cities_within_radius(&origin, 1.0).await.unwrap();
    assert!(contains(&hits, origin.point_id));

    let none = storage.get_cities_within_radius(&origin, 0.0).await.unwrap();
    assert!(!contains(&none, origin.point_id));
}

#[tokio::test]
#[ignore]
async fn pg_radius_uses_exact_stored_geometry() {
    let storage = create_pg_storage().await;
    // 0.1 + 0.2 needs 17 significant digits to round-trip.
    let lon = 0.1 + 0.2;
    let origin = storage.add_city(&NewCity::new("Precise", lon, 0.0)).await.unwrap();
    assert_eq!(origin.geo, Some(GeoPoint::new(lon, 0.0).unwrap()));

    let fetched = storage.get_city(origin.point_id).await.unwrap().unwrap();
    assert_eq!(fetched.geo.unwrap().longitude.to_bits(), lon.to_bits());

    let tiny = storage.get_cities_within_radius(&fetched, 1e-12).await.unwrap();
    assert!(contains(&tiny, origin.point_id));

    let neighbour = storage.add_city(&NewCity::new("Near precise", lon, 1e-7)).await.unwrap();
    let d = storage.distance_between(neighbour.point_id, origin.point_id).await.unwrap().unwrap();
    assert!(d > 0.0);

    let at = storage.get_cities_within_radius(&fetched, d).await.unwrap();
    assert!(!contains(&at, neighbour.point_id));
    assert!(contains(&at, origin.point_id));
}

#[tokio::test]
#[ignore]
async fn pg_negative_radius_is_empty() {
    let storage = create_pg_storage().await;
    let origin = storage.add_city(&NewCity::new("Negative", 5.0, 5.0)).await.unwrap();
    let hits = storage.get_cities_within_radius(&origin, -1.0).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
#[ignore]
async fn pg_origin_without_geometry_matches_nothing() {
    let storage = create_pg_storage().await;
    let mut origin = storage.add_city(&NewCity::new("Detached", 7.0, 7.0)).await.unwrap();
    origin.geo = None;
    let hits = storage.get_cities_within_radius(&origin, 1.0e9).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
#[ignore]
async fn pg_distance_between_missing_city_is_none() {
    let storage = create_pg_storage().await;
    let a = storage.add_city(&NewCity::new("Lonely", 0.0, 0.0)).await.unwrap();
    assert_eq!(storage.distance_between(a.point_id, -1).await.unwrap(), None);
}

// ── update_geometries ────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn pg_update_geometries_repairs_drift() {
    let storage = create_pg_storage().await;
    let city = storage.add_city(&NewCity::new("Drifter", 1.0, 2.0)).await.unwrap();

    sqlx::query("UPDATE cities SET longitude = 3.0, latitude = 4.0 WHERE point_id = $1")
        .bind(city.point_id)
        .execute(storage.pool())
        .await
        .unwrap();
    let drifted = storage.get_city(city.point_id).await.unwrap().unwrap();
    assert!(!drifted.geo_in_sync());

    let updated = storage.update_geometries().await.unwrap();
    assert!(updated >= 1);

    let repaired = storage.get_city(city.point_id).await.unwrap().unwrap();
    assert_eq!(repaired.geo, Some(GeoPoint::new(3.0, 4.0).unwrap()));
}

#[tokio::test]
#[ignore]
async fn pg_update_geometries_fills_missing_geometry() {
    let storage = create_pg_storage().await;
    let city = storage.add_city(&NewCity::new("Bare", -3.5, 51.0)).await.unwrap();
    sqlx::query("UPDATE cities SET geo = NULL WHERE point_id = $1")
        .bind(city.point_id)
        .execute(storage.pool())
        .await
        .unwrap();

    storage.update_geometries().await.unwrap();
    let filled = storage.get_city(city.point_id).await.unwrap().unwrap();
    assert!(filled.geo_in_sync());
}

#[tokio::test]
#[ignore]
async fn pg_update_geometries_is_idempotent() {
    let storage = create_pg_storage().await;
    let city = storage.add_city(&NewCity::new("Steady", 151.21, -33.87)).await.unwrap();

    storage.update_geometries().await.unwrap();
    let first = storage.get_city(city.point_id).await.unwrap().unwrap();
    storage.update_geometries().await.unwrap();
    let second = storage.get_city(city.point_id).await.unwrap().unwrap();

    assert_eq!(first.geo, second.geo);
}
