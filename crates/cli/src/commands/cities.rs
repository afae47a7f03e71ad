//! One-shot city commands. Results are printed to stdout as pretty JSON.

use anyhow::Result;
use geostuff_core::NewCity;
use geostuff_storage::PgStorage;

use crate::open_service;

pub(crate) async fn init(database_url: &str) -> Result<()> {
    PgStorage::new(database_url).await?;
    println!("Connected to database.");
    Ok(())
}

pub(crate) async fn add(
    database_url: &str,
    location: String,
    longitude: f64,
    latitude: f64,
) -> Result<()> {
    let service = open_service(database_url).await?;
    let city = service.add_city(NewCity::new(location, longitude, latitude)).await?;
    println!("{}", serde_json::to_string_pretty(&city)?);
    Ok(())
}

pub(crate) async fn get(database_url: &str, point_id: i32) -> Result<()> {
    let service = open_service(database_url).await?;
    match service.get_city(point_id).await? {
        Some(city) => println!("{}", serde_json::to_string_pretty(&city)?),
        None => println!("City not found: {point_id}"),
    }
    Ok(())
}

pub(crate) async fn list(database_url: &str) -> Result<()> {
    let service = open_service(database_url).await?;
    let cities = service.list_cities().await?;
    println!("{}", serde_json::to_string_pretty(&cities)?);
    Ok(())
}

pub(crate) async fn nearby(database_url: &str, point_id: i32, radius: f64) -> Result<()> {
    let service = open_service(database_url).await?;
    let cities = service.nearby(point_id, radius).await?;
    println!("{}", serde_json::to_string_pretty(&cities)?);
    Ok(())
}

pub(crate) async fn update_geometries(database_url: &str) -> Result<()> {
    let service = open_service(database_url).await?;
    let updated = service.update_geometries().await?;
    println!("Updated geometry for {updated} cities.");
    Ok(())
}
