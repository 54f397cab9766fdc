use std::{path::Path, sync::Arc};

use tempfile::TempDir;
use tera::Tera;

use torneos::{league, web};

async fn setup() -> (TempDir, Arc<league::db::LeagueDb>, Arc<Tera>) {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(
        league::db::LeagueDb::init(&dir.path().join("liga.db"))
            .await
            .unwrap(),
    );
    let tera = Arc::new(web::load_templates(Path::new("templates")).unwrap());
    (dir, db, tera)
}

#[tokio::test]
async fn create_team_redirects_and_listing_joins_tournament_name() {
    let (_dir, db, tera) = setup().await;
    let torneo = db
        .add_torneo("Copa Verano", "2024-07-01", Some("Madrid"), None)
        .await
        .unwrap();

    let routes = league::filters::routes(db, tera);
    let resp = warp::test::request()
        .method("POST")
        .path("/equipos/crear")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(format!("nombre=Lions&torneo_id={}", torneo))
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/equipos");

    let resp = warp::test::request()
        .method("GET")
        .path("/equipos")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("Lions"));
    assert!(body.contains("Copa Verano"));
}

#[tokio::test]
async fn duplicate_email_surfaces_engine_message_and_keeps_count() {
    let (_dir, db, tera) = setup().await;
    let routes = league::filters::routes(db.clone(), tera);

    let resp = warp::test::request()
        .method("POST")
        .path("/usuarios/crear")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("nombre=Ana&email=ana%40example.com")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 303);

    let resp = warp::test::request()
        .method("POST")
        .path("/usuarios/crear")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("nombre=Otra&email=ana%40example.com")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("UNIQUE constraint failed"));

    assert_eq!(db.get_usuarios().await.unwrap().len(), 1);
}

#[tokio::test]
async fn editing_with_blank_required_field_leaves_row_unchanged() {
    let (_dir, db, tera) = setup().await;
    let torneo = db
        .add_torneo("Copa Verano", "2024-07-01", Some("Madrid"), None)
        .await
        .unwrap();

    let routes = league::filters::routes(db.clone(), tera);
    let resp = warp::test::request()
        .method("POST")
        .path(&format!("/editar/{}", torneo))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("nombre=&fecha=2024-08-01&lugar=Sevilla")
        .reply(&routes)
        .await;

    // The edit form comes back with a notice and the stored values.
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("obligatorio"));
    assert!(body.contains("Copa Verano"));

    let row = db.get_torneo(torneo).await.unwrap().unwrap();
    assert_eq!(row.nombre, "Copa Verano");
    assert_eq!(row.fecha, "2024-07-01");
    assert_eq!(row.lugar.as_deref(), Some("Madrid"));
}

#[tokio::test]
async fn deleting_tournament_cascades_to_its_teams() {
    let (_dir, db, tera) = setup().await;
    let torneo = db
        .add_torneo("Copa Verano", "2024-07-01", None, None)
        .await
        .unwrap();
    db.add_equipo("Lions", torneo).await.unwrap();

    let routes = league::filters::routes(db.clone(), tera);
    let resp = warp::test::request()
        .method("GET")
        .path(&format!("/eliminar/{}", torneo))
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/");

    assert!(db.get_equipos_de_torneo(torneo).await.unwrap().is_empty());

    let resp = warp::test::request()
        .method("GET")
        .path("/equipos")
        .reply(&routes)
        .await;
    let body = String::from_utf8_lossy(resp.body());
    assert!(!body.contains("Lions"));
}

#[tokio::test]
async fn team_against_missing_tournament_is_rejected_with_notice() {
    let (_dir, db, tera) = setup().await;
    let routes = league::filters::routes(db.clone(), tera);

    let resp = warp::test::request()
        .method("POST")
        .path("/equipos/crear")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("nombre=Lions&torneo_id=424242")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("FOREIGN KEY constraint failed"));

    assert!(db.get_equipos().await.unwrap().is_empty());
}

#[tokio::test]
async fn editing_missing_tournament_redirects_with_notice() {
    let (_dir, db, tera) = setup().await;
    let routes = league::filters::routes(db, tera);

    let resp = warp::test::request()
        .method("GET")
        .path("/editar/999")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 303);
    let location = resp.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("/?aviso="));

    // The listing page shows the carried notice once.
    let resp = warp::test::request()
        .method("GET")
        .path(location)
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("Torneo no encontrado"));
}

#[tokio::test]
async fn tournament_detail_lists_its_teams() {
    let (_dir, db, tera) = setup().await;
    let torneo = db
        .add_torneo("Copa Verano", "2024-07-01", Some("Madrid"), None)
        .await
        .unwrap();
    db.add_equipo("Lions", torneo).await.unwrap();
    db.add_equipo("Tigres", torneo).await.unwrap();

    let routes = league::filters::routes(db, tera);
    let resp = warp::test::request()
        .method("GET")
        .path(&format!("/torneo/{}", torneo))
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), 200);
    let body = String::from_utf8_lossy(resp.body());
    assert!(body.contains("Copa Verano"));
    assert!(body.contains("Lions"));
    assert!(body.contains("Tigres"));
}
