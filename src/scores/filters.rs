use std::sync::Arc;

use tera::Tera;
use warp::{reject::Rejection, Filter};

use crate::web::{with_db, with_templates, NoticeQuery};

use super::{
    db::ScoresDb,
    handlers,
    models::{EquipoForm, PartidoForm, TorneoForm},
};

fn torneo_filters(
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let list_torneos = warp::path!("torneos")
        .and(warp::get())
        .and(warp::query::<NoticeQuery>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::list_torneos);

    let crear_torneo_form = warp::path!("torneos" / "create")
        .and(warp::get())
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_torneo_form);

    let crear_torneo = warp::path!("torneos" / "create")
        .and(warp::post())
        .and(warp::body::form::<TorneoForm>())
        .and(with_db(db.clone()))
        .and(with_templates(tera))
        .and_then(handlers::crear_torneo);

    // Deletes ride on plain GET links; every deployed page links them that
    // way, so the method stays.
    let eliminar_torneo = warp::path!("torneos" / "delete" / i64)
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::eliminar_torneo);

    list_torneos
        .or(crear_torneo_form)
        .or(crear_torneo)
        .or(eliminar_torneo)
}

fn equipo_filters(
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let list_equipos = warp::path!("equipos")
        .and(warp::get())
        .and(warp::query::<NoticeQuery>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::list_equipos);

    let crear_equipo = warp::path!("equipos" / "create")
        .and(warp::post())
        .and(warp::body::form::<EquipoForm>())
        .and(with_db(db))
        .and(with_templates(tera))
        .and_then(handlers::crear_equipo);

    list_equipos.or(crear_equipo)
}

fn partido_filters(
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let list_partidos = warp::path!("partidos")
        .and(warp::get())
        .and(warp::query::<NoticeQuery>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::list_partidos);

    let crear_partido = warp::path!("partidos" / "create")
        .and(warp::post())
        .and(warp::body::form::<PartidoForm>())
        .and(with_db(db))
        .and(with_templates(tera))
        .and_then(handlers::crear_partido);

    list_partidos.or(crear_partido)
}

pub fn routes(
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_templates(tera.clone()))
        .and_then(handlers::index);

    index
        .or(torneo_filters(db.clone(), tera.clone()))
        .or(equipo_filters(db.clone(), tera.clone()))
        .or(partido_filters(db, tera))
}
