use std::sync::Arc;

use tera::Tera;
use warp::{reject::Rejection, Filter};

use crate::web::{with_db, with_templates, NoticeQuery};

use super::{
    db::LeagueDb,
    handlers,
    models::{EquipoForm, TorneoForm, UsuarioForm},
};

fn torneo_filters(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let list_torneos = warp::path::end()
        .and(warp::get())
        .and(warp::query::<NoticeQuery>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::list_torneos);

    let crear_form = warp::path!("crear")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_torneo_form);

    let crear = warp::path!("crear")
        .and(warp::post())
        .and(warp::body::form::<TorneoForm>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_torneo);

    let editar_form = warp::path!("editar" / i64)
        .and(warp::get())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::editar_torneo_form);

    let editar = warp::path!("editar" / i64)
        .and(warp::post())
        .and(warp::body::form::<TorneoForm>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::editar_torneo);

    // Deletes ride on plain GET links, same as the scores app.
    let eliminar = warp::path!("eliminar" / i64)
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(handlers::eliminar_torneo);

    let detalle = warp::path!("torneo" / i64)
        .and(warp::get())
        .and(with_db(db))
        .and(with_templates(tera))
        .and_then(handlers::torneo_detalle);

    list_torneos
        .or(crear_form)
        .or(crear)
        .or(editar_form)
        .or(editar)
        .or(eliminar)
        .or(detalle)
}

fn usuario_filters(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let crear_form = warp::path!("usuarios" / "crear")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_usuario_form);

    let crear = warp::path!("usuarios" / "crear")
        .and(warp::post())
        .and(warp::body::form::<UsuarioForm>())
        .and(with_db(db))
        .and(with_templates(tera))
        .and_then(handlers::crear_usuario);

    crear_form.or(crear)
}

fn equipo_filters(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    let list_equipos = warp::path!("equipos")
        .and(warp::get())
        .and(warp::query::<NoticeQuery>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::list_equipos);

    let crear_form = warp::path!("equipos" / "crear")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_equipo_form);

    let crear = warp::path!("equipos" / "crear")
        .and(warp::post())
        .and(warp::body::form::<EquipoForm>())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::crear_equipo);

    let editar_form = warp::path!("equipos" / "editar" / i64)
        .and(warp::get())
        .and(with_db(db.clone()))
        .and(with_templates(tera.clone()))
        .and_then(handlers::editar_equipo_form);

    let editar = warp::path!("equipos" / "editar" / i64)
        .and(warp::post())
        .and(warp::body::form::<EquipoForm>())
        .and(with_db(db.clone()))
        .and(with_templates(tera))
        .and_then(handlers::editar_equipo);

    let eliminar = warp::path!("equipos" / "eliminar" / i64)
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::eliminar_equipo);

    list_equipos
        .or(crear_form)
        .or(crear)
        .or(editar_form)
        .or(editar)
        .or(eliminar)
}

pub fn routes(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Rejection> + Clone {
    torneo_filters(db.clone(), tera.clone())
        .or(usuario_filters(db.clone(), tera.clone()))
        .or(equipo_filters(db, tera))
}
