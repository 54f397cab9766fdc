use std::{convert::Infallible, sync::Arc};

use tera::Tera;
use warp::reply::Response;

use crate::{
    error::Error,
    web::{
        error_page, notice_redirect, page_context, render, required, required_id, see_other,
        NoticeQuery,
    },
};

use super::{
    db::ScoresDb,
    models::{EquipoForm, PartidoForm, TorneoForm},
};

pub async fn index(tera: Arc<Tera>) -> Result<Response, Infallible> {
    Ok(render(&tera, "scores/index.html", &page_context(None)))
}

pub async fn list_torneos(
    query: NoticeQuery,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return Ok(error_page(&e)),
    };

    let mut ctx = page_context(query.aviso.as_deref());
    ctx.insert("torneos", &torneos);
    Ok(render(&tera, "scores/torneos.html", &ctx))
}

pub async fn crear_torneo_form(tera: Arc<Tera>) -> Result<Response, Infallible> {
    Ok(render(&tera, "scores/crear_torneo.html", &page_context(None)))
}

fn torneo_fields(form: &TorneoForm) -> Result<(String, String, String), Error> {
    Ok((
        required(&form.nombre, "nombre")?,
        required(&form.inicio, "inicio")?,
        required(&form.fin, "fin")?,
    ))
}

pub async fn crear_torneo(
    form: TorneoForm,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (nombre, inicio, fin) = match torneo_fields(&form) {
        Ok(fields) => fields,
        Err(e) => {
            return Ok(render(
                &tera,
                "scores/crear_torneo.html",
                &page_context(Some(&e.to_string())),
            ))
        }
    };

    match db.add_torneo(&nombre, &inicio, &fin).await {
        Ok(_) => Ok(see_other("/torneos")),
        Err(e) => {
            log::warn!("failed to create tournament: {}", e);
            Ok(render(
                &tera,
                "scores/crear_torneo.html",
                &page_context(Some(&e.to_string())),
            ))
        }
    }
}

pub async fn eliminar_torneo(id: i64, db: Arc<ScoresDb>) -> Result<Response, Infallible> {
    match db.delete_torneo(id).await {
        Ok(()) => Ok(see_other("/torneos")),
        Err(e) => {
            log::warn!("failed to delete tournament {}: {}", id, e);
            Ok(notice_redirect("/torneos", &e.to_string()))
        }
    }
}

/// The team listing doubles as the creation form, so both the GET route and
/// a failed POST land here.
async fn equipos_page(db: &ScoresDb, tera: &Tera, aviso: Option<&str>) -> Response {
    let equipos = match db.get_equipos().await {
        Ok(equipos) => equipos,
        Err(e) => return error_page(&e),
    };
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("equipos", &equipos);
    ctx.insert("torneos", &torneos);
    render(tera, "scores/equipos.html", &ctx)
}

pub async fn list_equipos(
    query: NoticeQuery,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(equipos_page(&db, &tera, query.aviso.as_deref()).await)
}

pub async fn crear_equipo(
    form: EquipoForm,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let fields = required(&form.nombre, "nombre")
        .and_then(|nombre| Ok((nombre, required_id(&form.torneo, "torneo")?)));
    let (nombre, torneo_id) = match fields {
        Ok(fields) => fields,
        Err(e) => return Ok(equipos_page(&db, &tera, Some(&e.to_string())).await),
    };

    match db.add_equipo(&nombre, torneo_id).await {
        Ok(_) => Ok(see_other("/equipos")),
        Err(e) => {
            log::warn!("failed to create team: {}", e);
            Ok(equipos_page(&db, &tera, Some(&e.to_string())).await)
        }
    }
}

async fn partidos_page(db: &ScoresDb, tera: &Tera, aviso: Option<&str>) -> Response {
    let partidos = match db.get_partidos().await {
        Ok(partidos) => partidos,
        Err(e) => return error_page(&e),
    };
    let equipos = match db.get_equipos().await {
        Ok(equipos) => equipos,
        Err(e) => return error_page(&e),
    };
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("partidos", &partidos);
    ctx.insert("equipos", &equipos);
    ctx.insert("torneos", &torneos);
    render(tera, "scores/partidos.html", &ctx)
}

pub async fn list_partidos(
    query: NoticeQuery,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(partidos_page(&db, &tera, query.aviso.as_deref()).await)
}

fn partido_fields(form: &PartidoForm) -> Result<(i64, i64, i64, i64, String, i64), Error> {
    Ok((
        required_id(&form.equipo1, "equipo1")?,
        required_id(&form.equipo2, "equipo2")?,
        required_id(&form.goles1, "goles1")?,
        required_id(&form.goles2, "goles2")?,
        required(&form.fecha, "fecha")?,
        required_id(&form.torneo, "torneo")?,
    ))
}

pub async fn crear_partido(
    form: PartidoForm,
    db: Arc<ScoresDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (equipo1, equipo2, goles1, goles2, fecha, torneo) = match partido_fields(&form) {
        Ok(fields) => fields,
        Err(e) => return Ok(partidos_page(&db, &tera, Some(&e.to_string())).await),
    };

    match db
        .add_partido(equipo1, equipo2, goles1, goles2, &fecha, torneo)
        .await
    {
        Ok(_) => Ok(see_other("/partidos")),
        Err(e) => {
            log::warn!("failed to create match: {}", e);
            Ok(partidos_page(&db, &tera, Some(&e.to_string())).await)
        }
    }
}
