use std::{convert::Infallible, sync::Arc};

use tera::Tera;
use warp::reply::Response;

use crate::{
    error::Error,
    web::{
        error_page, notice_redirect, optional, page_context, render, required, required_id,
        see_other, NoticeQuery,
    },
};

use super::{
    db::LeagueDb,
    models::{EquipoForm, TorneoForm, UsuarioForm},
};

pub async fn list_torneos(
    query: NoticeQuery,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return Ok(error_page(&e)),
    };

    let mut ctx = page_context(query.aviso.as_deref());
    ctx.insert("torneos", &torneos);
    Ok(render(&tera, "league/torneos.html", &ctx))
}

/// Tournament form page; the creator select needs the user list.
async fn crear_torneo_page(db: &LeagueDb, tera: &Tera, aviso: Option<&str>) -> Response {
    let usuarios = match db.get_usuarios().await {
        Ok(usuarios) => usuarios,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("usuarios", &usuarios);
    render(tera, "league/crear_torneo.html", &ctx)
}

pub async fn crear_torneo_form(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(crear_torneo_page(&db, &tera, None).await)
}

fn torneo_fields(
    form: &TorneoForm,
) -> Result<(String, String, Option<String>, Option<i64>), Error> {
    let nombre = required(&form.nombre, "nombre")?;
    let fecha = required(&form.fecha, "fecha")?;
    let lugar = optional(&form.lugar);
    let creador_id = match optional(&form.creador_id) {
        Some(raw) => Some(
            raw.parse()
                .map_err(|_| Error::validation("El campo creador no es válido"))?,
        ),
        None => None,
    };
    Ok((nombre, fecha, lugar, creador_id))
}

pub async fn crear_torneo(
    form: TorneoForm,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (nombre, fecha, lugar, creador_id) = match torneo_fields(&form) {
        Ok(fields) => fields,
        Err(e) => return Ok(crear_torneo_page(&db, &tera, Some(&e.to_string())).await),
    };

    match db
        .add_torneo(&nombre, &fecha, lugar.as_deref(), creador_id)
        .await
    {
        Ok(_) => Ok(see_other("/")),
        Err(e) => {
            log::warn!("failed to create tournament: {}", e);
            Ok(crear_torneo_page(&db, &tera, Some(&e.to_string())).await)
        }
    }
}

/// Edit form pre-filled from the stored row. Submitted values are never
/// echoed back; a failed submit re-reads the row.
async fn editar_torneo_page(db: &LeagueDb, tera: &Tera, id: i64, aviso: Option<&str>) -> Response {
    let torneo = match db.get_torneo(id).await {
        Ok(Some(torneo)) => torneo,
        Ok(None) => return notice_redirect("/", "Torneo no encontrado"),
        Err(e) => return error_page(&e),
    };
    let usuarios = match db.get_usuarios().await {
        Ok(usuarios) => usuarios,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    // Sentinel for "no creator" keeps the template comparison type-stable.
    ctx.insert("creador_sel", &torneo.creador_id.unwrap_or(-1));
    ctx.insert("torneo", &torneo);
    ctx.insert("usuarios", &usuarios);
    render(tera, "league/editar_torneo.html", &ctx)
}

pub async fn editar_torneo_form(
    id: i64,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(editar_torneo_page(&db, &tera, id, None).await)
}

pub async fn editar_torneo(
    id: i64,
    form: TorneoForm,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (nombre, fecha, lugar, creador_id) = match torneo_fields(&form) {
        Ok(fields) => fields,
        Err(e) => return Ok(editar_torneo_page(&db, &tera, id, Some(&e.to_string())).await),
    };

    match db
        .update_torneo(id, &nombre, &fecha, lugar.as_deref(), creador_id)
        .await
    {
        Ok(()) => Ok(see_other("/")),
        Err(e) => {
            log::warn!("failed to update tournament {}: {}", id, e);
            Ok(editar_torneo_page(&db, &tera, id, Some(&e.to_string())).await)
        }
    }
}

pub async fn eliminar_torneo(id: i64, db: Arc<LeagueDb>) -> Result<Response, Infallible> {
    match db.delete_torneo(id).await {
        Ok(()) => Ok(see_other("/")),
        Err(e) => {
            log::warn!("failed to delete tournament {}: {}", id, e);
            Ok(notice_redirect("/", &e.to_string()))
        }
    }
}

async fn crear_usuario_page(db: &LeagueDb, tera: &Tera, aviso: Option<&str>) -> Response {
    let usuarios = match db.get_usuarios().await {
        Ok(usuarios) => usuarios,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("usuarios", &usuarios);
    render(tera, "league/crear_usuario.html", &ctx)
}

pub async fn crear_usuario_form(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(crear_usuario_page(&db, &tera, None).await)
}

pub async fn crear_usuario(
    form: UsuarioForm,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let fields = required(&form.nombre, "nombre")
        .and_then(|nombre| Ok((nombre, required(&form.email, "email")?)));
    let (nombre, email) = match fields {
        Ok(fields) => fields,
        Err(e) => return Ok(crear_usuario_page(&db, &tera, Some(&e.to_string())).await),
    };

    match db.add_usuario(&nombre, &email).await {
        Ok(_) => Ok(see_other("/")),
        Err(e) => {
            log::warn!("failed to create user: {}", e);
            Ok(crear_usuario_page(&db, &tera, Some(&e.to_string())).await)
        }
    }
}

pub async fn list_equipos(
    query: NoticeQuery,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let equipos = match db.get_equipos().await {
        Ok(equipos) => equipos,
        Err(e) => return Ok(error_page(&e)),
    };

    let mut ctx = page_context(query.aviso.as_deref());
    ctx.insert("equipos", &equipos);
    Ok(render(&tera, "league/equipos.html", &ctx))
}

async fn crear_equipo_page(db: &LeagueDb, tera: &Tera, aviso: Option<&str>) -> Response {
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("torneos", &torneos);
    render(tera, "league/crear_equipo.html", &ctx)
}

pub async fn crear_equipo_form(
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(crear_equipo_page(&db, &tera, None).await)
}

fn equipo_fields(form: &EquipoForm) -> Result<(String, i64), Error> {
    Ok((
        required(&form.nombre, "nombre")?,
        required_id(&form.torneo_id, "torneo")?,
    ))
}

pub async fn crear_equipo(
    form: EquipoForm,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (nombre, torneo_id) = match equipo_fields(&form) {
        Ok(fields) => fields,
        Err(e) => return Ok(crear_equipo_page(&db, &tera, Some(&e.to_string())).await),
    };

    match db.add_equipo(&nombre, torneo_id).await {
        Ok(_) => Ok(see_other("/equipos")),
        Err(e) => {
            log::warn!("failed to create team: {}", e);
            Ok(crear_equipo_page(&db, &tera, Some(&e.to_string())).await)
        }
    }
}

async fn editar_equipo_page(db: &LeagueDb, tera: &Tera, id: i64, aviso: Option<&str>) -> Response {
    let equipo = match db.get_equipo(id).await {
        Ok(Some(equipo)) => equipo,
        Ok(None) => return notice_redirect("/equipos", "Equipo no encontrado"),
        Err(e) => return error_page(&e),
    };
    let torneos = match db.get_torneos().await {
        Ok(torneos) => torneos,
        Err(e) => return error_page(&e),
    };

    let mut ctx = page_context(aviso);
    ctx.insert("equipo", &equipo);
    ctx.insert("torneos", &torneos);
    render(tera, "league/editar_equipo.html", &ctx)
}

pub async fn editar_equipo_form(
    id: i64,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    Ok(editar_equipo_page(&db, &tera, id, None).await)
}

pub async fn editar_equipo(
    id: i64,
    form: EquipoForm,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let (nombre, torneo_id) = match equipo_fields(&form) {
        Ok(fields) => fields,
        Err(e) => return Ok(editar_equipo_page(&db, &tera, id, Some(&e.to_string())).await),
    };

    match db.update_equipo(id, &nombre, torneo_id).await {
        Ok(()) => Ok(see_other("/equipos")),
        Err(e) => {
            log::warn!("failed to update team {}: {}", id, e);
            Ok(editar_equipo_page(&db, &tera, id, Some(&e.to_string())).await)
        }
    }
}

pub async fn eliminar_equipo(id: i64, db: Arc<LeagueDb>) -> Result<Response, Infallible> {
    match db.delete_equipo(id).await {
        Ok(()) => Ok(see_other("/equipos")),
        Err(e) => {
            log::warn!("failed to delete team {}: {}", id, e);
            Ok(notice_redirect("/equipos", &e.to_string()))
        }
    }
}

pub async fn torneo_detalle(
    id: i64,
    db: Arc<LeagueDb>,
    tera: Arc<Tera>,
) -> Result<Response, Infallible> {
    let torneo = match db.get_torneo(id).await {
        Ok(Some(torneo)) => torneo,
        Ok(None) => return Ok(notice_redirect("/", "Torneo no encontrado")),
        Err(e) => return Ok(error_page(&e)),
    };
    let equipos = match db.get_equipos_de_torneo(id).await {
        Ok(equipos) => equipos,
        Err(e) => return Ok(error_page(&e)),
    };

    let mut ctx = page_context(None);
    ctx.insert("torneo", &torneo);
    ctx.insert("equipos", &equipos);
    Ok(render(&tera, "league/torneo.html", &ctx))
}
