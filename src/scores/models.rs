use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A tournament with a start and end date. Dates are stored as opaque text,
/// exactly as submitted.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Torneo {
    pub id: i64,
    pub nombre: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

/// A team row as stored, without the display join.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Equipo {
    pub id: i64,
    pub nombre: String,
    pub torneo_id: i64,
}

/// A team joined with its tournament's name for the listing page.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EquipoConTorneo {
    pub id: i64,
    pub nombre: String,
    pub torneo_id: i64,
    pub torneo: String,
}

/// A recorded match as stored. Kept retrievable by id even when its
/// tournament or teams have been deleted out from under it.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Partido {
    pub id: i64,
    pub equipo1_id: i64,
    pub equipo2_id: i64,
    pub goles1: i64,
    pub goles2: i64,
    pub fecha: String,
    pub torneo_id: i64,
}

/// A match joined with both team names and the tournament name.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PartidoDetalle {
    pub id: i64,
    pub equipo1: String,
    pub equipo2: String,
    pub goles1: i64,
    pub goles2: i64,
    pub fecha: String,
    pub torneo: String,
}

/// Form body for `/torneos/create`. Fields are optional so presence
/// validation can tell a missing field from a blank one.
#[derive(Deserialize, Debug)]
pub struct TorneoForm {
    pub nombre: Option<String>,
    pub inicio: Option<String>,
    pub fin: Option<String>,
}

/// Form body for `/equipos/create`.
#[derive(Deserialize, Debug)]
pub struct EquipoForm {
    pub nombre: Option<String>,
    pub torneo: Option<String>,
}

/// Form body for `/partidos/create`.
#[derive(Deserialize, Debug)]
pub struct PartidoForm {
    pub equipo1: Option<String>,
    pub equipo2: Option<String>,
    pub goles1: Option<String>,
    pub goles2: Option<String>,
    pub fecha: Option<String>,
    pub torneo: Option<String>,
}
