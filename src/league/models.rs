use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A registered user. The email is unique at the schema level; a duplicate
/// insert surfaces the engine's constraint message to the submitter.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

/// A tournament as stored. The creator is a weak reference: optional, and
/// never cascaded.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Torneo {
    pub id: i64,
    pub nombre: String,
    pub fecha: String,
    pub lugar: Option<String>,
    pub creador_id: Option<i64>,
}

/// A tournament joined with its creator's name for the listing page.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TorneoConCreador {
    pub id: i64,
    pub nombre: String,
    pub fecha: String,
    pub lugar: Option<String>,
    pub creador: Option<String>,
}

#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Equipo {
    pub id: i64,
    pub nombre: String,
    pub torneo_id: i64,
}

/// A team joined with its tournament's name.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EquipoConTorneo {
    pub id: i64,
    pub nombre: String,
    pub torneo_id: i64,
    pub torneo: String,
}

/// Form body for `/crear` and `/editar/<id>`. `lugar` and `creador_id` are
/// genuinely optional; the rest are presence-checked.
#[derive(Deserialize, Debug)]
pub struct TorneoForm {
    pub nombre: Option<String>,
    pub fecha: Option<String>,
    pub lugar: Option<String>,
    pub creador_id: Option<String>,
}

/// Form body for `/usuarios/crear`.
#[derive(Deserialize, Debug)]
pub struct UsuarioForm {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

/// Form body for `/equipos/crear` and `/equipos/editar/<id>`.
#[derive(Deserialize, Debug)]
pub struct EquipoForm {
    pub nombre: Option<String>,
    pub torneo_id: Option<String>,
}
