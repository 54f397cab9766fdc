use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::Error;

use super::models::{Equipo, EquipoConTorneo, Partido, PartidoDetalle, Torneo};

/// Storage handle for the scores app. Foreign keys are declared in the
/// schema but the pragma stays off: orphan teams and dangling match
/// references are possible, and existing databases rely on that.
pub struct ScoresDb {
    db: SqlitePool,
}

impl ScoresDb {
    pub async fn init(file: &Path) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(file)
            .create_if_missing(true)
            .foreign_keys(false);
        let db = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query(
            "create table if not exists users(
                        id integer primary key autoincrement,
                        name text,
                        email text
                    );",
        )
        .execute(&db)
        .await?;

        sqlx::query(
            "create table if not exists torneos(
                        id integer primary key autoincrement,
                        nombre text,
                        fecha_inicio text,
                        fecha_fin text
                    );",
        )
        .execute(&db)
        .await?;

        sqlx::query(
            "create table if not exists equipos(
                        id integer primary key autoincrement,
                        nombre text,
                        torneo_id integer,
                        foreign key(torneo_id) references torneos(id)
                    );",
        )
        .execute(&db)
        .await?;

        sqlx::query(
            "create table if not exists partidos(
                        id integer primary key autoincrement,
                        equipo1_id integer,
                        equipo2_id integer,
                        goles1 integer,
                        goles2 integer,
                        fecha text,
                        torneo_id integer,
                        foreign key(equipo1_id) references equipos(id),
                        foreign key(equipo2_id) references equipos(id),
                        foreign key(torneo_id) references torneos(id)
                    );",
        )
        .execute(&db)
        .await?;

        Ok(ScoresDb { db })
    }

    pub async fn add_torneo(
        &self,
        nombre: &str,
        inicio: &str,
        fin: &str,
    ) -> Result<i64, Error> {
        log::debug!("Creating tournament {}", nombre);
        let result =
            sqlx::query("insert into torneos(nombre, fecha_inicio, fecha_fin) values(?, ?, ?)")
                .bind(nombre)
                .bind(inicio)
                .bind(fin)
                .execute(&self.db)
                .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_torneos(&self) -> Result<Vec<Torneo>, Error> {
        Ok(sqlx::query_as("select * from torneos")
            .fetch_all(&self.db)
            .await?)
    }

    pub async fn get_torneo(&self, id: i64) -> Result<Option<Torneo>, Error> {
        Ok(sqlx::query_as("select * from torneos where id = ? limit 1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?)
    }

    pub async fn delete_torneo(&self, id: i64) -> Result<(), Error> {
        Ok(sqlx::query("delete from torneos where id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map(|_| ())?)
    }

    pub async fn add_equipo(&self, nombre: &str, torneo_id: i64) -> Result<i64, Error> {
        log::debug!("Creating team {} in tournament {}", nombre, torneo_id);
        let result = sqlx::query("insert into equipos(nombre, torneo_id) values(?, ?)")
            .bind(nombre)
            .bind(torneo_id)
            .execute(&self.db)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Teams joined with their tournament's name. A team whose tournament
    /// was deleted drops out of this listing but stays reachable by id.
    pub async fn get_equipos(&self) -> Result<Vec<EquipoConTorneo>, Error> {
        Ok(sqlx::query_as(
            "select equipos.id, equipos.nombre, equipos.torneo_id,
                    torneos.nombre as torneo
                from equipos
                join torneos on equipos.torneo_id = torneos.id",
        )
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn get_equipo(&self, id: i64) -> Result<Option<Equipo>, Error> {
        Ok(sqlx::query_as("select * from equipos where id = ? limit 1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?)
    }

    pub async fn add_partido(
        &self,
        equipo1_id: i64,
        equipo2_id: i64,
        goles1: i64,
        goles2: i64,
        fecha: &str,
        torneo_id: i64,
    ) -> Result<i64, Error> {
        let result = sqlx::query(
            "insert into partidos(equipo1_id, equipo2_id, goles1, goles2, fecha, torneo_id)
                values(?, ?, ?, ?, ?, ?)",
        )
        .bind(equipo1_id)
        .bind(equipo2_id)
        .bind(goles1)
        .bind(goles2)
        .bind(fecha)
        .bind(torneo_id)
        .execute(&self.db)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_partidos(&self) -> Result<Vec<PartidoDetalle>, Error> {
        Ok(sqlx::query_as(
            "select p.id,
                    e1.nombre as equipo1,
                    e2.nombre as equipo2,
                    p.goles1,
                    p.goles2,
                    p.fecha,
                    t.nombre as torneo
                from partidos p
                join equipos e1 on p.equipo1_id = e1.id
                join equipos e2 on p.equipo2_id = e2.id
                join torneos t on p.torneo_id = t.id",
        )
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn get_partido(&self, id: i64) -> Result<Option<Partido>, Error> {
        Ok(sqlx::query_as("select * from partidos where id = ? limit 1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?)
    }
}
