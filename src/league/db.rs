use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::Error;

use super::models::{Equipo, EquipoConTorneo, Torneo, TorneoConCreador, Usuario};

/// Storage handle for the league app. Unlike the scores app this one turns
/// the foreign-key pragma on: the team-to-tournament cascade is live, and an
/// insert naming a missing parent is rejected by the engine.
pub struct LeagueDb {
    db: SqlitePool,
}

impl LeagueDb {
    pub async fn init(file: &Path) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(file)
            .create_if_missing(true)
            .foreign_keys(true);
        let db = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query(
            "create table if not exists usuarios(
                        id integer primary key autoincrement,
                        nombre text not null,
                        email text not null unique
                    );",
        )
        .execute(&db)
        .await?;

        sqlx::query(
            "create table if not exists torneos(
                        id integer primary key autoincrement,
                        nombre text not null,
                        fecha text not null,
                        lugar text,
                        creador_id integer,
                        foreign key(creador_id) references usuarios(id)
                    );",
        )
        .execute(&db)
        .await?;

        sqlx::query(
            "create table if not exists equipos(
                        id integer primary key autoincrement,
                        nombre text not null,
                        torneo_id integer not null,
                        foreign key(torneo_id) references torneos(id) on delete cascade
                    );",
        )
        .execute(&db)
        .await?;

        Ok(LeagueDb { db })
    }

    pub async fn add_usuario(&self, nombre: &str, email: &str) -> Result<i64, Error> {
        log::debug!("Creating user {}", email);
        let result = sqlx::query("insert into usuarios(nombre, email) values(?, ?)")
            .bind(nombre)
            .bind(email)
            .execute(&self.db)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_usuarios(&self) -> Result<Vec<Usuario>, Error> {
        Ok(sqlx::query_as("select * from usuarios")
            .fetch_all(&self.db)
            .await?)
    }

    pub async fn add_torneo(
        &self,
        nombre: &str,
        fecha: &str,
        lugar: Option<&str>,
        creador_id: Option<i64>,
    ) -> Result<i64, Error> {
        log::debug!("Creating tournament {}", nombre);
        let result = sqlx::query(
            "insert into torneos(nombre, fecha, lugar, creador_id) values(?, ?, ?, ?)",
        )
        .bind(nombre)
        .bind(fecha)
        .bind(lugar)
        .bind(creador_id)
        .execute(&self.db)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Tournaments with the creator's name joined in for display. The left
    /// join keeps tournaments without a creator in the listing.
    pub async fn get_torneos(&self) -> Result<Vec<TorneoConCreador>, Error> {
        Ok(sqlx::query_as(
            "select t.id, t.nombre, t.fecha, t.lugar,
                    u.nombre as creador
                from torneos t
                left join usuarios u on t.creador_id = u.id",
        )
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn get_torneo(&self, id: i64) -> Result<Option<Torneo>, Error> {
        Ok(sqlx::query_as("select * from torneos where id = ? limit 1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?)
    }

    /// Unconditional overwrite of the named columns; last writer wins.
    pub async fn update_torneo(
        &self,
        id: i64,
        nombre: &str,
        fecha: &str,
        lugar: Option<&str>,
        creador_id: Option<i64>,
    ) -> Result<(), Error> {
        Ok(sqlx::query(
            "update torneos set nombre = ?, fecha = ?, lugar = ?, creador_id = ? where id = ?",
        )
        .bind(nombre)
        .bind(fecha)
        .bind(lugar)
        .bind(creador_id)
        .bind(id)
        .execute(&self.db)
        .await
        .map(|_| ())?)
    }

    /// Deletes the tournament; the schema cascades the delete to its teams.
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

    pub async fn get_equipos_de_torneo(&self, torneo_id: i64) -> Result<Vec<Equipo>, Error> {
        Ok(sqlx::query_as("select * from equipos where torneo_id = ?")
            .bind(torneo_id)
            .fetch_all(&self.db)
            .await?)
    }

    /// Overwrites name and tournament, re-parenting the team if asked.
    pub async fn update_equipo(
        &self,
        id: i64,
        nombre: &str,
        torneo_id: i64,
    ) -> Result<(), Error> {
        Ok(
            sqlx::query("update equipos set nombre = ?, torneo_id = ? where id = ?")
                .bind(nombre)
                .bind(torneo_id)
                .bind(id)
                .execute(&self.db)
                .await
                .map(|_| ())?,
        )
    }

    pub async fn delete_equipo(&self, id: i64) -> Result<(), Error> {
        Ok(sqlx::query("delete from equipos where id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map(|_| ())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    async fn scratch_db() -> (tempfile::TempDir, LeagueDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = LeagueDb::init(&dir.path().join("liga.db")).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let (_dir, db) = scratch_db().await;
        db.add_usuario("Ana", "ana@example.com").await.unwrap();

        let err = db.add_usuario("Otra Ana", "ana@example.com").await;
        match err {
            Err(Error::Constraint(msg)) => assert!(msg.to_lowercase().contains("unique")),
            other => panic!("expected constraint violation, got {:?}", other),
        }
        // The failed insert must not have changed the user count.
        assert_eq!(db.get_usuarios().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn team_with_missing_tournament_is_rejected() {
        let (_dir, db) = scratch_db().await;
        match db.add_equipo("Lions", 9999).await {
            Err(Error::Constraint(msg)) => assert!(msg.to_lowercase().contains("foreign key")),
            other => panic!("expected constraint violation, got {:?}", other),
        }
        assert!(db.get_equipos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tournament_delete_cascades_to_teams() {
        let (_dir, db) = scratch_db().await;
        let torneo = db
            .add_torneo("Copa Verano", "2024-07-01", Some("Madrid"), None)
            .await
            .unwrap();
        let equipo = db.add_equipo("Lions", torneo).await.unwrap();

        db.delete_torneo(torneo).await.unwrap();

        assert!(db.get_torneo(torneo).await.unwrap().is_none());
        assert!(db.get_equipo(equipo).await.unwrap().is_none());
        assert!(db.get_equipos_de_torneo(torneo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_joins_creator_name_and_keeps_creatorless_rows() {
        let (_dir, db) = scratch_db().await;
        let ana = db.add_usuario("Ana", "ana@example.com").await.unwrap();
        db.add_torneo("Copa Ana", "2024-05-01", None, Some(ana))
            .await
            .unwrap();
        db.add_torneo("Copa Anónima", "2024-06-01", None, None)
            .await
            .unwrap();

        let torneos = db.get_torneos().await.unwrap();
        assert_eq!(torneos.len(), 2);
        let con_creador = torneos.iter().find(|t| t.nombre == "Copa Ana").unwrap();
        assert_eq!(con_creador.creador.as_deref(), Some("Ana"));
        let sin_creador = torneos.iter().find(|t| t.nombre == "Copa Anónima").unwrap();
        assert!(sin_creador.creador.is_none());
    }

    #[tokio::test]
    async fn update_overwrites_and_reparents() {
        let (_dir, db) = scratch_db().await;
        let t1 = db
            .add_torneo("Copa A", "2024-01-01", None, None)
            .await
            .unwrap();
        let t2 = db
            .add_torneo("Copa B", "2024-02-01", None, None)
            .await
            .unwrap();
        let equipo = db.add_equipo("Lions", t1).await.unwrap();

        db.update_torneo(t1, "Copa A2", "2024-01-15", Some("Sevilla"), None)
            .await
            .unwrap();
        db.update_equipo(equipo, "Leones", t2).await.unwrap();

        let torneo = db.get_torneo(t1).await.unwrap().unwrap();
        assert_eq!(torneo.nombre, "Copa A2");
        assert_eq!(torneo.lugar.as_deref(), Some("Sevilla"));

        let equipo = db.get_equipo(equipo).await.unwrap().unwrap();
        assert_eq!(equipo.nombre, "Leones");
        assert_eq!(equipo.torneo_id, t2);
    }

    #[tokio::test]
    async fn deleting_a_creator_referenced_by_a_tournament_is_rejected() {
        // The creator reference is weak but still a live foreign key, and it
        // declares no cascade.
        let (_dir, db) = scratch_db().await;
        let ana = db.add_usuario("Ana", "ana@example.com").await.unwrap();
        db.add_torneo("Copa Ana", "2024-05-01", None, Some(ana))
            .await
            .unwrap();

        let result = sqlx::query("delete from usuarios where id = ?")
            .bind(ana)
            .execute(&db.db)
            .await;
        assert!(result.is_err());
    }
}
