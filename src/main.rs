use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};

use torneos::{league, scores, web};

#[derive(Parser, Debug)]
#[command(name = "torneos")]
#[command(version = "0.1")]
#[command(about = "A pair of small web apps for managing sports tournaments.", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: RunType,
}

#[derive(Subcommand, Debug)]
enum RunType {
    /// Serve the scores app: tournaments, teams and recorded match results.
    Scores {
        /// Location of the SQLite database file, created on first run.
        #[arg(short, long, default_value = "torneos.db")]
        db_file: PathBuf,

        /// Directory containing the HTML templates.
        #[arg(short, long, default_value = "templates")]
        templates: PathBuf,

        /// Port to serve on.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Serve the league app: users, tournaments and editable teams.
    League {
        /// Location of the SQLite database file, created on first run.
        #[arg(short, long, default_value = "liga.db")]
        db_file: PathBuf,

        /// Directory containing the HTML templates.
        #[arg(short, long, default_value = "templates")]
        templates: PathBuf,

        /// Port to serve on.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        RunType::Scores {
            db_file,
            templates,
            port,
        } => {
            let db = Arc::new(scores::db::ScoresDb::init(&db_file).await?);
            let tera = Arc::new(web::load_templates(&templates)?);

            log::info!("serving scores app on port {}", port);
            web::run_http_server(scores::filters::routes(db, tera), port).await
        }
        RunType::League {
            db_file,
            templates,
            port,
        } => {
            let db = Arc::new(league::db::LeagueDb::init(&db_file).await?);
            let tera = Arc::new(web::load_templates(&templates)?);

            log::info!("serving league app on port {}", port);
            web::run_http_server(league::filters::routes(db, tera), port).await
        }
    }
}
