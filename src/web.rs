use std::{convert::Infallible, path::Path, sync::Arc};

use serde::Deserialize;
use tera::{Context, Tera};
use warp::{
    http::{StatusCode, Uri},
    reject::Rejection,
    reply::Response,
    Filter, Reply,
};

use crate::error::Error;

/// Query parameters shared by the listing pages. A redirect that needs to
/// surface a message once carries it here instead of in session state.
#[derive(Deserialize, Debug, Default)]
pub struct NoticeQuery {
    pub aviso: Option<String>,
}

pub fn with_db<D: Send + Sync>(
    db: Arc<D>,
) -> impl Filter<Extract = (Arc<D>,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}

pub fn with_templates(
    tera: Arc<Tera>,
) -> impl Filter<Extract = (Arc<Tera>,), Error = Infallible> + Clone {
    warp::any().map(move || tera.clone())
}

/// Loads every HTML template under `dir` once, at startup.
pub fn load_templates(dir: &Path) -> anyhow::Result<Tera> {
    let glob = dir.join("**/*.html");
    Ok(Tera::new(glob.to_str().unwrap_or("templates/**/*.html"))?)
}

/// Fresh template context with the one value every page expects.
pub fn page_context(aviso: Option<&str>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("aviso", &aviso);
    ctx
}

pub fn render(tera: &Tera, name: &str, ctx: &Context) -> Response {
    match tera.render(name, ctx) {
        Ok(body) => warp::reply::html(body).into_response(),
        Err(e) => {
            log::error!("failed to render {}: {}", name, e);
            warp::reply::with_status(
                "error interno del servidor".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}

/// Storage failure on a read path: log it and answer 500. The process
/// itself keeps serving.
pub fn error_page(err: &Error) -> Response {
    log::warn!("{}", err);
    warp::reply::with_status(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

/// Redirect-after-post: 303 so a refresh of the target never resubmits.
pub fn see_other(path: &str) -> Response {
    let uri = Uri::try_from(path).unwrap_or_else(|_| Uri::from_static("/"));
    warp::redirect::see_other(uri).into_response()
}

/// Redirects to `path` with a one-shot notice in the query string.
pub fn notice_redirect(path: &str, aviso: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("aviso", aviso)
        .finish();
    see_other(&format!("{}?{}", path, query))
}

/// Presence validation: the field must be present and non-blank.
pub fn required(value: &Option<String>, label: &str) -> Result<String, Error> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::Validation(format!(
            "El campo {} es obligatorio",
            label
        ))),
    }
}

/// Like [`required`], for fields the storage layer expects as an integer id.
pub fn required_id(value: &Option<String>, label: &str) -> Result<i64, Error> {
    required(value, label)?
        .parse()
        .map_err(|_| Error::Validation(format!("El campo {} no es válido", label)))
}

/// Optional field: blank collapses to none.
pub fn optional(value: &Option<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, msg) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "página no encontrada".to_string())
    } else if let Some(err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        log::error!("{}", err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else if let Some(err) = err.find::<warp::reject::MethodNotAllowed>() {
        log::error!("Method Not Allowed: {}", err);
        (StatusCode::METHOD_NOT_ALLOWED, err.to_string())
    } else if let Some(err) = err.find::<warp::reject::InvalidQuery>() {
        log::error!("Invalid Query: {}", err);
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        log::error!("Unhandled Rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "error interno del servidor".to_string(),
        )
    };

    Ok(warp::reply::with_status(warp::reply::html(msg), code))
}

pub async fn run_http_server<F>(routes: F, port: u16) -> anyhow::Result<()>
where
    F: Filter<Error = Rejection> + Clone + Send + Sync + 'static,
    F::Extract: Reply,
{
    warp::serve(routes.recover(handle_rejection))
        .run(([0, 0, 0, 0], port))
        .await;

    Ok(())
}
