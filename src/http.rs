//! HTTP front-end over one shared [`Session`].
//!
//! `GET /api/health` answers `ok`. `GET /api/shoot?row=&col=` fires for the
//! seated player at its target (0-based, `row` is y and `col` is x) and
//! answers with the shot result as JSON. Requests are serialized through a
//! `tokio::sync::Mutex`.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::core::{Coordinate, ErrorKind, GameError, Phase, Session, ShotResult};

pub type SessionRef = Arc<Mutex<Session>>;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShootQuery {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResponse {
    pub result: ShotResult,
    pub row: usize,
    pub col: usize,
    pub shooter: String,
    pub finished: bool,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn shared(session: Session) -> SessionRef {
    Arc::new(Mutex::new(session))
}

fn with_session(session: SessionRef) -> impl Filter<Extract = (SessionRef,), Error = Infallible> + Clone {
    warp::any().map(move || session.clone())
}

pub async fn health_handler() -> Result<impl Reply, Infallible> {
    Ok("ok")
}

fn error_reply(err: &GameError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match err.kind() {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::IllegalState => StatusCode::CONFLICT,
    };
    let body = ErrorResponse {
        error: err.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

pub async fn shoot_handler(query: ShootQuery, session: SessionRef) -> Result<impl Reply, Infallible> {
    let mut session = session.lock().await;
    let coordinate = Coordinate::new(query.col, query.row);
    let outcome = match session.play_shot(coordinate) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::warn!("rejected shot at row {} col {}: {}", query.row, query.col, e);
            return Ok(error_reply(&e));
        }
    };
    let game = session.game();
    let response = ShotResponse {
        result: outcome.result,
        row: query.row,
        col: query.col,
        shooter: game
            .player(outcome.attacker)
            .map(|p| p.name().to_string())
            .unwrap_or_default(),
        finished: outcome.finished,
        winner: session.winner().map(|p| p.name().to_string()),
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        StatusCode::OK,
    ))
}

/// Every route under `/api`.
pub fn routes(
    session: SessionRef,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_handler);
    let shoot = warp::path("shoot")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ShootQuery>())
        .and(with_session(session))
        .and_then(shoot_handler);
    warp::path("api").and(health.or(shoot))
}

/// Serve `session` on `addr` until the process ends. The session must
/// already be playing.
pub async fn serve(session: Session, addr: SocketAddr) -> anyhow::Result<()> {
    if session.phase() != Phase::Playing {
        return Err(anyhow::anyhow!(GameError::WrongPhase(session.phase())));
    }
    log::info!("serving game {} on http://{}", session.game().id(), addr);
    warp::serve(routes(shared(session))).run(addr).await;
    Ok(())
}
