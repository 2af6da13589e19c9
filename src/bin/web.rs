//! Single binary web server: JSON API over the competition store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; records live in ./data.
//! Override with env: HOST, PORT, DATA_DIR.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use fixture_manager_web::{
    config::ServerConfig,
    create_league, create_tournament, sorted_standings, standings_csv, store,
    submit_fixture_result, submit_result, CompetitionError, Fixture, FixtureFilter,
    FileStore, KnockoutMatch, League, MatchId, RoundLabel, StandingRow, TeamName, Tournament,
};
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Reads share the lock; writes load a record in full, mutate it and save it back.
type AppState = Data<RwLock<FileStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize, Default)]
struct CreateBody {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct MatchScoreBody {
    score1: i64,
    score2: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureScoreBody {
    home_score: i64,
    away_score: i64,
}

#[derive(Deserialize)]
struct TeamIndexPath {
    index: usize,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Deserialize)]
struct FixturesQuery {
    #[serde(default)]
    filter: FixtureFilter,
}

#[derive(Serialize)]
struct RoundView<'a> {
    round: RoundLabel,
    matches: Vec<&'a KnockoutMatch>,
}

/// Tournament record plus the bracket grouped by round.
#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a Tournament,
    rounds: Vec<RoundView<'a>>,
    champion: Option<&'a TeamName>,
}

impl<'a> TournamentView<'a> {
    fn new(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            rounds: tournament
                .rounds()
                .into_iter()
                .map(|(round, matches)| RoundView { round, matches })
                .collect(),
            champion: tournament.champion(),
        }
    }
}

/// League record plus the sorted table.
#[derive(Serialize)]
struct LeagueView<'a> {
    league: &'a League,
    table: Vec<&'a StandingRow>,
    complete: bool,
    champion: Option<&'a TeamName>,
}

impl<'a> LeagueView<'a> {
    fn new(league: &'a League) -> Self {
        Self {
            league,
            table: sorted_standings(&league.standings),
            complete: league.is_complete(),
            champion: league.champion().map(|row| &row.team),
        }
    }
}

#[derive(Serialize)]
struct MatchweekView<'a> {
    round: u32,
    fixtures: Vec<&'a Fixture>,
}

fn error_response(e: &CompetitionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else if e.is_user_error() {
        HttpResponse::BadRequest().json(body)
    } else {
        log::error!("{}", e);
        HttpResponse::InternalServerError().json(body)
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn no_league() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" }))
}

fn read_lock(state: &AppState) -> Result<RwLockReadGuard<'_, FileStore>, HttpResponse> {
    state
        .read()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

fn lock(state: &AppState) -> Result<RwLockWriteGuard<'_, FileStore>, HttpResponse> {
    state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fixture-manager-web",
    })
}

/// Lifetime counters and staged team count.
#[get("/api/stats")]
async fn api_stats(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::load_stats(&*g) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Staged team names.
#[get("/api/teams")]
async fn api_get_teams(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::load_teams(&*g) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Stage a team (trimmed, non-empty, unique).
#[post("/api/teams")]
async fn api_add_team(state: AppState, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let result = store::load_teams(&*g).and_then(|mut teams| {
        teams.add(&body.name)?;
        store::save_teams(&mut *g, &teams)?;
        Ok(teams)
    });
    match result {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Remove a staged team by position.
#[delete("/api/teams/{index}")]
async fn api_remove_team(state: AppState, path: Path<TeamIndexPath>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let result = store::load_teams(&*g).and_then(|mut teams| {
        teams.remove(path.index)?;
        store::save_teams(&mut *g, &teams)?;
        Ok(teams)
    });
    match result {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Create a tournament from the staged teams (replaces any active one).
#[post("/api/tournament")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateBody>>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let body = body.map(Json::into_inner).unwrap_or_default();
    let result = store::load_teams(&*g).and_then(|teams| {
        let tournament = create_tournament(
            teams.names(),
            body.name.as_deref(),
            &mut rand::thread_rng(),
            Utc::now(),
        )?;
        store::record_new_tournament(&mut *g, &tournament)?;
        Ok(tournament)
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(TournamentView::new(&t)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::load_tournament(&*g) {
        Ok(Some(t)) => HttpResponse::Ok().json(TournamentView::new(&t)),
        Ok(None) => no_tournament(),
        Err(e) => error_response(&e),
    }
}

/// Score a knockout match (or correct its score); the winner advances.
#[put("/api/tournament/matches/{id}")]
async fn api_submit_match(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchScoreBody>,
) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let mut t = match store::load_tournament(&*g) {
        Ok(Some(t)) => t,
        Ok(None) => return no_tournament(),
        Err(e) => return error_response(&e),
    };
    let result = submit_result(&mut t, path.id, body.score1, body.score2)
        .and_then(|()| store::save_tournament(&mut *g, &t));
    match result {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(&t)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournament")]
async fn api_clear_tournament(state: AppState) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::clear_tournament(&mut *g) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Create a league from the staged teams (replaces any active one).
#[post("/api/league")]
async fn api_create_league(state: AppState, body: Option<Json<CreateBody>>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let body = body.map(Json::into_inner).unwrap_or_default();
    let result = store::load_teams(&*g).and_then(|teams| {
        let league = create_league(teams.names(), body.name.as_deref(), Utc::now())?;
        store::record_new_league(&mut *g, &league)?;
        Ok(league)
    });
    match result {
        Ok(l) => HttpResponse::Ok().json(LeagueView::new(&l)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/league")]
async fn api_get_league(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::load_league(&*g) {
        Ok(Some(l)) => HttpResponse::Ok().json(LeagueView::new(&l)),
        Ok(None) => no_league(),
        Err(e) => error_response(&e),
    }
}

/// Standings in table order.
#[get("/api/league/standings")]
async fn api_get_standings(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::load_league(&*g) {
        Ok(Some(l)) => HttpResponse::Ok().json(sorted_standings(&l.standings)),
        Ok(None) => no_league(),
        Err(e) => error_response(&e),
    }
}

#[get("/api/league/standings.csv")]
async fn api_get_standings_csv(state: AppState) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let league = match store::load_league(&*g) {
        Ok(Some(l)) => l,
        Ok(None) => return no_league(),
        Err(e) => return error_response(&e),
    };
    match standings_csv(&league.standings) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// Fixtures grouped by matchweek; `?filter=all|upcoming|played`.
#[get("/api/league/fixtures")]
async fn api_get_fixtures(state: AppState, query: Query<FixturesQuery>) -> HttpResponse {
    let g = match read_lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let league = match store::load_league(&*g) {
        Ok(Some(l)) => l,
        Ok(None) => return no_league(),
        Err(e) => return error_response(&e),
    };
    let weeks: Vec<MatchweekView> = league
        .fixtures_by_round(query.filter)
        .into_iter()
        .map(|(round, fixtures)| MatchweekView { round, fixtures })
        .collect();
    HttpResponse::Ok().json(weeks)
}

/// Score a league fixture (or correct its score); standings follow.
#[put("/api/league/fixtures/{id}")]
async fn api_submit_fixture(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<FixtureScoreBody>,
) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let mut l = match store::load_league(&*g) {
        Ok(Some(l)) => l,
        Ok(None) => return no_league(),
        Err(e) => return error_response(&e),
    };
    let result = submit_fixture_result(&mut l, path.id, body.home_score, body.away_score)
        .and_then(|()| store::save_league(&mut *g, &l));
    match result {
        Ok(()) => HttpResponse::Ok().json(LeagueView::new(&l)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/league")]
async fn api_clear_league(state: AppState) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match store::clear_league(&mut *g) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let file_store = FileStore::open(&config.data_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    log::info!("Storing records in {}", file_store.root().display());
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(file_store));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_stats)
            .service(api_get_teams)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_submit_match)
            .service(api_clear_tournament)
            .service(api_create_league)
            .service(api_get_league)
            .service(api_get_standings)
            .service(api_get_standings_csv)
            .service(api_get_fixtures)
            .service(api_submit_fixture)
            .service(api_clear_league)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
