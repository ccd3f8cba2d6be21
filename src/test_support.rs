//! In-process stand-in for the FPL API, served by warp on an ephemeral port.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use warp::Filter;

use crate::config::AppConfig;

type Responder = dyn Fn(&str, usize) -> (u16, String) + Send + Sync;

pub(crate) struct FakeUpstream {
    pub(crate) base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl FakeUpstream {
    /// Serve every request through `responder`, which receives the request
    /// path and how many times that path has been hit (1-based).
    pub(crate) async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&str, usize) -> (u16, String) + Send + Sync + 'static,
    {
        let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
        let responder: Arc<Responder> = Arc::new(responder);
        let counter = hits.clone();
        let route = warp::path::full().map(move |full: warp::path::FullPath| {
            let path = full.as_str().to_string();
            let count = {
                let mut hits = counter.lock().unwrap();
                let entry = hits.entry(path.clone()).or_insert(0);
                *entry += 1;
                *entry
            };
            let (status, body) = responder(&path, count);
            warp::http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(body)
                .unwrap()
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub(crate) fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub(crate) fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// Configuration pointing at this upstream with no artificial delays.
    pub(crate) fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.upstream.base_url = self.base_url.clone();
        config.upstream.timeout_secs = 5;
        config.retry.max_attempts = 2;
        config.retry.base_delay_ms = 1;
        config.retry.max_delay_ms = 2;
        config.retry.jitter = false;
        config.pipeline.gameweek_delay_ms = 0;
        config
    }
}

/// Accepts connections and never answers. Returns its base URL and the
/// number of connections accepted so far.
pub(crate) async fn silent_upstream() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });
    (format!("http://{addr}"), accepted)
}

/// A deterministic twelve-gameweek season for one manager.
#[derive(Debug, Clone)]
pub(crate) struct FakeSeason {
    pub(crate) manager_id: u64,
    pub(crate) current_gameweek: u32,
    /// Gameweek the manager joined; history starts here.
    pub(crate) first_gameweek: u32,
    pub(crate) missing_entry: bool,
    pub(crate) failing_transfers: bool,
    pub(crate) failing_live: bool,
}

impl Default for FakeSeason {
    fn default() -> Self {
        Self {
            manager_id: 777,
            current_gameweek: 12,
            first_gameweek: 1,
            missing_entry: false,
            failing_transfers: false,
            failing_live: false,
        }
    }
}

impl FakeSeason {
    pub(crate) async fn spawn(self) -> FakeUpstream {
        FakeUpstream::spawn(move |path, _| self.respond(path)).await
    }

    pub(crate) fn respond(&self, path: &str) -> (u16, String) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let manager = self.manager_id.to_string();
        let ok = |value: Value| (200, value.to_string());
        match segments.as_slice() {
            ["bootstrap-static"] => ok(self.bootstrap()),
            ["entry", id, ..] if *id != manager => (404, r#"{"detail":"Not found."}"#.to_string()),
            ["entry", _] if self.missing_entry => (404, r#"{"detail":"Not found."}"#.to_string()),
            ["entry", _] => ok(self.entry()),
            ["entry", _, "history"] => ok(self.history()),
            ["entry", _, "transfers"] if self.failing_transfers => {
                (500, "Internal Server Error".to_string())
            }
            ["entry", _, "transfers"] => ok(self.transfers()),
            ["entry", _, "event", gw, "picks"] => match gw.parse::<u32>() {
                Ok(gw) => ok(Self::picks(gw)),
                Err(_) => (404, "{}".to_string()),
            },
            ["event", _, "live"] if self.failing_live => {
                (200, "<html><body>The game is being updated.</body></html>".to_string())
            }
            ["event", gw, "live"] => match gw.parse::<u32>() {
                Ok(gw) => ok(Self::live(gw)),
                Err(_) => (404, "{}".to_string()),
            },
            _ => (404, "{}".to_string()),
        }
    }

    pub(crate) fn points(gw: u32) -> i32 {
        40 + (gw * 13 % 35) as i32
    }

    pub(crate) fn live_points(element: u32, gw: u32) -> i32 {
        ((element * 3 + gw) % 12) as i32
    }

    fn bootstrap(&self) -> Value {
        let events: Vec<Value> = (1..=38)
            .map(|gw| {
                json!({
                    "id": gw,
                    "name": format!("Gameweek {gw}"),
                    "is_current": gw == self.current_gameweek,
                    "is_next": gw == self.current_gameweek + 1,
                    "finished": gw < self.current_gameweek,
                    "average_entry_score": 50,
                    "highest_score": 120
                })
            })
            .collect();
        let mut elements: Vec<Value> = (1..=20)
            .map(|id| {
                let element_type = match id {
                    1 | 2 => 1,
                    3..=7 => 2,
                    13..=15 => 4,
                    _ => 3,
                };
                let total_points = match id {
                    20 => 260,
                    16..=19 => 100 + id,
                    _ => id * 10,
                };
                json!({
                    "id": id,
                    "web_name": format!("Player{id}"),
                    "first_name": "First",
                    "second_name": format!("Second{id}"),
                    "team": id % 20 + 1,
                    "element_type": element_type,
                    "total_points": total_points
                })
            })
            .collect();
        // A manager card: never a candidate for "top scorer never owned".
        elements.push(json!({
            "id": 21, "web_name": "Boss", "element_type": 5, "total_points": 999
        }));
        json!({
            "events": events,
            "elements": elements,
            "teams": [{"id": 1, "name": "Arsenal", "short_name": "ARS"}],
            "element_types": [
                {"id": 1, "singular_name_short": "GKP"},
                {"id": 2, "singular_name_short": "DEF"},
                {"id": 3, "singular_name_short": "MID"},
                {"id": 4, "singular_name_short": "FWD"}
            ],
            "total_players": 11_000_000
        })
    }

    fn entry(&self) -> Value {
        json!({
            "id": self.manager_id,
            "player_first_name": "Test",
            "player_last_name": "Manager",
            "name": "Fixture FC",
            "summary_overall_points": 700,
            "summary_overall_rank": 900_000,
            "started_event": self.first_gameweek,
            "player_region_name": "England"
        })
    }

    fn history(&self) -> Value {
        let mut total = 0;
        let current: Vec<Value> = (self.first_gameweek..=self.current_gameweek)
            .map(|gw| {
                let points = Self::points(gw);
                let cost = if gw % 4 == 0 { 4 } else { 0 };
                total += points - cost;
                let rank = 2_000_000 - gw as i64 * 100_000 + if gw % 3 == 0 { 250_000 } else { 0 };
                json!({
                    "event": gw,
                    "points": points,
                    "total_points": total,
                    "overall_rank": rank,
                    "points_on_bench": gw % 6,
                    "event_transfers": if gw == self.first_gameweek { 0 } else if gw % 4 == 0 { 2 } else { 1 },
                    "event_transfers_cost": cost
                })
            })
            .collect();
        json!({
            "current": current,
            "chips": [{"name": "bboost", "time": "2024-09-28T10:00:00Z", "event": 5}],
            "past": [{"season_name": "2023/24", "total_points": 2210, "rank": 800_000}]
        })
    }

    fn transfers(&self) -> Value {
        json!([
            {"element_in": 8, "element_in_cost": 80, "element_out": 16, "element_out_cost": 75,
             "entry": self.manager_id, "event": 4, "time": "2024-09-20T10:00:00Z"},
            {"element_in": 12, "element_in_cost": 60, "element_out": 17, "element_out_cost": 55,
             "entry": self.manager_id, "event": 8, "time": "2024-10-20T10:00:00Z"}
        ])
    }

    fn picks(gw: u32) -> Value {
        let chip = match gw {
            5 => Some("bboost"),
            6 => Some("3xc"),
            _ => None,
        };
        let picks: Vec<Value> = (1..=15)
            .map(|element| {
                let multiplier = match element {
                    8 if gw == 6 => 3,
                    8 => 2,
                    12..=15 if gw == 5 => 1,
                    12..=15 => 0,
                    _ => 1,
                };
                json!({
                    "element": element,
                    "position": element,
                    "multiplier": multiplier,
                    "is_captain": element == 8,
                    "is_vice_captain": element == 9
                })
            })
            .collect();
        json!({
            "active_chip": chip,
            "automatic_subs": [],
            "entry_history": {"event": gw, "points": Self::points(gw)},
            "picks": picks
        })
    }

    fn live(gw: u32) -> Value {
        let elements: Vec<Value> = (1..=21)
            .map(|id| {
                json!({
                    "id": id,
                    "stats": {
                        "minutes": 90,
                        "goals_scored": 0,
                        "assists": 0,
                        "bonus": 0,
                        "total_points": Self::live_points(id, gw)
                    }
                })
            })
            .collect();
        json!({ "elements": elements })
    }
}
