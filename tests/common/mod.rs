#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pokedex_gateway::config::{
    AuditConfig, AuthConfig, CorsConfig, ServerConfig, Settings, UpstreamConfig,
};
use pokedex_gateway::{AppState, Clock, MemoryAuditLog, PokeApiClient, RandomSource, ThreadRandom};
use serde_json::{json, Value};

pub const USERNAME: &str = "ash";
pub const PASSWORD: &str = "pikachu";

pub fn settings(base_url: &str) -> Settings {
    Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration_secret".to_string(),
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            token_ttl_minutes: 10,
        },
        upstream: UpstreamConfig {
            base_url: base_url.to_string(),
        },
        audit: AuditConfig {
            actions_path: "unused-actions.log".to_string(),
            errors_path: "unused-errors.log".to_string(),
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            max_age: 0,
        },
    }
}

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(seconds: i64) -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc.timestamp_opt(seconds, 0).unwrap())))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct TestState {
    pub state: AppState,
    pub audit: Arc<MemoryAuditLog>,
}

pub fn state_with(
    base_url: &str,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
) -> TestState {
    let audit = Arc::new(MemoryAuditLog::new());
    let source = Arc::new(PokeApiClient::new(base_url).expect("valid base url"));
    let state = AppState::with_components(settings(base_url), audit.clone(), source, random, clock)
        .expect("Failed to build state");
    TestState { state, audit }
}

pub fn state(base_url: &str) -> TestState {
    state_with(base_url, Arc::new(ThreadRandom), ManualClock::at(Utc::now().timestamp()))
}

pub fn bearer(state: &AppState) -> String {
    let token = state.auth.tokens().issue(USERNAME).expect("token");
    format!("Bearer {}", token)
}

pub fn pokemon_body(id: i64, name: &str, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": format!("https://pokeapi.co/api/v2/type/{}/", t)}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "base_experience": 64,
        "types": types
    })
}

pub fn type_body(name: &str, pokemon: &[&str]) -> Value {
    let pokemon: Vec<Value> = pokemon
        .iter()
        .map(|p| json!({"slot": 1, "pokemon": {"name": p, "url": format!("https://pokeapi.co/api/v2/pokemon/{}/", p)}}))
        .collect();
    json!({
        "id": 3,
        "name": name,
        "pokemon": pokemon
    })
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
