//! # Pitch Duel
//!
//! A 1v1 turn-based football card battle: each side fields a goalkeeper
//! hero and up to three footballers, playing cards from a shuffled deck on
//! a mana curve that grows by one each turn.
//!
//! ## Overview
//!
//! - [`card`] turns roster entries into battle cards.
//! - [`battle`] is the engine: setup, turn lifecycle and the pure
//!   `apply(state, action)` transition.
//! - [`ai`] plays a whole opponent turn on top of `apply`.
//! - [`matches`] hosts PvP matches server-side, with matchmaking.
//!
//! ## Architecture
//!
//! The HTTP surface is a Rocket application with OpenAPI documentation.
//! Each match is guarded by its own async mutex so actions on one match are
//! applied one at a time while other matches proceed independently.

// Rocket makes this a bit tricky to support
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod ai;
pub mod battle;
pub mod card;
pub mod config;
pub mod matches;
pub mod status_messages;

use crate::config::ServerConfig;
use crate::matches::matchmaking::MatchmakingQueue;
use crate::matches::MatchRegistry;

/// Initializes and configures the Rocket web server from environment
/// settings.
///
/// # Example
///
/// ```no_run
/// use pitch_duel::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     let _ = rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    rocket_with_config(ServerConfig::from_env())
}

/// Same as [`rocket_initialize`] with explicit settings.
pub fn rocket_with_config(config: ServerConfig) -> rocket::Rocket<rocket::Build> {
    use crate::matches::endpoints::{
        create_match, expire_turn, get_match, join_match, join_queue, leave_queue,
        list_match_actions, poll_queue, submit_action,
    };
    use crate::matches::endpoints::{
        okapi_add_operation_for_create_match_, okapi_add_operation_for_expire_turn_,
        okapi_add_operation_for_get_match_, okapi_add_operation_for_join_match_,
        okapi_add_operation_for_join_queue_, okapi_add_operation_for_leave_queue_,
        okapi_add_operation_for_list_match_actions_, okapi_add_operation_for_poll_queue_,
        okapi_add_operation_for_submit_action_,
    };

    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    let seed = config.resolved_seed();
    log::info!("match seeds drawn from generator seeded with {seed}");

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                create_match,
                join_match,
                get_match,
                submit_action,
                expire_turn,
                list_match_actions,
                join_queue,
                poll_queue,
                leave_queue
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(MatchRegistry::new(seed))
        .manage(MatchmakingQueue::new())
        .manage(config)
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
