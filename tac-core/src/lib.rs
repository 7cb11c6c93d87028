#![warn(missing_docs)]
//! Core models and ports for the TAC Travel allocation resolver.
//!
//! A TAC Travel agent serves eight clients, each of whom wants a round trip
//! into town, a hotel for every night of the stay and, optionally, tickets
//! for up to three kinds of entertainment. Goods are traded on 28 per-day
//! auctions, and the cost of holding `n` units of a good is described by a
//! cumulative price curve. This crate describes that market; the search
//! itself lives in `tac-solver`.

/// Domain models of the travel market.
///
/// These are plain data structures: the fixed shape of a game (clients, days,
/// goods), the price curves quoted by the auctions, the clients' preferences,
/// the goods already owned and the resulting allocation of goods to clients.
/// They carry as little behaviour as possible so that the solver and any
/// adapter (CLI, game server) can share them.
pub mod models;

/// Interface traits for the allocation resolver.
///
/// These are the "ports" between the resolver and whatever drives it: the
/// listener that observes incumbents, the verdict it hands back, and the
/// solver contract itself.
pub mod ports;
