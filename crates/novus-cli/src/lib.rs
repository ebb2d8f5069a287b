//! Host simulator for novus-core.
//!
//! Replays scripted game events against the Novus manager so detection and
//! overlay behavior can be checked without a game client.

pub mod replay;
pub mod script;
