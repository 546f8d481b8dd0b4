//! PTV next-departures server.
//!
//! A small web service that answers: "when are the next trains and trams
//! from my stops, in the direction I travel?"

pub mod config;
pub mod departures;
pub mod domain;
pub mod ptv;
pub mod web;
