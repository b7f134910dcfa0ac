//! Wire models shared between the Trip Planner web client and the backend
//! API it talks to.

pub mod models;
