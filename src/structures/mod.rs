pub mod config;
pub mod element;
pub mod gf2m;
pub mod poly;
pub mod trace;
