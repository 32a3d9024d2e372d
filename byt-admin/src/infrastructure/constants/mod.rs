pub mod routes;
pub mod text;
