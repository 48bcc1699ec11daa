pub mod city_handlers;
pub mod error;
pub mod handlers;
pub mod hero_handlers;
pub mod routes;
pub mod session;
pub mod team_handlers;

pub use error::*;
pub use handlers::*;
pub use routes::*;
pub use session::*;
