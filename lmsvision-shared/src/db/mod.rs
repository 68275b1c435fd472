/// Database access layer
///
/// - `pool`: PostgreSQL connection pool construction and health checks
/// - `migrations`: Embedded migration runner

pub mod migrations;
pub mod pool;
