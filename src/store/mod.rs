//! MongoDB access: connection handle plus the shared persistence helpers used
//! by every repository. The database handle is constructed once at boot and
//! passed down explicitly; there is no process-wide client.

pub mod soft_delete;
pub mod update;

use anyhow::{Context, Result};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    Client, Database,
};
use tracing::{info, warn};

use crate::error::Error;

/// Connect to MongoDB and verify the connection with a ping.
///
/// # Errors
///
/// Returns an error if the URI is rejected by the driver or the ping fails.
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("Failed to create MongoDB client")?;

    let db = client.database(database);

    db.run_command(doc! {"ping": 1})
        .await
        .context("Failed to ping MongoDB")?;

    info!("Connected to MongoDB database: {database}");

    Ok(db)
}

/// Parse a hex document id supplied by a caller.
///
/// # Errors
///
/// Returns [`Error::InvalidIdFormat`] for anything that is not a 24-char hex
/// ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| {
        warn!("Invalid id format: {id}");
        Error::InvalidIdFormat
    })
}

/// Render a stored timestamp for DTOs.
#[must_use]
pub fn rfc3339(at: DateTime) -> String {
    at.try_to_rfc3339_string().unwrap_or_default()
}
