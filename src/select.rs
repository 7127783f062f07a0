//! Interactive Endpoint Picker
//!
//! Renders the role-annotated endpoint list for fuzzy selection. The picker
//! is purely presentational: role never restricts which rows are selectable,
//! and cancelling (Esc) propagates as `SelectionCancelled` rather than
//! defaulting to the first row.

use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;

use crate::endpoint::ResolvedEndpoint;
use crate::error::{RdshellError, Result};

/// One display row: identifier, role, status, engine/version, endpoint,
/// username and instance class.
#[must_use]
pub fn display_row(endpoint: &ResolvedEndpoint) -> String {
    format!(
        "{} ({}) [{}] {}/{} {}:{} user={} class={}",
        endpoint.identifier,
        endpoint.role,
        endpoint.status,
        endpoint.engine,
        endpoint.engine_version,
        endpoint.address,
        endpoint.port_display(),
        endpoint.master_username,
        endpoint.instance_class,
    )
}

/// Prompt the operator to pick one endpoint; returns its index.
///
/// # Errors
///
/// Returns [`RdshellError::SelectionCancelled`] when the list is empty, the
/// prompt is aborted with Esc, or the terminal interaction fails.
pub fn select(endpoints: &[ResolvedEndpoint]) -> Result<usize> {
    if endpoints.is_empty() {
        return Err(RdshellError::SelectionCancelled);
    }

    let rows: Vec<String> = endpoints.iter().map(display_row).collect();

    let chosen = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Which endpoint?")
        .default(0)
        .items(&rows)
        .interact_opt()
        .map_err(|_| RdshellError::SelectionCancelled)?;

    chosen.ok_or(RdshellError::SelectionCancelled)
}
