//! Page controllers, one per route.
//!
//! Controllers are shared by reference (`&self`): state sits behind short
//! locks that are never held across a backend call, and each controller's
//! [`InFlight`](crate::in_flight::InFlight) guard refuses a second save or
//! delete while one is outstanding.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::route::{Navigation, Route};
use crate::session::Session;

pub mod create_file;
pub mod create_identification;
pub mod create_tenant;
pub mod edit_file;
pub mod edit_identification;
pub mod file_list;
pub mod form_cell;
pub mod tenant_list;

pub use form_cell::FormCell;

/// Shown when a tenant-scoped page opens without a tenant.
pub const SELECT_TENANT_FIRST: &str = "Por favor selecciona una institución primero.";

/// Delay before leaving a page that cannot work without a tenant.
pub const MISSING_TENANT_REDIRECT_MS: u64 = 1500;

/// Outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// Saved; where to go next.
    Done(Navigation),
    /// Nothing saved. The reason is in the form's error tree.
    Failed,
    /// Another save is still running; no request was issued.
    Busy,
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delete {
    Deleted,
    /// Refused client-side; no request was issued.
    Blocked(String),
    /// The backend call failed; the page error holds the message.
    Failed,
    Busy,
}

/// Redirect to the tenant list when no tenant is selected.
pub(crate) fn tenant_redirect(session: &Session) -> Option<Navigation> {
    if session.has_tenant() {
        return None;
    }
    tracing::warn!("Tenant-scoped page opened without a tenant");
    Some(Navigation::redirect(Route::Tenants, MISSING_TENANT_REDIRECT_MS))
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
