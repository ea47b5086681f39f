//! Client routes and the navigation requests page controllers return.

use std::fmt;
use std::time::Duration;

use catalogo_core::CaseNumber;

/// One screen of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Tenants,
    CreateTenant,
    List,
    CreateAdministrativeFile,
    EditAdministrativeFile(CaseNumber),
    /// The case number travels as navigation state, not in the path.
    CreateIdentification {
        case_number: Option<CaseNumber>,
    },
    EditIdentification(CaseNumber),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Tenants => "/tenants".into(),
            Route::CreateTenant => "/createTenant".into(),
            Route::List => "/list".into(),
            Route::CreateAdministrativeFile => "/createAdministrativeFile".into(),
            Route::EditAdministrativeFile(n) => format!("/editAdministrativeFile/{n}"),
            Route::CreateIdentification { .. } => "/createIdentification".into(),
            Route::EditIdentification(n) => format!("/editIdentification/{n}"),
        }
    }

    /// Resolve a path. `/` is the tenant list; a non-numeric case number
    /// does not resolve.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/tenants" => return Some(Route::Tenants),
            "/createTenant" => return Some(Route::CreateTenant),
            "/list" => return Some(Route::List),
            "/createAdministrativeFile" => return Some(Route::CreateAdministrativeFile),
            "/createIdentification" => {
                return Some(Route::CreateIdentification { case_number: None })
            }
            _ => {}
        }

        let (prefix, param) = trimmed.rsplit_once('/')?;
        let case_number: CaseNumber = param.parse().ok()?;
        match prefix {
            "/editAdministrativeFile" => Some(Route::EditAdministrativeFile(case_number)),
            "/editIdentification" => Some(Route::EditIdentification(case_number)),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the renderer should do after a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Go(Route),
    /// Show the current message, then navigate once `after` has elapsed.
    Redirect { to: Route, after: Duration },
}

impl Navigation {
    pub fn redirect(to: Route, after_ms: u64) -> Self {
        Navigation::Redirect {
            to,
            after: Duration::from_millis(after_ms),
        }
    }

    /// The destination, if any.
    pub fn target(&self) -> Option<&Route> {
        match self {
            Navigation::Stay => None,
            Navigation::Go(to) | Navigation::Redirect { to, .. } => Some(to),
        }
    }
}
