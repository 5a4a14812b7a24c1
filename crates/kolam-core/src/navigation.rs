//! Route table and role gating.

use std::fmt;

use crate::models::UserRole;
use crate::session::{Session, SessionResult};

/// Every screen the shell can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Analyzer,
    Generator,
    Therapy,
    Education,
    Dashboard,
    About,
    Login,
    PatientHome,
    ClinicianHome,
    PatientDetail { patient_id: String },
    TaskPlayer { task_id: String },
    NotFound { path: String },
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Role(UserRole),
}

/// Entry in the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem { label: "Home", path: "/" },
    NavItem { label: "Analyzer", path: "/analyzer" },
    NavItem { label: "Generator", path: "/generator" },
    NavItem { label: "Therapy", path: "/therapy" },
    NavItem { label: "Education", path: "/education" },
    NavItem { label: "Dashboard", path: "/dashboard" },
    NavItem { label: "About", path: "/about" },
];

impl Route {
    /// Resolve a path. Unknown paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["analyzer"] => Route::Analyzer,
            ["generator"] => Route::Generator,
            ["therapy"] => Route::Therapy,
            ["education"] => Route::Education,
            ["dashboard"] => Route::Dashboard,
            ["about"] => Route::About,
            ["login"] => Route::Login,
            ["patient", "home"] => Route::PatientHome,
            ["clinician", "home"] => Route::ClinicianHome,
            ["clinician", "patient", id] => Route::PatientDetail {
                patient_id: id.to_string(),
            },
            ["task", id] => Route::TaskPlayer {
                task_id: id.to_string(),
            },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Analyzer => "/analyzer".into(),
            Route::Generator => "/generator".into(),
            Route::Therapy => "/therapy".into(),
            Route::Education => "/education".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::About => "/about".into(),
            Route::Login => "/login".into(),
            Route::PatientHome => "/patient/home".into(),
            Route::ClinicianHome => "/clinician/home".into(),
            Route::PatientDetail { patient_id } => format!("/clinician/patient/{}", patient_id),
            Route::TaskPlayer { task_id } => format!("/task/{}", task_id),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Generator | Route::ClinicianHome | Route::PatientDetail { .. } => {
                Access::Role(UserRole::Clinician)
            }
            Route::PatientHome => Access::Role(UserRole::Patient),
            Route::TaskPlayer { .. } => Access::SignedIn,
            _ => Access::Public,
        }
    }

    /// Landing screen after sign-in.
    pub fn home_for(role: UserRole) -> Route {
        match role {
            UserRole::Patient => Route::PatientHome,
            UserRole::Clinician => Route::ClinicianHome,
        }
    }

    /// Check the session may open this route.
    pub fn authorize(&self, session: &Session) -> SessionResult<()> {
        match self.access() {
            Access::Public => Ok(()),
            Access::SignedIn => session.require_user().map(|_| ()),
            Access::Role(role) => session.require_role(role).map(|_| ()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;
    use crate::session::SessionError;

    fn session_as(role: UserRole) -> Session {
        let mut session = Session::new();
        session.login(AuthUser {
            id: "X".into(),
            email: "x".into(),
            role,
            name: "X".into(),
        });
        session
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/analyzer/"), Route::Analyzer);
        assert_eq!(Route::parse("/patient/home"), Route::PatientHome);
        assert_eq!(
            Route::parse("/clinician/patient/Z014"),
            Route::PatientDetail { patient_id: "Z014".into() }
        );
        assert_eq!(
            Route::parse("/task/T001?from=home"),
            Route::TaskPlayer { task_id: "T001".into() }
        );
        assert_eq!(
            Route::parse("/nowhere"),
            Route::NotFound { path: "/nowhere".into() }
        );
    }

    #[test]
    fn test_nav_items_resolve() {
        for item in NAV_ITEMS {
            let route = Route::parse(item.path);
            assert!(!matches!(route, Route::NotFound { .. }), "{}", item.path);
            assert_eq!(route.path(), item.path);
        }
    }

    #[test]
    fn test_role_gating() {
        let anonymous = Session::new();
        let patient = session_as(UserRole::Patient);
        let clinician = session_as(UserRole::Clinician);

        assert!(Route::Home.authorize(&anonymous).is_ok());
        assert!(Route::About.authorize(&anonymous).is_ok());
        assert_eq!(
            Route::Generator.authorize(&anonymous),
            Err(SessionError::NotAuthenticated)
        );
        assert!(Route::Generator.authorize(&patient).is_err());
        assert!(Route::Generator.authorize(&clinician).is_ok());
        assert!(Route::PatientHome.authorize(&clinician).is_err());

        let player = Route::TaskPlayer { task_id: "T001".into() };
        assert!(player.authorize(&anonymous).is_err());
        assert!(player.authorize(&patient).is_ok());
        assert!(player.authorize(&clinician).is_ok());
    }

    #[test]
    fn test_home_for_role() {
        assert_eq!(Route::home_for(UserRole::Patient).to_string(), "/patient/home");
        assert_eq!(Route::home_for(UserRole::Clinician).to_string(), "/clinician/home");
    }
}
