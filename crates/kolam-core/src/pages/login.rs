//! Sign-in screen.

use tracing::warn;

use super::{Notification, Notifications};
use crate::api::{MockApi, DEMO_PASSWORD};
use crate::models::UserRole;
use crate::navigation::Route;
use crate::session::Session;

/// A quick-login shortcut shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub identifier: &'static str,
    pub password: &'static str,
    pub role: UserRole,
    /// e.g. "Ananya S, Autism"
    pub description: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        identifier: "A001",
        password: DEMO_PASSWORD,
        role: UserRole::Patient,
        description: "Ananya S, Autism",
    },
    DemoAccount {
        identifier: "Z014",
        password: DEMO_PASSWORD,
        role: UserRole::Patient,
        description: "Sridhar K, Alzheimer's",
    },
    DemoAccount {
        identifier: "dr_meera@rec.health",
        password: DEMO_PASSWORD,
        role: UserRole::Clinician,
        description: "Dr. Meera Raman",
    },
    DemoAccount {
        identifier: "dr_ashok@rec.health",
        password: DEMO_PASSWORD,
        role: UserRole::Clinician,
        description: "Dr. Ashok Iyer",
    },
];

#[derive(Debug, Default)]
pub struct LoginPage {
    pub identifier: String,
    pub password: String,
    in_flight: bool,
    notifications: Notifications,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the form from a demo account without submitting.
    pub fn quick_fill(&mut self, account: &DemoAccount) {
        self.identifier = account.identifier.to_string();
        self.password = account.password.to_string();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Submit the form. On success the user is stored in `session` and the
    /// role's home route is returned.
    pub async fn submit(&mut self, api: &MockApi, session: &mut Session) -> Option<Route> {
        self.in_flight = true;
        let outcome = api.login(self.identifier.trim(), &self.password).await;
        self.in_flight = false;

        match outcome {
            Ok(user) => {
                self.notifications.push(Notification::info(
                    "Login successful",
                    format!("Welcome back, {}!", user.name),
                ));
                let home = Route::home_for(user.role);
                session.login(user);
                Some(home)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.notifications.push(Notification::error(
                    "Login failed",
                    "Please check your credentials and try again.",
                ));
                None
            }
        }
    }
}
