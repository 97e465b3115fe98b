//! Login, registration, logout and the profile page.

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginResponse, Order};
use crate::routes::Route;
use crate::session::Session;

/// Session written by a login and the page to go to next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: Session,
    pub destination: Route,
}

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

impl Registration {
    pub fn validate(&self) -> ClientResult<()> {
        if self.password != self.confirm_password {
            return Err(ClientError::validation("Passwords do not match"));
        }
        if !self.accepted_terms {
            return Err(ClientError::validation(
                "Please accept the terms and conditions",
            ));
        }
        Ok(())
    }
}

/// Counters on the profile page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStats {
    /// Cart lines, not quantities
    pub cart_items: usize,
    pub orders: usize,
}

#[derive(Debug, Clone)]
pub struct Account {
    api: ApiClient,
}

impl Account {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Shopper login. Admins land on the dashboard; everyone else on the
    /// `return_to` path when it is a local path, else the home page.
    pub async fn login(&self, email: &str, password: &str, return_to: Option<&str>) -> ClientResult<LoginOutcome> {
        let response = self.api.login(email, password).await?;
        let destination = if response.role.is_admin() {
            Route::AdminDashboard
        } else {
            return_to
                .filter(|path| is_local_path(path))
                .map(|path| Route::Path(path.to_string()))
                .unwrap_or(Route::Home)
        };
        self.store(&response, destination)
    }

    /// Admin tab of the login page. A non-admin account is refused and no
    /// session is written.
    pub async fn admin_login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let response = self.api.login(email, password).await?;
        if !response.role.is_admin() {
            info!(user_id = response.user_id, "Admin login refused for non-admin account");
            return Err(ClientError::Forbidden);
        }
        self.store(&response, Route::AdminDashboard)
    }

    /// Validate locally, then register. Success leads to the login page.
    pub async fn register(&self, registration: &Registration) -> ClientResult<Route> {
        registration.validate()?;
        let response = self
            .api
            .register(&registration.name, &registration.email, &registration.password)
            .await?;
        info!(user_id = ?response.user_id, "Account registered");
        Ok(Route::Login { return_to: None })
    }

    pub fn logout(&self) -> ClientResult<Route> {
        self.api.session().clear()?;
        Ok(Route::Home)
    }

    /// Where the login page sends someone who is already logged in.
    pub fn redirect_if_logged_in(&self) -> Option<Route> {
        self.api.session().load().map(|session| {
            if session.is_admin() {
                Route::AdminDashboard
            } else {
                Route::Home
            }
        })
    }

    /// Cart line count and order count. Either failing reads as zero.
    pub async fn profile_stats(&self) -> ClientResult<ProfileStats> {
        self.api.session().require_auth(&Route::Profile.path())?;

        let (cart, orders) = tokio::join!(self.api.cart(), self.api.user_orders());
        let cart_items = cart
            .map(|items| items.len())
            .unwrap_or_else(|e| {
                debug!(error = %e, "Profile cart count defaults to zero");
                0
            });
        let orders = orders
            .map(|orders| orders.len())
            .unwrap_or_else(|e| {
                debug!(error = %e, "Profile order count defaults to zero");
                0
            });
        Ok(ProfileStats { cart_items, orders })
    }

    pub async fn order_history(&self) -> ClientResult<Vec<Order>> {
        self.api.session().require_auth(&Route::Profile.path())?;
        Ok(self.api.user_orders().await?)
    }

    /// Profile name edit. Only the stored display name changes; nothing is
    /// sent to the backend.
    pub fn update_display_name(&self, name: &str) -> ClientResult<()> {
        self.api.session().require_auth(&Route::Profile.path())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::validation("Name cannot be empty"));
        }
        self.api.session().set_user_name(name)?;
        Ok(())
    }

    fn store(&self, response: &LoginResponse, destination: Route) -> ClientResult<LoginOutcome> {
        let session = Session::from_login(response);
        self.api.session().save(&session)?;
        info!(user_id = response.user_id, role = %response.role, "Logged in");
        Ok(LoginOutcome {
            session,
            destination,
        })
    }
}

/// Same-origin path such as `/cart.html`. Rejects absolute URLs, the
/// protocol-relative forms `//host` and `/\host`, and control characters.
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/') | Some('\\'))
        && !path.chars().any(char::is_control)
}
