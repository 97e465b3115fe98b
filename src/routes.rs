//! Page destinations the UI layer navigates to.
//!
//! Flows return a [`Route`] instead of navigating themselves; the caller
//! decides what "going there" means.

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login.html";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { return_to: Option<String> },
    AdminDashboard,
    Cart,
    Checkout,
    Profile,
    Wishlist,
    ProductDetail(i64),
    /// A caller-supplied return path, e.g. from `?return=`
    Path(String),
}

impl Route {
    pub fn login_returning_to(path: impl Into<String>) -> Self {
        Route::Login {
            return_to: Some(path.into()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Login { return_to: None } => LOGIN_PATH.to_string(),
            Route::Login {
                return_to: Some(path),
            } => format!("{}?return={}", LOGIN_PATH, urlencoding::encode(path)),
            Route::AdminDashboard => ADMIN_DASHBOARD_PATH.to_string(),
            Route::Cart => "/cart.html".to_string(),
            Route::Checkout => "/checkout.html".to_string(),
            Route::Profile => "/profile.html".to_string(),
            Route::Wishlist => "/wishlist.html".to_string(),
            Route::ProductDetail(id) => format!("/product-detail.html?id={}", id),
            Route::Path(path) => path.clone(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
