//! Registration, login and profile.

use secrecy::SecretString;

use corner_shop_storefront::error::{
    AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user,
};
use corner_shop_storefront::identity::PrincipalSource;
use corner_shop_storefront::services::{AuthService, ProfileUpdate, RegisterRequest};

use super::Shop;
use crate::terminal::say;

pub fn register(
    shop: &Shop,
    name: String,
    email: String,
    password: SecretString,
    address: Option<String>,
) -> Result<()> {
    let auth = AuthService::new(&shop.store);
    let principal = auth.register(RegisterRequest {
        name,
        email,
        password,
        address,
    })?;
    say(&format!(
        "Welcome, {}! Log in with: shop login --email {}",
        principal.name, principal.email
    ));
    Ok(())
}

pub fn login(shop: &Shop, email: &str, password: &SecretString) -> Result<()> {
    let auth = AuthService::new(&shop.store);
    let principal = auth.login(email, password)?;
    set_sentry_user(principal.email.as_str());
    add_breadcrumb("auth", "Logged in", None);
    say(&format!("Logged in as {} <{}>", principal.name, principal.email));
    Ok(())
}

pub fn logout(shop: &Shop) {
    AuthService::new(&shop.store).logout();
    add_breadcrumb("auth", "Logged out", None);
    clear_sentry_user();
    say("Logged out.");
}

pub fn whoami(shop: &Shop) {
    match AuthService::new(&shop.store).current_principal() {
        Some(p) => say(&format!(
            "{} <{}>{}",
            p.name,
            p.email,
            p.address
                .map(|a| format!(", ships to {a}"))
                .unwrap_or_default()
        )),
        None => say("Browsing as guest."),
    }
}

pub fn profile(shop: &Shop, update: ProfileUpdate) -> Result<()> {
    if update.name.is_none() && update.address.is_none() && update.password.is_none() {
        return Err(AppError::BadRequest(
            "Nothing to update, pass --name, --address or --password".to_string(),
        ));
    }
    let principal = AuthService::new(&shop.store).update_profile(update)?;
    add_breadcrumb("auth", "Updated profile", None);
    say(&format!(
        "Profile saved: {} <{}>, address: {}",
        principal.name,
        principal.email,
        principal.address.as_deref().unwrap_or("(none)")
    ));
    Ok(())
}
