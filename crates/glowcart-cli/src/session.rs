//! Sign-in, registration and sign-out.

use glowcart_store::{post_login_destination, validate_login, validate_registration, AppState};

pub(crate) async fn run_login(
    state: &mut AppState,
    email: &str,
    password: &str,
    from: Option<&str>,
) -> anyhow::Result<()> {
    validate_login(email, password)?;
    let user = state.auth.login(email, password).await?;
    println!("Signed in as {} <{}>.", user.name, user.email);
    println!("Continue to {}", post_login_destination(from));
    Ok(())
}

pub(crate) async fn run_register(
    state: &mut AppState,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    from: Option<&str>,
) -> anyhow::Result<()> {
    validate_registration(name, email, password, confirm)?;
    let user = state.auth.register(name, email, password).await?;
    println!("Welcome, {}!", user.name);
    println!("Continue to {}", post_login_destination(from));
    Ok(())
}

pub(crate) fn run_logout(state: &mut AppState) {
    state.auth.logout();
    println!("Signed out.");
}

pub(crate) fn run_whoami(state: &AppState) {
    match state.auth.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not signed in."),
    }
}
