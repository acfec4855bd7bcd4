//! Identity commands: login, signup, logout, whoami

use anyhow::Result;

use cyberfolio::app::App;
use cyberfolio::identity::SignupForm;

use super::print_events;

pub fn login_command(app: &mut App, email: &str, password: &str) -> Result<()> {
    let rewarded = app.login(email, password)?;
    println!(
        "ACCESS GRANTED - Welcome back, {}!",
        rewarded.value.name
    );
    print_events(&rewarded.events);
    Ok(())
}

pub fn signup_command(app: &mut App, form: SignupForm) -> Result<()> {
    let rewarded = app.signup(&form)?;
    println!(
        "ACCOUNT CREATED - Welcome to the network, {}!",
        rewarded.value.name
    );
    print_events(&rewarded.events);
    Ok(())
}

pub fn logout_command(app: &mut App) -> Result<()> {
    match app.logout() {
        Some(identity) => println!("Signed out {}. Progress kept.", identity.email),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn whoami_command(app: &App) -> Result<()> {
    match app.identity() {
        Some(identity) => {
            println!("{} <{}>", identity.name, identity.email);
            println!("Access:  {}", identity.access_level);
            println!("Joined:  {}", identity.join_date.format("%Y-%m-%d"));
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
