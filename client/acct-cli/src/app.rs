use crate::commands::Commands;
use crate::error::Result as CliResult;
use crate::messages;

use acct_core::{
    AuthError, Identity, InputValidator, ProfileAttributes, Result as AuthResult, SessionState,
};
use acct_gateway::AuthGateway;

use chrono::Local;
use log::info;
use serde_json::{Value, json};

/// Run one command against the gateway and describe the outcome as JSON.
pub async fn execute(gateway: &AuthGateway, command: &Commands, pretty: bool) -> AuthResult<Value> {
    match command {
        Commands::Register {
            email,
            password,
            confirm_password,
            name,
            name_arabic,
            birth_date,
            phone,
        } => {
            let profile = ProfileAttributes {
                name_primary: name.clone(),
                name_secondary: name_arabic.clone(),
                birth_date: birth_date.clone(),
                phone_number: phone.clone(),
            };
            InputValidator::validate_registration_form(
                email,
                password,
                confirm_password,
                &profile,
                Local::now().date_naive(),
            )?;
            gateway.register(email, password, &profile).await?;

            let identity = gateway.settled_identity().await;
            Ok(with_message(
                home_view(identity.as_ref()),
                messages::VERIFICATION_SENT,
            ))
        }

        Commands::SignIn { email, password } => {
            gateway.sign_in(email, password).await?;
            Ok(home_view(gateway.settled_identity().await.as_ref()))
        }

        Commands::SignInGoogle { .. } => {
            gateway.sign_in_with_provider().await?;
            Ok(home_view(gateway.settled_identity().await.as_ref()))
        }

        Commands::SignOut => {
            gateway.sign_out().await?;
            let identity = gateway.settled_identity().await;
            Ok(with_message(home_view(identity.as_ref()), messages::SIGNED_OUT))
        }

        Commands::ResendVerification => {
            gateway.resend_verification().await?;
            Ok(json!({ "message": messages::VERIFICATION_SENT }))
        }

        Commands::ResetPassword { email } => {
            gateway.request_password_reset(email).await?;
            Ok(json!({ "message": messages::PASSWORD_RESET_SENT }))
        }

        Commands::Reload => {
            gateway.reload().await?;
            Ok(home_view(gateway.settled_identity().await.as_ref()))
        }

        Commands::Whoami => Ok(home_view(gateway.settled_identity().await.as_ref())),

        Commands::Profile => match gateway.profile().await? {
            Some(record) => serde_json::to_value(record).map_err(|e| {
                AuthError::backend_unavailable(format!("profile could not be rendered: {e}"))
            }),
            None => Ok(Value::Null),
        },

        Commands::Watch => {
            let store = gateway.store();
            let subscription = store.on_identity_changed(move |identity| {
                match render(&home_view(identity.as_ref()), pretty) {
                    Ok(line) => println!("{line}"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            });

            if let Err(e) = tokio::signal::ctrl_c().await {
                info!("Stopping watch: {e}");
            }
            subscription.unsubscribe();

            Ok(home_view(store.current().as_ref()))
        }
    }
}

/// What the home screen shows: the session state and, when signed in, who.
pub fn home_view(identity: Option<&Identity>) -> Value {
    let state = SessionState::of(identity);
    match identity {
        Some(identity) => json!({
            "state": state,
            "uid": identity.uid,
            "name": identity.display_name,
            "email": identity.email,
            "email_verified": identity.email_verified,
        }),
        None => json!({ "state": state }),
    }
}

pub fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(output)
}

fn with_message(mut value: Value, message: &str) -> Value {
    if let Value::Object(map) = &mut value {
        map.insert(String::from("message"), Value::from(message));
    }
    value
}
