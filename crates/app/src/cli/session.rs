use clap::Args;
use revenge_app::{auth::Credentials, context::AppContext};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use super::output::emit;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long, env = "POS_EMAIL")]
    email: String,

    /// Account password; read from stdin when omitted
    #[arg(long, env = "POS_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

pub(crate) async fn login(context: &AppContext, args: LoginArgs) -> Result<(), String> {
    let password = match args.password {
        Some(password) => password,
        None => read_password().await?,
    };

    let user = context
        .session
        .login(
            context.auth.as_ref(),
            &Credentials {
                email: args.email,
                password,
            },
        )
        .await
        .map_err(|error| format!("failed to log in: {error}"))?;

    context.reset_stores();

    emit(format!("Bienvenido, {} ({})", user.name, user.role_name))
}

async fn read_password() -> Result<String, String> {
    emit("Contraseña:")?;

    let mut line = String::new();

    BufReader::new(stdin())
        .read_line(&mut line)
        .await
        .map_err(|error| format!("failed to read password: {error}"))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn logout(context: &AppContext) -> Result<(), String> {
    context.logout();

    emit("Sesión cerrada")
}

pub(crate) fn whoami(context: &AppContext) -> Result<(), String> {
    let user = context
        .session
        .user()
        .ok_or_else(|| "not logged in".to_string())?;

    let role = if user.role_name.is_empty() {
        user.role.to_string()
    } else {
        user.role_name
    };

    emit(format!("{} <{}>\nRol: {role}", user.name, user.email))
}
