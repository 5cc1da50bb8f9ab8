use clap::{Args, Subcommand};
use revenge_app::{
    auth::{Role, Screen},
    context::AppContext,
    domain::users::models::UserForm,
    views::tables,
};

use super::{
    args::{StatusArg, set},
    output::{authorize, emit, failed},
};

#[derive(Debug, Subcommand)]
pub(crate) enum UsersCommand {
    /// List user accounts
    List {
        /// Only accounts with this role
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
    },

    /// Show one account
    Show { id: u64 },

    /// Create an account
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "POS_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Role id or name
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// Update an account; omitted fields keep their value
    Update(UpdateArgs),

    /// Delete an account
    Delete { id: u64 },
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    id: u64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// New password; the current one is kept when omitted
    #[arg(long)]
    password: Option<String>,

    #[arg(long, value_parser = parse_role)]
    role: Option<Role>,

    #[arg(long, value_enum)]
    status: Option<StatusArg>,
}

/// Role by backend id or Spanish or English name.
fn parse_role(raw: &str) -> Result<Role, String> {
    if let Ok(id) = raw.parse::<u8>() {
        return Ok(Role::from(id));
    }

    match raw.to_lowercase().as_str() {
        "administrador" | "admin" => Ok(Role::Administrator),
        "cajero" | "cashier" => Ok(Role::Cashier),
        "almacenista" | "almacen" | "inventory" => Ok(Role::InventoryClerk),
        other => Err(format!("unknown role `{other}`")),
    }
}

pub(crate) async fn run(context: &AppContext, command: UsersCommand) -> Result<(), String> {
    authorize(context, Screen::Users)?;

    let store = &context.users;

    match command {
        UsersCommand::List { role } => {
            store
                .fetch_all()
                .await
                .map_err(failed("failed to load users"))?;

            let users = match role {
                Some(role) => store.by_role(role),
                None => store.users(),
            };

            emit(tables::users(&users))
        }
        UsersCommand::Show { id } => {
            let user = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load user"))?;

            emit(tables::user(&user))
        }
        UsersCommand::Create {
            name,
            email,
            password,
            role,
        } => {
            let user = store
                .create(UserForm {
                    name,
                    email,
                    password: Some(password),
                    role,
                    status: None,
                })
                .await
                .map_err(failed("failed to create user"))?;

            emit(tables::user(&user))
        }
        UsersCommand::Update(args) => {
            let id = args.id.into();

            let current = store
                .fetch_one(id)
                .await
                .map_err(failed("failed to load user"))?;

            let mut form = UserForm::from(&current);
            set(&mut form.name, args.name);
            set(&mut form.email, args.email);
            set(&mut form.role, args.role);
            set(&mut form.status, args.status.map(|status| Some(status.into())));
            form.password = args.password;

            let user = store
                .update(id, form)
                .await
                .map_err(failed("failed to update user"))?;

            emit(tables::user(&user))
        }
        UsersCommand::Delete { id } => {
            store
                .delete(id.into())
                .await
                .map_err(failed("failed to delete user"))?;

            emit(format!("Usuario {id} eliminado"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_from_id_or_name() {
        assert_eq!(parse_role("1"), Ok(Role::Administrator));
        assert_eq!(parse_role("Cajero"), Ok(Role::Cashier));
        assert_eq!(parse_role("almacenista"), Ok(Role::InventoryClerk));
        assert_eq!(parse_role("7"), Ok(Role::Other(7)));
        assert!(parse_role("gerente").is_err());
    }
}
