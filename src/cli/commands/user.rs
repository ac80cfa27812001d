use crate::auth;
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::AppResult;
use crate::models::user::NewUser;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

/// Staff account management.
///
/// `user add` on an empty database needs no session and forces the admin
/// flag: that is how the first administrator is bootstrapped. Every later
/// mutation requires a logged-in admin.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            UserAction::Add {
                username,
                full_name,
                grade,
                email,
                phone,
                admin,
                password,
            } => {
                let bootstrap = users::no_users_yet(&pool.conn)?;
                if !bootstrap {
                    let caller = auth::current_user(&pool.conn, cfg)?;
                    auth::require_admin(&caller)?;
                }

                let new = NewUser {
                    username: username.clone(),
                    full_name: full_name.clone(),
                    grade: grade.clone().unwrap_or_else(|| cfg.default_grade.clone()),
                    email: email.clone(),
                    phone: phone.clone(),
                    is_admin: *admin || bootstrap,
                };
                let hash = auth::password::hash_password(password)?;
                let id = users::insert_user(&pool.conn, &new, &hash)?;

                audit(
                    &pool.conn,
                    "user_add",
                    username,
                    &format!("created user {username} (id {id})"),
                )?;
                if bootstrap {
                    success(format!(
                        "Created administrator account '{username}' (first user)"
                    ));
                } else {
                    success(format!("Created user '{username}'"));
                }
            }

            UserAction::List { all } => {
                auth::current_user(&pool.conn, cfg)?;
                let list = users::list_users(&pool.conn, *all)?;
                let mut table = Table::new(vec![
                    Column::new("USERNAME", 12),
                    Column::new("FULL NAME", 24),
                    Column::new("GRADE", 6),
                    Column::new("ADMIN", 6),
                    Column::new("ACTIVE", 6),
                ]);
                for u in &list {
                    table.add_row(vec![
                        u.username.clone(),
                        u.full_name.clone(),
                        u.grade.clone(),
                        if u.is_admin { "yes" } else { "" }.to_string(),
                        if u.is_active { "yes" } else { "no" }.to_string(),
                    ]);
                }
                print!("{}", table.render());
                println!("{} user(s)", list.len());
            }

            UserAction::Deactivate { username } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                let user = users::require_user(&pool.conn, username)?;
                users::set_active(&pool.conn, user.id, false)?;
                audit(&pool.conn, "user_deactivate", username, "account deactivated")?;
                success(format!("Deactivated '{username}'"));
            }

            UserAction::Activate { username } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                let user = users::require_user(&pool.conn, username)?;
                users::set_active(&pool.conn, user.id, true)?;
                audit(&pool.conn, "user_activate", username, "account reactivated")?;
                success(format!("Activated '{username}'"));
            }

            UserAction::SetPassword { username, password } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                let user = users::require_user(&pool.conn, username)?;
                let hash = auth::password::hash_password(password)?;
                users::set_password_hash(&pool.conn, user.id, &hash)?;
                audit(&pool.conn, "user_set_password", username, "password reset")?;
                success(format!("Password reset for '{username}'"));
            }
        }
    }
    Ok(())
}
