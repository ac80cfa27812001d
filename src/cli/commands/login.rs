use crate::auth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Login, logout and whoami.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Login { username, password } => {
            let pool = DbPool::new(&cfg.database)?;
            let user = auth::login(&pool.conn, cfg, username, password)?;
            success(format!(
                "Logged in as {} ({})",
                user.username, user.full_name
            ));
        }

        Commands::Logout => {
            auth::clear_session(cfg)?;
            success("Logged out");
        }

        Commands::Whoami => {
            let pool = DbPool::new(&cfg.database)?;
            let user = auth::current_user(&pool.conn, cfg)?;
            println!("id        : {}", user.id);
            println!("username  : {}", user.username);
            println!("full name : {}", user.full_name);
            println!("grade     : {}", user.grade);
            println!("admin     : {}", if user.is_admin { "yes" } else { "no" });
            if let Some(email) = &user.email {
                println!("email     : {email}");
            }
            if let Some(phone) = &user.phone {
                println!("phone     : {phone}");
            }
        }

        Commands::Passwd { current, new } => {
            let pool = DbPool::new(&cfg.database)?;
            let user = auth::current_user(&pool.conn, cfg)?;

            // Re-verify the current password before accepting a new one.
            auth::login(&pool.conn, cfg, &user.username, current)?;

            let hash = auth::password::hash_password(new)?;
            crate::db::users::set_password_hash(&pool.conn, user.id, &hash)?;
            crate::db::log::audit(&pool.conn, "passwd", &user.username, "password changed")?;
            success("Password updated");
        }

        _ => {}
    }
    Ok(())
}
